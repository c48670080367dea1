#![no_main]

use libfuzzer_sys::fuzz_target;
use png_icc::{apply_icc_profile, extract_icc_profile, transfer_icc_profile, ChunkType, PngImage};

fuzz_target!(|data: &[u8]| {
    // Split input into an image and a profile
    let split = data.first().map(|&b| b as usize).unwrap_or(0).min(data.len());
    let (profile, image) = data.split_at(split);

    if let Ok(output) = apply_icc_profile(image, profile) {
        // Every successful apply must round-trip the profile
        assert_eq!(extract_icc_profile(&output).unwrap(), profile);

        let parsed = PngImage::parse(&output).unwrap();
        assert_eq!(parsed.find_chunks(ChunkType::ICCP).len(), 1);

        let _ = transfer_icc_profile(&output, image);
    }
});
