#![no_main]

use libfuzzer_sys::fuzz_target;
use png_icc::{CrcPolicy, IccPng, PngImage, ProfileOptions};

fuzz_target!(|data: &[u8]| {
    // Parsing any input should NEVER panic, only return errors
    if let Ok(image) = PngImage::parse(data) {
        // A strict parse that succeeds must re-serialize losslessly
        assert_eq!(image.serialize().unwrap(), data);
    }

    // Read-only operations under both CRC policies
    let _ = png_icc::extract_icc_profile(data);
    let _ = png_icc::inspect_color_info(data);

    let lenient = IccPng::with_options(ProfileOptions::new().crc_policy(CrcPolicy::Warn));
    let _ = lenient.extract(data);
    let _ = lenient.inspect(data);
});
