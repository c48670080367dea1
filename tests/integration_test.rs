// Integration tests for profile operations using the test_utils module

use png_icc::{
    apply_default_icc_profile, apply_icc_profile, calculate_crc, extract_icc_profile,
    get_default_icc_profile, test_utils::*, transfer_icc_profile, ChunkType, ErrorKind,
    IccProfileChunk, PngImage, CONFLICTING_CHUNKS, MAX_PROFILE_SIZE,
};

/// Walk the raw bytes and check every stored CRC against its type + payload
fn assert_crcs_valid(bytes: &[u8]) {
    let mut pos = PNG_SIGNATURE_LEN;
    while pos < bytes.len() {
        let len = u32::from_be_bytes(bytes[pos..pos + 4].try_into().unwrap()) as usize;
        let tag: [u8; 4] = bytes[pos + 4..pos + 8].try_into().unwrap();
        let data = &bytes[pos + 8..pos + 8 + len];
        let stored = u32::from_be_bytes(bytes[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        assert_eq!(
            stored,
            calculate_crc(&ChunkType(tag), data),
            "bad CRC on {}",
            ChunkType(tag)
        );
        pos += 12 + len;
    }
    assert_eq!(pos, bytes.len());
}

const PNG_SIGNATURE_LEN: usize = 8;

fn colourful_png() -> Vec<u8> {
    PngBuilder::new()
        .size(3, 2)
        .srgb(0)
        .gamma(45455)
        .chromaticities([31270, 32900, 64000, 33000, 30000, 60000, 15000, 6000])
        .text("Software", "test")
        .gamma(100000)
        .build()
}

#[test]
fn test_round_trip_without_mutation() {
    for bytes in [
        minimal_png(),
        colourful_png(),
        PngBuilder::new()
            .color_type(3)
            .palette(&[1, 2, 3, 4, 5, 6])
            .icc_profile("Existing", &sample_profile(300))
            .build(),
    ] {
        let image = PngImage::parse(&bytes).unwrap();
        assert_eq!(image.serialize().unwrap(), bytes);
    }
}

#[test]
fn test_apply_default_to_minimal_png() {
    let output = apply_default_icc_profile(&minimal_png()).unwrap();
    let image = PngImage::parse(&output).unwrap();

    let iccp = image.find_chunks(ChunkType::ICCP);
    assert_eq!(iccp.len(), 1);

    let decoded =
        IccProfileChunk::decode(&image.chunks()[iccp[0]].data, MAX_PROFILE_SIZE).unwrap();
    assert_eq!(decoded.profile_data, get_default_icc_profile());
}

#[test]
fn test_transfer_copies_profile() {
    let profile = sample_profile(128);
    let source = PngBuilder::new().icc_profile("Source", &profile).build();
    let target = PngBuilder::new().size(2, 2).text("Title", "target").build();

    let output = transfer_icc_profile(&source, &target).unwrap();
    assert_eq!(extract_icc_profile(&output).unwrap(), profile);

    // Target content other than colour chunks survives
    let image = PngImage::parse(&output).unwrap();
    assert_eq!(image.find_chunks(ChunkType(*b"tEXt")).len(), 1);
}

#[test]
fn test_error_scenarios() {
    let err = apply_icc_profile(&minimal_png(), &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyProfile);

    let err = transfer_icc_profile(&minimal_png(), &colourful_png()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoProfileInSource);

    // The target is never looked at when the source has no profile
    let err = transfer_icc_profile(&minimal_png(), b"garbage target").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoProfileInSource);
}

#[test]
fn test_truncated_input_fails_every_operation() {
    let bytes = PngBuilder::new()
        .icc_profile("Profile", &sample_profile(200))
        .build();
    let good = minimal_png();

    // Cut in the middle of the iCCP payload
    let truncated = &bytes[..60];

    let kinds = [
        extract_icc_profile(truncated).unwrap_err().kind(),
        apply_icc_profile(truncated, &sample_profile(16)).unwrap_err().kind(),
        apply_icc_profile(truncated, &[]).unwrap_err().kind(),
        apply_default_icc_profile(truncated).unwrap_err().kind(),
        transfer_icc_profile(truncated, &good).unwrap_err().kind(),
        transfer_icc_profile(&bytes, truncated).unwrap_err().kind(),
        png_icc::inspect_color_info(truncated).unwrap_err().kind(),
    ];

    for kind in kinds {
        assert_eq!(kind, ErrorKind::TruncatedChunk);
    }
}

#[test]
fn test_repeated_apply_does_not_accumulate() {
    let profile = sample_profile(500);
    let once = apply_icc_profile(&colourful_png(), &profile).unwrap();
    let twice = apply_icc_profile(&once, &profile).unwrap();

    let image = PngImage::parse(&twice).unwrap();
    assert_eq!(image.find_chunks(ChunkType::ICCP).len(), 1);
    assert_eq!(extract_icc_profile(&twice).unwrap(), profile);
    assert_eq!(once, twice);
}

#[test]
fn test_conflicting_chunks_removed() {
    let output = apply_icc_profile(&colourful_png(), &sample_profile(64)).unwrap();
    let image = PngImage::parse(&output).unwrap();

    for ty in CONFLICTING_CHUNKS {
        assert!(image.find_chunks(ty).is_empty(), "{} survived", ty);
    }
}

#[test]
fn test_placement_before_data_and_palette() {
    let inputs = [
        minimal_png(),
        colourful_png(),
        PngBuilder::new()
            .color_type(3)
            .text("a", "b")
            .palette(&[0, 0, 0])
            .build(),
        PngBuilder::new().without_image_data().build(),
    ];

    for input in inputs {
        let output = apply_icc_profile(&input, &sample_profile(32)).unwrap();
        let types = PngImage::parse(&output).unwrap().chunk_types();

        let iccp = types.iter().position(|t| *t == ChunkType::ICCP).unwrap();
        assert!(iccp > 0);
        assert_eq!(types[0], ChunkType::IHDR);

        for bound in [ChunkType::IDAT, ChunkType::PLTE, ChunkType::IEND] {
            if let Some(pos) = types.iter().position(|t| *t == bound) {
                assert!(iccp < pos, "iCCP at {} not before {} at {}", iccp, bound, pos);
            }
        }
    }
}

#[test]
fn test_outputs_have_valid_crcs() {
    let profile = sample_profile(1000);
    let source = PngBuilder::new().icc_profile("Src", &profile).build();

    assert_crcs_valid(&apply_icc_profile(&colourful_png(), &profile).unwrap());
    assert_crcs_valid(&apply_default_icc_profile(&minimal_png()).unwrap());
    assert_crcs_valid(&transfer_icc_profile(&source, &colourful_png()).unwrap());
}

#[test]
fn test_inputs_are_not_modified() {
    let input = colourful_png();
    let copy = input.clone();
    let _ = apply_default_icc_profile(&input).unwrap();
    assert_eq!(input, copy);
}

#[test]
fn test_extract_without_profile_is_empty() {
    assert!(extract_icc_profile(&minimal_png()).unwrap().is_empty());
    assert!(extract_icc_profile(&colourful_png()).unwrap().is_empty());
}

#[test]
fn test_zero_padded_profile_survives_apply_and_transfer() {
    let mut profile = get_default_icc_profile();
    profile.resize(16 * 1024, 0);

    let tagged = apply_icc_profile(&colourful_png(), &profile).unwrap();
    assert_eq!(extract_icc_profile(&tagged).unwrap(), profile);

    let moved = transfer_icc_profile(&tagged, &minimal_png()).unwrap();
    assert_eq!(extract_icc_profile(&moved).unwrap(), profile);

    let info = png_icc::inspect_color_info(&moved).unwrap();
    assert_eq!(info.icc_profile.map(|p| p.len), Some(profile.len()));
}

#[test]
fn test_extract_first_of_several_profiles() {
    let bytes = PngBuilder::new()
        .icc_profile("First", &[1u8; 20])
        .icc_profile("Second", &[2u8; 20])
        .build();
    assert_eq!(extract_icc_profile(&bytes).unwrap(), vec![1u8; 20]);

    let output = apply_icc_profile(&bytes, &[3u8; 20]).unwrap();
    let image = PngImage::parse(&output).unwrap();
    assert_eq!(image.find_chunks(ChunkType::ICCP).len(), 1);
}

#[test]
fn test_inspect_reports_applied_profile() {
    let output = apply_default_icc_profile(&colourful_png()).unwrap();
    let info = png_icc::inspect_color_info(&output).unwrap();

    assert_eq!((info.width, info.height), (3, 2));
    assert_eq!(
        info.icc_profile.map(|p| p.len),
        Some(get_default_icc_profile().len())
    );
    assert!(info.gamma.is_none());
    assert!(info.srgb_intent.is_none());
    assert!(!info.has_chromaticities);
}
