//! Removal of colour chunks that would compete with an embedded ICC profile

use crate::{chunk::ChunkType, png::PngImage};

/// Chunk types whose colour information a decoder may prefer over iCCP
pub const CONFLICTING_CHUNKS: [ChunkType; 3] = [ChunkType::SRGB, ChunkType::GAMA, ChunkType::CHRM];

/// Remove every sRGB, gAMA and cHRM chunk, returning how many were removed
///
/// Must run before an iCCP chunk is inserted so the profile is the only
/// colour description left in the image.
pub fn strip_conflicting_chunks(image: &mut PngImage) -> usize {
    let removed: usize = CONFLICTING_CHUNKS
        .iter()
        .map(|&ty| image.remove_chunks(ty))
        .sum();

    if removed > 0 {
        tracing::debug!(removed, "stripped conflicting colour chunks");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{minimal_png, PngBuilder};

    #[test]
    fn test_strips_all_kinds() {
        let bytes = PngBuilder::new()
            .srgb(0)
            .gamma(45455)
            .chromaticities([31270, 32900, 64000, 33000, 30000, 60000, 15000, 6000])
            .gamma(45455)
            .text("Title", "kept")
            .build();
        let mut image = PngImage::parse(&bytes).unwrap();

        assert_eq!(strip_conflicting_chunks(&mut image), 4);
        for ty in CONFLICTING_CHUNKS {
            assert!(image.find_chunks(ty).is_empty());
        }
        assert_eq!(image.find_chunks(ChunkType(*b"tEXt")).len(), 1);
    }

    #[test]
    fn test_no_conflicts_is_noop() {
        let bytes = minimal_png();
        let mut image = PngImage::parse(&bytes).unwrap();

        assert_eq!(strip_conflicting_chunks(&mut image), 0);
        assert_eq!(image.serialize().unwrap(), bytes);
    }
}
