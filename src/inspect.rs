//! Colour metadata summary of a PNG

use crate::{
    chunk::ChunkType,
    error::{Error, Result},
    iccp::IccProfileChunk,
    png::PngImage,
};
use byteorder::{BigEndian, ByteOrder};

/// Embedded profile details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedProfile {
    /// Name stored in the iCCP chunk
    pub name: String,
    /// Decompressed profile length in bytes
    pub len: usize,
}

/// Colour-related metadata read from the chunk stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    /// First iCCP chunk, if any
    pub icc_profile: Option<EmbeddedProfile>,
    /// gAMA value scaled by 100000
    pub gamma: Option<u32>,
    /// sRGB rendering intent
    pub srgb_intent: Option<u8>,
    pub has_chromaticities: bool,
    pub has_palette: bool,
    pub chunk_count: usize,
}

impl ColorInfo {
    /// Summarize an already parsed image
    pub fn from_image(image: &PngImage, max_profile_size: usize) -> Result<Self> {
        let ihdr = &image.header().data;
        if ihdr.len() < 13 {
            return Err(Error::InvalidPngStructure(format!(
                "IHDR is {} bytes, expected 13",
                ihdr.len()
            )));
        }

        let icc_profile = match image.first_chunk(ChunkType::ICCP) {
            Some(chunk) => {
                let decoded = IccProfileChunk::decode(&chunk.data, max_profile_size)?;
                Some(EmbeddedProfile {
                    name: decoded.profile_name,
                    len: decoded.profile_data.len(),
                })
            }
            None => None,
        };

        let gamma = image
            .first_chunk(ChunkType::GAMA)
            .filter(|c| c.data.len() >= 4)
            .map(|c| BigEndian::read_u32(&c.data));

        let srgb_intent = image
            .first_chunk(ChunkType::SRGB)
            .and_then(|c| c.data.first().copied());

        Ok(Self {
            width: BigEndian::read_u32(&ihdr[0..4]),
            height: BigEndian::read_u32(&ihdr[4..8]),
            bit_depth: ihdr[8],
            color_type: ihdr[9],
            icc_profile,
            gamma,
            srgb_intent,
            has_chromaticities: image.first_chunk(ChunkType::CHRM).is_some(),
            has_palette: image.first_chunk(ChunkType::PLTE).is_some(),
            chunk_count: image.chunks().len(),
        })
    }
}
