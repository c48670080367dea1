//! Test utilities for building synthetic PNG images.
//!
//! This module provides helpers for tests, fuzz seeds and doc examples:
//! - [`PngBuilder`] for structurally valid PNGs with chosen ancillary chunks
//! - [`minimal_png`] for the smallest useful image (1x1 RGB)
//! - [`sample_profile`] for deterministic stand-in profile bytes
//!
//! # Usage
//!
//! ```
//! use png_icc::test_utils::*;
//!
//! let png = PngBuilder::new()
//!     .size(2, 2)
//!     .gamma(45455)
//!     .icc_profile("Test", &sample_profile(128))
//!     .build();
//! assert!(png_icc::PngImage::parse(&png).is_ok());
//! ```

use crate::{
    chunk::{encode_all, Chunk, ChunkType},
    iccp::IccProfileChunk,
};
use flate2::{write::ZlibEncoder, Compression};
use std::io::Write;

/// Builder for synthetic PNG images
///
/// Chunks come out as `IHDR`, ancillary chunks in the order they were added,
/// `PLTE` (if set), one `IDAT`, `IEND`. Every CRC is valid.
#[derive(Debug, Clone)]
pub struct PngBuilder {
    width: u32,
    height: u32,
    color_type: u8,
    ancillary: Vec<Chunk>,
    palette: Option<Vec<u8>>,
    image_data: bool,
}

impl Default for PngBuilder {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            color_type: 2,
            ancillary: Vec::new(),
            palette: None,
            image_data: true,
        }
    }
}

impl PngBuilder {
    /// 1x1, 8-bit RGB, no ancillary chunks
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// PNG colour type (0, 2, 3, 4 or 6); bit depth is always 8
    pub fn color_type(mut self, color_type: u8) -> Self {
        self.color_type = color_type;
        self
    }

    pub fn srgb(self, intent: u8) -> Self {
        self.chunk(ChunkType::SRGB, vec![intent])
    }

    /// Gamma scaled by 100000 (45455 is 1/2.2)
    pub fn gamma(self, gamma: u32) -> Self {
        self.chunk(ChunkType::GAMA, gamma.to_be_bytes().to_vec())
    }

    /// White point and primaries, each scaled by 100000
    pub fn chromaticities(self, values: [u32; 8]) -> Self {
        let data = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.chunk(ChunkType::CHRM, data)
    }

    /// Add an iCCP chunk
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid profile name.
    pub fn icc_profile(self, name: &str, profile: &[u8]) -> Self {
        let payload = IccProfileChunk::encode(name, profile, 9).expect("valid profile name");
        self.chunk(ChunkType::ICCP, payload)
    }

    /// Add an uncompressed tEXt chunk
    pub fn text(self, keyword: &str, text: &str) -> Self {
        let mut data = keyword.as_bytes().to_vec();
        data.push(0);
        data.extend_from_slice(text.as_bytes());
        self.chunk(ChunkType(*b"tEXt"), data)
    }

    /// Add an arbitrary ancillary chunk
    pub fn chunk(mut self, chunk_type: ChunkType, data: Vec<u8>) -> Self {
        self.ancillary.push(Chunk::new(chunk_type, data));
        self
    }

    /// RGB triples for a PLTE chunk
    pub fn palette(mut self, entries: &[u8]) -> Self {
        self.palette = Some(entries.to_vec());
        self
    }

    /// Leave out the IDAT chunk (structurally odd, but parseable)
    pub fn without_image_data(mut self) -> Self {
        self.image_data = false;
        self
    }

    /// Build the image as chunks
    pub fn build_chunks(&self) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity(self.ancillary.len() + 4);

        let mut ihdr = Vec::with_capacity(13);
        ihdr.extend_from_slice(&self.width.to_be_bytes());
        ihdr.extend_from_slice(&self.height.to_be_bytes());
        ihdr.extend_from_slice(&[8, self.color_type, 0, 0, 0]);
        chunks.push(Chunk::new(ChunkType::IHDR, ihdr));

        chunks.extend(self.ancillary.iter().cloned());

        if let Some(palette) = &self.palette {
            chunks.push(Chunk::new(ChunkType::PLTE, palette.clone()));
        }

        if self.image_data {
            chunks.push(Chunk::new(ChunkType::IDAT, self.scanlines()));
        }

        chunks.push(Chunk::new(ChunkType::IEND, Vec::new()));
        chunks
    }

    /// Build the image as PNG bytes
    ///
    /// # Panics
    ///
    /// Panics if a raw chunk added with [`PngBuilder::chunk`] exceeds the PNG
    /// length limit.
    pub fn build(&self) -> Vec<u8> {
        encode_all(&self.build_chunks()).expect("chunk within PNG length limit")
    }

    /// Zlib-compressed all-zero scanlines, each with filter type 0
    fn scanlines(&self) -> Vec<u8> {
        let channels = match self.color_type {
            2 => 3,
            4 => 2,
            6 => 4,
            _ => 1,
        };
        let row = 1 + self.width as usize * channels;
        let raw = vec![0u8; row * self.height as usize];

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(9));
        encoder.write_all(&raw).expect("write to Vec");
        encoder.finish().expect("write to Vec")
    }
}

/// 1x1 RGB image with only IHDR, IDAT and IEND
pub fn minimal_png() -> Vec<u8> {
    PngBuilder::new().build()
}

/// Deterministic stand-in profile of `len` bytes
///
/// Starts with the big-endian length, like a real ICC header.
pub fn sample_profile(len: usize) -> Vec<u8> {
    let mut profile: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
    if len >= 4 {
        profile[..4].copy_from_slice(&(len as u32).to_be_bytes());
    }
    profile
}
