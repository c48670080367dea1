//! iCCP chunk payload: profile name, compression method, zlib profile data
//!
//! Wire layout:
//!
//! ```text
//! profile name    1-79 bytes, Latin-1
//! null separator  1 byte
//! compression     1 byte, always 0 (zlib/deflate)
//! profile         remaining bytes, zlib stream
//! ```

use crate::{
    chunk::{Chunk, ChunkType},
    error::{Error, Result},
    options::MAX_CHUNK_SIZE,
};
use flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status};
use std::io::Write;

/// Longest allowed profile name in bytes
pub const MAX_NAME_LEN: usize = 79;

/// The only compression method defined for iCCP (zlib/deflate)
pub const COMPRESSION_DEFLATE: u8 = 0;

/// A decoded iCCP chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IccProfileChunk {
    /// Profile name, decoded from Latin-1
    pub profile_name: String,
    /// Compression method byte (always [`COMPRESSION_DEFLATE`] once decoded)
    pub compression_method: u8,
    /// Decompressed ICC profile
    pub profile_data: Vec<u8>,
}

impl IccProfileChunk {
    /// Decode an iCCP payload
    ///
    /// `max_profile_size` bounds the decompressed profile; a larger stream
    /// fails with `DataTooLarge` rather than being inflated in full.
    pub fn decode(payload: &[u8], max_profile_size: usize) -> Result<Self> {
        let search = &payload[..payload.len().min(MAX_NAME_LEN + 1)];
        let nul = search
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::MissingNameTerminator)?;

        let profile_name = payload[..nul].iter().map(|&b| b as char).collect();

        let compression_method = *payload.get(nul + 1).ok_or_else(|| {
            Error::DecompressionFailed("payload ends before compression method".into())
        })?;
        if compression_method != COMPRESSION_DEFLATE {
            return Err(Error::UnsupportedCompressionMethod(compression_method));
        }

        let profile_data = inflate(&payload[nul + 2..], max_profile_size)?;

        Ok(Self {
            profile_name,
            compression_method,
            profile_data,
        })
    }

    /// Encode an iCCP payload at the given zlib level (0-9)
    ///
    /// The same inputs always produce the same bytes.
    pub fn encode(name: &str, profile_data: &[u8], level: u32) -> Result<Vec<u8>> {
        let name = encode_name(name)?;

        let mut payload = Vec::with_capacity(name.len() + 2 + profile_data.len() / 2);
        payload.extend_from_slice(&name);
        payload.push(0);
        payload.push(COMPRESSION_DEFLATE);

        // The encoder appends the zlib stream after the name and method bytes
        let mut encoder = ZlibEncoder::new(payload, Compression::new(level.min(9)));
        encoder.write_all(profile_data)?;
        let payload = encoder.finish()?;

        if payload.len() > MAX_CHUNK_SIZE as usize {
            return Err(Error::DataTooLarge {
                size: payload.len(),
                max: MAX_CHUNK_SIZE as usize,
            });
        }

        Ok(payload)
    }

    /// Build a complete iCCP chunk
    pub fn to_chunk(name: &str, profile_data: &[u8], level: u32) -> Result<Chunk> {
        let payload = Self::encode(name, profile_data, level)?;
        Ok(Chunk::new(ChunkType::ICCP, payload))
    }
}

/// Validate a profile name and convert it to Latin-1 bytes
///
/// PNG keywords are 1-79 printable Latin-1 characters (32-126, 161-255) with
/// no leading, trailing or consecutive spaces.
fn encode_name(name: &str) -> Result<Vec<u8>> {
    let invalid = |reason: &str| Error::InvalidProfileName(format!("{:?}: {}", name, reason));

    let mut bytes = Vec::with_capacity(name.len());
    for ch in name.chars() {
        let code = ch as u32;
        if !matches!(code, 32..=126 | 161..=255) {
            return Err(invalid("not a printable Latin-1 character"));
        }
        bytes.push(code as u8);
    }

    if bytes.is_empty() {
        return Err(invalid("name is empty"));
    }
    if bytes.len() > MAX_NAME_LEN {
        return Err(invalid("longer than 79 bytes"));
    }
    if bytes.first() == Some(&b' ') || bytes.last() == Some(&b' ') {
        return Err(invalid("leading or trailing space"));
    }
    if bytes.windows(2).any(|w| w == b"  ") {
        return Err(invalid("consecutive spaces"));
    }

    Ok(bytes)
}

/// Inflate a zlib stream into at most `max_size` bytes
///
/// The output buffer grows in steps, so the inflater runs with
/// `FlushDecompress::None` and is called until it reports the end of the
/// stream.
fn inflate(compressed: &[u8], max_size: usize) -> Result<Vec<u8>> {
    if compressed.is_empty() {
        return Err(Error::DecompressionFailed("empty zlib stream".into()));
    }

    let limit = max_size.saturating_add(1);
    let mut inflater = Decompress::new(true);
    let mut profile = Vec::with_capacity(compressed.len().saturating_mul(4).min(limit));

    loop {
        if profile.len() == profile.capacity() {
            let grow = profile.capacity().max(4096).min(limit - profile.len());
            profile.reserve_exact(grow);
        }

        let progress = (inflater.total_in(), inflater.total_out());
        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&compressed[consumed..], &mut profile, FlushDecompress::None)
            .map_err(|e| Error::DecompressionFailed(e.to_string()))?;

        if profile.len() > max_size {
            return Err(Error::DataTooLarge {
                size: profile.len(),
                max: max_size,
            });
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                // Room left in the buffer but nothing moved: the input ran out
                if profile.len() < profile.capacity()
                    && progress == (inflater.total_in(), inflater.total_out())
                {
                    return Err(Error::DecompressionFailed("truncated zlib stream".into()));
                }
            }
        }
    }

    Ok(profile)
}
