//! PNG chunk framing: length, type tag, payload and CRC-32

use crate::{
    error::{Error, Result},
    options::{CrcPolicy, MAX_CHUNK_SIZE},
};
use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use std::{fmt, io::Cursor};

/// PNG signature
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Bytes of framing around every payload: length (4) + type (4) + CRC (4)
const CHUNK_OVERHEAD: u64 = 12;

/// A 4-byte PNG chunk type tag
///
/// Tags are compared by exact byte equality. Unknown tags are carried through
/// untouched, so only the handful of types this crate inspects get constants.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    pub const IHDR: Self = Self(*b"IHDR");
    pub const PLTE: Self = Self(*b"PLTE");
    pub const IDAT: Self = Self(*b"IDAT");
    pub const IEND: Self = Self(*b"IEND");
    pub const ICCP: Self = Self(*b"iCCP");
    pub const SRGB: Self = Self(*b"sRGB");
    pub const GAMA: Self = Self(*b"gAMA");
    pub const CHRM: Self = Self(*b"cHRM");

    /// Raw tag bytes
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tags should be ASCII letters, but hostile input may carry anything
        for &byte in &self.0 {
            if byte.is_ascii_graphic() {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({})", self)
    }
}

/// A single PNG chunk
///
/// The CRC is not stored; it is always recomputed from the type and payload
/// when the chunk is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub chunk_type: ChunkType,
    pub data: Vec<u8>,
}

impl Chunk {
    /// Create a chunk from a type tag and payload
    pub fn new(chunk_type: ChunkType, data: Vec<u8>) -> Self {
        Self { chunk_type, data }
    }

    /// CRC-32 over type tag + payload, as written on the wire
    pub fn crc(&self) -> u32 {
        calculate_crc(&self.chunk_type, &self.data)
    }

    /// Size of this chunk once framed (length + type + data + CRC)
    pub fn encoded_len(&self) -> usize {
        self.data.len() + CHUNK_OVERHEAD as usize
    }
}

/// Calculate CRC32 for PNG chunk
pub fn calculate_crc(chunk_type: &ChunkType, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type.as_bytes());
    hasher.update(data);
    hasher.finalize()
}

/// Decode the signature and every chunk of a PNG byte stream
///
/// Chunks are returned in file order. No structural rules (IHDR first, IEND
/// last) are checked here; that is the job of [`crate::PngImage::parse`].
pub fn decode_all(bytes: &[u8], max_chunk_size: u32, crc_policy: CrcPolicy) -> Result<Vec<Chunk>> {
    if bytes.len() < PNG_SIGNATURE.len() || &bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(Error::InvalidSignature);
    }

    let total = bytes.len() as u64;
    let mut source = Cursor::new(bytes);
    source.set_position(PNG_SIGNATURE.len() as u64);

    let mut chunks = Vec::new();

    while source.position() < total {
        let offset = source.position();
        let available = total - offset;

        // Need at least the length, type and CRC fields
        if available < CHUNK_OVERHEAD {
            return Err(Error::TruncatedChunk {
                offset,
                needed: CHUNK_OVERHEAD,
                available,
            });
        }

        let chunk_len = source
            .read_u32::<BigEndian>()
            .map_err(|_| truncated(offset, CHUNK_OVERHEAD, available))?;

        // Validate chunk length to prevent allocation attacks
        if chunk_len > max_chunk_size {
            return Err(Error::ChunkTooLarge {
                offset,
                length: chunk_len as u64,
                max: max_chunk_size as u64,
            });
        }

        let needed = CHUNK_OVERHEAD + chunk_len as u64;
        if available < needed {
            return Err(truncated(offset, needed, available));
        }

        let mut tag = [0u8; 4];
        let start = offset as usize + 4;
        tag.copy_from_slice(&bytes[start..start + 4]);
        let chunk_type = ChunkType(tag);

        let data_start = start + 4;
        let data_end = data_start + chunk_len as usize;
        let data = bytes[data_start..data_end].to_vec();

        source.set_position(data_end as u64);
        let stored = source
            .read_u32::<BigEndian>()
            .map_err(|_| truncated(offset, needed, available))?;

        let computed = calculate_crc(&chunk_type, &data);
        if stored != computed {
            match crc_policy {
                CrcPolicy::Strict => {
                    return Err(Error::CrcMismatch {
                        chunk_type: chunk_type.to_string(),
                        offset,
                        stored,
                        computed,
                    });
                }
                CrcPolicy::Warn => {
                    tracing::warn!(
                        %chunk_type,
                        offset,
                        stored,
                        computed,
                        "CRC mismatch tolerated; CRC will be recomputed on write"
                    );
                }
            }
        }

        tracing::trace!(%chunk_type, offset, length = chunk_len, "decoded chunk");
        chunks.push(Chunk::new(chunk_type, data));
    }

    Ok(chunks)
}

/// Encode the signature followed by every chunk with a freshly computed CRC
///
/// Fails with `ChunkTooLarge` if a payload does not fit the 31-bit PNG
/// length field. Lengths are checked before any output is allocated.
pub fn encode_all(chunks: &[Chunk]) -> Result<Vec<u8>> {
    let mut size = PNG_SIGNATURE.len();
    for chunk in chunks {
        if chunk.data.len() > MAX_CHUNK_SIZE as usize {
            return Err(Error::ChunkTooLarge {
                offset: size as u64,
                length: chunk.data.len() as u64,
                max: MAX_CHUNK_SIZE as u64,
            });
        }
        size += chunk.encoded_len();
    }

    let mut output = Vec::with_capacity(size);
    output.extend_from_slice(PNG_SIGNATURE);

    for chunk in chunks {
        write_chunk(&mut output, chunk)?;
    }

    Ok(output)
}

/// Write a PNG chunk with proper CRC
fn write_chunk(output: &mut Vec<u8>, chunk: &Chunk) -> Result<()> {
    let length = u32::try_from(chunk.data.len()).map_err(|_| Error::ChunkTooLarge {
        offset: output.len() as u64,
        length: chunk.data.len() as u64,
        max: MAX_CHUNK_SIZE as u64,
    })?;

    let mut field = [0u8; 4];

    BigEndian::write_u32(&mut field, length);
    output.extend_from_slice(&field);
    output.extend_from_slice(chunk.chunk_type.as_bytes());
    output.extend_from_slice(&chunk.data);

    BigEndian::write_u32(&mut field, chunk.crc());
    output.extend_from_slice(&field);
    Ok(())
}

fn truncated(offset: u64, needed: u64, available: u64) -> Error {
    Error::TruncatedChunk {
        offset,
        needed,
        available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IHDR_DATA: [u8; 13] = [
        0x00, 0x00, 0x00, 0x01, // Width: 1
        0x00, 0x00, 0x00, 0x01, // Height: 1
        0x08, // Bit depth: 8
        0x02, // Color type: RGB
        0x00, // Compression: deflate
        0x00, // Filter: adaptive
        0x00, // Interlace: none
    ];

    fn minimal_bytes() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(PNG_SIGNATURE);

        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&IHDR_DATA);
        data.extend_from_slice(&0x907753de_u32.to_be_bytes()); // CRC

        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(b"IEND");
        data.extend_from_slice(&0xAE426082_u32.to_be_bytes()); // CRC
        data
    }

    #[test]
    fn test_crc_known_values() {
        assert_eq!(calculate_crc(&ChunkType::IEND, &[]), 0xAE426082);
        assert_eq!(calculate_crc(&ChunkType::IHDR, &IHDR_DATA), 0x907753de);
    }

    #[test]
    fn test_decode_minimal() {
        let chunks = decode_all(&minimal_bytes(), MAX_CHUNK_SIZE, CrcPolicy::Strict).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_type, ChunkType::IHDR);
        assert_eq!(chunks[0].data, IHDR_DATA);
        assert_eq!(chunks[1].chunk_type, ChunkType::IEND);
        assert!(chunks[1].data.is_empty());
    }

    #[test]
    fn test_encode_is_lossless() {
        let bytes = minimal_bytes();
        let chunks = decode_all(&bytes, MAX_CHUNK_SIZE, CrcPolicy::Strict).unwrap();
        assert_eq!(encode_all(&chunks).unwrap(), bytes);
    }

    #[test]
    fn test_invalid_signature() {
        let data = vec![0u8; 8];
        let result = decode_all(&data, MAX_CHUNK_SIZE, CrcPolicy::Strict);
        assert!(matches!(result, Err(Error::InvalidSignature)));

        let result = decode_all(b"\x89PN", MAX_CHUNK_SIZE, CrcPolicy::Strict);
        assert!(matches!(result, Err(Error::InvalidSignature)));
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = minimal_bytes();
        // Cut inside the IHDR payload
        let result = decode_all(&bytes[..20], MAX_CHUNK_SIZE, CrcPolicy::Strict);
        assert!(matches!(
            result,
            Err(Error::TruncatedChunk {
                offset: 8,
                needed: 25,
                ..
            })
        ));
    }

    #[test]
    fn test_truncated_header_fields() {
        let bytes = minimal_bytes();
        // Two bytes of a length field left over
        let result = decode_all(&bytes[..10], MAX_CHUNK_SIZE, CrcPolicy::Strict);
        assert!(matches!(result, Err(Error::TruncatedChunk { .. })));
    }

    #[test]
    fn test_chunk_too_large() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&[0u8; 4]);

        let result = decode_all(&data, MAX_CHUNK_SIZE, CrcPolicy::Strict);
        assert!(matches!(result, Err(Error::ChunkTooLarge { .. })));
    }

    #[test]
    fn test_crc_mismatch_policies() {
        let mut bytes = minimal_bytes();
        // Corrupt the IHDR width
        bytes[19] ^= 0xFF;

        let result = decode_all(&bytes, MAX_CHUNK_SIZE, CrcPolicy::Strict);
        match result {
            Err(Error::CrcMismatch {
                chunk_type, offset, ..
            }) => {
                assert_eq!(chunk_type, "IHDR");
                assert_eq!(offset, 8);
            }
            other => panic!("expected CrcMismatch, got {:?}", other),
        }

        let chunks = decode_all(&bytes, MAX_CHUNK_SIZE, CrcPolicy::Warn).unwrap();
        let rewritten = encode_all(&chunks).unwrap();
        let reparsed = decode_all(&rewritten, MAX_CHUNK_SIZE, CrcPolicy::Strict).unwrap();
        assert_eq!(reparsed, chunks);
    }

    #[test]
    fn test_chunk_type_display() {
        assert_eq!(ChunkType::ICCP.to_string(), "iCCP");
        assert_eq!(ChunkType([0, b'A', b'B', b'C']).to_string(), "\\x00ABC");
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_encode_rejects_oversized_payload() {
        let length = MAX_CHUNK_SIZE as usize + 1;
        let chunks = [
            Chunk::new(ChunkType::IHDR, IHDR_DATA.to_vec()),
            Chunk::new(ChunkType(*b"zzZz"), vec![0u8; length]),
        ];

        match encode_all(&chunks) {
            Err(Error::ChunkTooLarge {
                offset, length: len, ..
            }) => {
                assert_eq!(offset, 8 + 25);
                assert_eq!(len, length as u64);
            }
            other => panic!("expected ChunkTooLarge, got {:?}", other.map(|b| b.len())),
        }
    }
}
