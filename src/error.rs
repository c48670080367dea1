//! Error types for png-icc

use std::io;

/// Result type for png-icc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or rewriting a PNG
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from the zlib encoder
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input does not start with the PNG signature
    #[error("Invalid PNG signature")]
    InvalidSignature,

    /// Fewer bytes remain than a chunk header or its declared length requires
    #[error("Truncated chunk at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedChunk {
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// Declared chunk length exceeds the configured bound
    #[error("Chunk at offset {offset} too large: {length} bytes (max: {max})")]
    ChunkTooLarge { offset: u64, length: u64, max: u64 },

    /// Stored CRC does not match the CRC recomputed over type and payload
    #[error("CRC mismatch in {chunk_type} chunk at offset {offset}: stored {stored:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        chunk_type: String,
        offset: u64,
        stored: u32,
        computed: u32,
    },

    /// Chunk ordering violates IHDR-first / IEND-last rules
    #[error("Invalid PNG structure: {0}")]
    InvalidPngStructure(String),

    /// iCCP payload has no NUL within the profile name field
    #[error("iCCP profile name is not NUL-terminated within 80 bytes")]
    MissingNameTerminator,

    /// iCCP compression method is not zlib/deflate
    #[error("Unsupported iCCP compression method: {0}")]
    UnsupportedCompressionMethod(u8),

    /// Compressed profile stream is malformed
    #[error("Failed to decompress ICC profile: {0}")]
    DecompressionFailed(String),

    /// Profile name is empty, too long, or not printable Latin-1
    #[error("Invalid profile name: {0}")]
    InvalidProfileName(String),

    /// Caller supplied a zero-length profile
    #[error("ICC profile is empty")]
    EmptyProfile,

    /// Source image of a transfer carries no ICC profile
    #[error("No ICC profile found in source image")]
    NoProfileInSource,

    /// Data size exceeds maximum allowed
    #[error("Data too large: {size} bytes (max: {max})")]
    DataTooLarge { size: usize, max: usize },
}

/// Fieldless classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    InvalidSignature,
    TruncatedChunk,
    ChunkTooLarge,
    CrcMismatch,
    InvalidPngStructure,
    MissingNameTerminator,
    UnsupportedCompressionMethod,
    DecompressionFailed,
    InvalidProfileName,
    EmptyProfile,
    NoProfileInSource,
    DataTooLarge,
}

impl Error {
    /// The kind of this error, without its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidSignature => ErrorKind::InvalidSignature,
            Self::TruncatedChunk { .. } => ErrorKind::TruncatedChunk,
            Self::ChunkTooLarge { .. } => ErrorKind::ChunkTooLarge,
            Self::CrcMismatch { .. } => ErrorKind::CrcMismatch,
            Self::InvalidPngStructure(_) => ErrorKind::InvalidPngStructure,
            Self::MissingNameTerminator => ErrorKind::MissingNameTerminator,
            Self::UnsupportedCompressionMethod(_) => ErrorKind::UnsupportedCompressionMethod,
            Self::DecompressionFailed(_) => ErrorKind::DecompressionFailed,
            Self::InvalidProfileName(_) => ErrorKind::InvalidProfileName,
            Self::EmptyProfile => ErrorKind::EmptyProfile,
            Self::NoProfileInSource => ErrorKind::NoProfileInSource,
            Self::DataTooLarge { .. } => ErrorKind::DataTooLarge,
        }
    }
}
