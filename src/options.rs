//! Options controlling parsing and profile embedding

/// Maximum declared chunk length accepted by default
///
/// PNG limits chunk lengths to 2^31 - 1 bytes; anything larger is a hostile
/// or corrupt length field.
pub const MAX_CHUNK_SIZE: u32 = 0x7FFF_FFFF;

/// Maximum decompressed ICC profile size accepted by default (64 MB)
///
/// Real profiles are a few kilobytes; large LUT-based printer profiles reach
/// a few megabytes. The bound stops a small iCCP chunk from inflating into an
/// unbounded allocation.
pub const MAX_PROFILE_SIZE: usize = 64 * 1024 * 1024;

/// Profile name written into newly created iCCP chunks
pub const DEFAULT_PROFILE_NAME: &str = "ICC profile";

/// zlib level used for new iCCP payloads
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 9;

/// How to treat a chunk whose stored CRC does not match its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrcPolicy {
    /// Fail the whole operation with `CrcMismatch` (default)
    #[default]
    Strict,
    /// Log a warning and keep the chunk; its CRC is recomputed on output
    Warn,
}

/// Options for reading and rewriting PNG images
///
/// This struct uses a builder pattern. The default is strict CRC checking,
/// the format's own chunk length limit and the canonical profile name.
///
/// # Example
///
/// ```
/// use png_icc::{CrcPolicy, IccPng, ProfileOptions};
///
/// let options = ProfileOptions::new()
///     .crc_policy(CrcPolicy::Warn)
///     .profile_name("Display P3");
/// let handler = IccPng::with_options(options);
/// # let _ = handler;
/// ```
#[derive(Debug, Clone)]
pub struct ProfileOptions {
    pub(crate) crc_policy: CrcPolicy,
    pub(crate) profile_name: String,
    pub(crate) max_chunk_size: u32,
    pub(crate) max_profile_size: usize,
    pub(crate) compression_level: u32,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            crc_policy: CrcPolicy::default(),
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
            max_chunk_size: MAX_CHUNK_SIZE,
            max_profile_size: MAX_PROFILE_SIZE,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl ProfileOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CRC mismatch policy
    pub fn crc_policy(mut self, policy: CrcPolicy) -> Self {
        self.crc_policy = policy;
        self
    }

    /// Set the name written into new iCCP chunks
    ///
    /// The name is validated when a chunk is encoded, not here.
    pub fn profile_name(mut self, name: impl Into<String>) -> Self {
        self.profile_name = name.into();
        self
    }

    /// Set the largest declared chunk length accepted while parsing
    ///
    /// Values above [`MAX_CHUNK_SIZE`] are clamped to it.
    pub fn max_chunk_size(mut self, size: u32) -> Self {
        self.max_chunk_size = size.min(MAX_CHUNK_SIZE);
        self
    }

    /// Set the largest decompressed profile accepted while decoding iCCP
    pub fn max_profile_size(mut self, size: usize) -> Self {
        self.max_profile_size = size;
        self
    }

    /// Set the zlib compression level (0-9) for new iCCP payloads
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    /// Get the CRC mismatch policy
    pub fn get_crc_policy(&self) -> CrcPolicy {
        self.crc_policy
    }

    /// Get the name written into new iCCP chunks
    pub fn get_profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Get the maximum accepted chunk length
    pub fn get_max_chunk_size(&self) -> u32 {
        self.max_chunk_size
    }

    /// Get the maximum accepted decompressed profile size
    pub fn get_max_profile_size(&self) -> usize {
        self.max_profile_size
    }

    /// Get the zlib compression level
    pub fn get_compression_level(&self) -> u32 {
        self.compression_level
    }
}
