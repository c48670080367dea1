//! Lossless ICC profile editing for PNG images.
//!
//! This crate extracts, applies and transfers ICC colour profiles stored in
//! PNG `iCCP` chunks. It never decodes pixels: the image is walked chunk by
//! chunk, the colour chunks are rewritten, and everything else is passed
//! through byte for byte.
//!
//! # Design Principles
//!
//! - **Lossless**: an image that is parsed and written back unchanged is
//!   byte-identical to the input
//! - **Fail fast**: truncation, bad CRCs and malformed profiles are errors,
//!   never silently skipped
//! - **Authoritative profiles**: applying a profile removes `sRGB`, `gAMA`
//!   and `cHRM` chunks so decoders cannot prefer them over the profile
//! - **Deterministic**: the same inputs always produce the same bytes
//!
//! # Quick Start
//!
//! ```
//! use png_icc::{apply_default_icc_profile, extract_icc_profile, get_default_icc_profile};
//! # use png_icc::test_utils::minimal_png;
//!
//! # fn main() -> png_icc::Result<()> {
//! # let png = minimal_png();
//! let tagged = apply_default_icc_profile(&png)?;
//! assert_eq!(extract_icc_profile(&tagged)?, get_default_icc_profile());
//! # Ok(())
//! # }
//! ```
//!
//! # Handler API
//!
//! For non-default behaviour, configure an [`IccPng`] handler:
//!
//! ```
//! use png_icc::{CrcPolicy, IccPng, ProfileOptions};
//! # use png_icc::test_utils::{minimal_png, sample_profile};
//!
//! # fn main() -> png_icc::Result<()> {
//! # let png = minimal_png();
//! # let profile = sample_profile(256);
//! let handler = IccPng::with_options(
//!     ProfileOptions::new()
//!         .profile_name("Display P3")
//!         .crc_policy(CrcPolicy::Warn),
//! );
//! let tagged = handler.apply(&png, &profile)?;
//! let info = handler.inspect(&tagged)?;
//! assert_eq!(info.icc_profile.map(|p| p.len), Some(256));
//! # Ok(())
//! # }
//! ```

mod chunk;
mod conflicts;
mod default_profile;
mod error;
mod iccp;
mod inspect;
mod options;
mod png;
mod profile;

pub use chunk::{calculate_crc, decode_all, encode_all, Chunk, ChunkType, PNG_SIGNATURE};
pub use conflicts::{strip_conflicting_chunks, CONFLICTING_CHUNKS};
pub use default_profile::{default_icc_profile, get_default_icc_profile};
pub use error::{Error, ErrorKind, Result};
pub use iccp::{IccProfileChunk, COMPRESSION_DEFLATE, MAX_NAME_LEN};
pub use inspect::{ColorInfo, EmbeddedProfile};
pub use options::{
    CrcPolicy, ProfileOptions, DEFAULT_COMPRESSION_LEVEL, DEFAULT_PROFILE_NAME, MAX_CHUNK_SIZE,
    MAX_PROFILE_SIZE,
};
pub use png::PngImage;
pub use profile::{
    apply_default_icc_profile, apply_icc_profile, extract_icc_profile, inspect_color_info,
    transfer_icc_profile, IccPng,
};

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
