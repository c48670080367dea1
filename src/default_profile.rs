//! Bundled default ICC profile
//!
//! A compact ICC v2.1 RGB display profile with sRGB primaries (Bradford-adapted
//! to D50) and gamma 2.2 tone curves, embedded at build time.
//!
//! The bytes live in the binary's read-only data, so they exist from process
//! start, are never mutated and need no synchronization.

const DEFAULT_PROFILE_BYTES: &[u8] = include_bytes!("../assets/default.icc");

/// Size of the fixed ICC header
const ICC_HEADER_LEN: usize = 128;

// A replaced asset must still carry a complete header whose declared size
// matches the file and whose signature is `acsp`.
const _: () = {
    let bytes = DEFAULT_PROFILE_BYTES;
    assert!(bytes.len() >= ICC_HEADER_LEN);

    let declared = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    assert!(declared as usize == bytes.len());

    assert!(bytes[36] == b'a' && bytes[37] == b'c' && bytes[38] == b's' && bytes[39] == b'p');
};

/// The bundled profile, shared for the life of the process
pub fn default_icc_profile() -> &'static [u8] {
    DEFAULT_PROFILE_BYTES
}

/// A copy of the bundled profile
pub fn get_default_icc_profile() -> Vec<u8> {
    default_icc_profile().to_vec()
}
