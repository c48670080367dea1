//! Extract, apply and transfer ICC profiles between PNG images

use crate::{
    chunk::ChunkType,
    conflicts::strip_conflicting_chunks,
    default_profile::default_icc_profile,
    error::{Error, Result},
    iccp::IccProfileChunk,
    inspect::ColorInfo,
    options::ProfileOptions,
    png::PngImage,
};

/// ICC profile handler for PNG images
///
/// Every method parses its input into a fresh [`PngImage`], so one handler
/// can be shared freely across threads. Inputs are never modified; outputs
/// are newly allocated.
#[derive(Debug, Clone, Default)]
pub struct IccPng {
    options: ProfileOptions,
}

impl IccPng {
    /// Create a handler with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler with the given options
    pub fn with_options(options: ProfileOptions) -> Self {
        Self { options }
    }

    /// Options this handler was created with
    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    fn parse(&self, bytes: &[u8]) -> Result<PngImage> {
        PngImage::parse_with(bytes, self.options.max_chunk_size, self.options.crc_policy)
    }

    /// Extract the embedded ICC profile
    ///
    /// Returns an empty vector when the image carries no iCCP chunk. When
    /// several are present, the first one wins.
    pub fn extract(&self, image: &[u8]) -> Result<Vec<u8>> {
        let image = self.parse(image)?;
        Ok(self.extract_from(&image)?.unwrap_or_default())
    }

    fn extract_from(&self, image: &PngImage) -> Result<Option<Vec<u8>>> {
        let Some(chunk) = image.first_chunk(ChunkType::ICCP) else {
            return Ok(None);
        };

        let decoded = IccProfileChunk::decode(&chunk.data, self.options.max_profile_size)?;
        tracing::debug!(
            name = %decoded.profile_name,
            len = decoded.profile_data.len(),
            "extracted ICC profile"
        );
        Ok(Some(decoded.profile_data))
    }

    /// Embed `profile`, replacing any existing profile
    ///
    /// sRGB, gAMA and cHRM chunks are removed, every existing iCCP chunk is
    /// dropped, and the new iCCP chunk is placed before the first PLTE or IDAT
    /// chunk (or before IEND if there is neither).
    ///
    /// The image is parsed before `profile` is checked. Profiles larger than
    /// the configured `max_profile_size` fail with `DataTooLarge`.
    pub fn apply(&self, image: &[u8], profile: &[u8]) -> Result<Vec<u8>> {
        let mut image = self.parse(image)?;
        self.embed(&mut image, profile)?;
        image.serialize()
    }

    fn embed(&self, image: &mut PngImage, profile: &[u8]) -> Result<()> {
        if profile.is_empty() {
            return Err(Error::EmptyProfile);
        }
        if profile.len() > self.options.max_profile_size {
            return Err(Error::DataTooLarge {
                size: profile.len(),
                max: self.options.max_profile_size,
            });
        }

        let chunk = IccProfileChunk::to_chunk(
            &self.options.profile_name,
            profile,
            self.options.compression_level,
        )?;

        strip_conflicting_chunks(image);
        let replaced = image.remove_chunks(ChunkType::ICCP);

        let index = image.insert_chunk_before_first(
            |ty| *ty == ChunkType::PLTE || *ty == ChunkType::IDAT,
            chunk,
        );

        tracing::debug!(
            profile_len = profile.len(),
            replaced,
            index,
            "embedded ICC profile"
        );
        Ok(())
    }

    /// Embed the bundled default profile
    pub fn apply_default(&self, image: &[u8]) -> Result<Vec<u8>> {
        self.apply(image, default_icc_profile())
    }

    /// Copy the profile of `source` into `target`
    ///
    /// The source profile is extracted first; the target is only parsed once
    /// a non-empty profile was found.
    pub fn transfer(&self, source: &[u8], target: &[u8]) -> Result<Vec<u8>> {
        let profile = self.extract(source)?;
        if profile.is_empty() {
            return Err(Error::NoProfileInSource);
        }

        let mut target = self.parse(target)?;
        self.embed(&mut target, &profile)?;
        target.serialize()
    }

    /// Summarize the colour metadata of an image
    pub fn inspect(&self, image: &[u8]) -> Result<ColorInfo> {
        let image = self.parse(image)?;
        ColorInfo::from_image(&image, self.options.max_profile_size)
    }
}

/// Extract the embedded ICC profile, or an empty vector if there is none
///
/// # Example
///
/// ```
/// use png_icc::{apply_icc_profile, extract_icc_profile, test_utils::minimal_png};
///
/// # fn main() -> png_icc::Result<()> {
/// let png = minimal_png();
/// assert!(extract_icc_profile(&png)?.is_empty());
///
/// let tagged = apply_icc_profile(&png, b"profile bytes")?;
/// assert_eq!(extract_icc_profile(&tagged)?, b"profile bytes");
/// # Ok(())
/// # }
/// ```
pub fn extract_icc_profile(image: &[u8]) -> Result<Vec<u8>> {
    IccPng::new().extract(image)
}

/// Embed `profile` in `image`, replacing any existing colour information
pub fn apply_icc_profile(image: &[u8], profile: &[u8]) -> Result<Vec<u8>> {
    IccPng::new().apply(image, profile)
}

/// Copy the ICC profile of `source` into `target`
pub fn transfer_icc_profile(source: &[u8], target: &[u8]) -> Result<Vec<u8>> {
    IccPng::new().transfer(source, target)
}

/// Embed the bundled default ICC profile in `image`
pub fn apply_default_icc_profile(image: &[u8]) -> Result<Vec<u8>> {
    IccPng::new().apply_default(image)
}

/// Summarize the colour metadata of `image`
pub fn inspect_color_info(image: &[u8]) -> Result<ColorInfo> {
    IccPng::new().inspect(image)
}
