//! Image elements and lazy metadata probing.

use crate::common::error::{Error, Result};
use crate::document::properties::{Properties, Value};
use image::{GenericImageView, ImageFormat, ImageReader};
use once_cell::unsync::OnceCell;
use std::path::{Path, PathBuf};

/// Metadata probed from an image file.
#[derive(Debug, Clone, Copy)]
pub struct ImageMetadata {
    width: u32,
    height: u32,
    format: ImageFormat,
    bits_per_channel: u16,
    channels: u8,
}

impl ImageMetadata {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits_per_channel(&self) -> u16 {
        self.bits_per_channel
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }
}

/// An image element referencing a file on disk.
///
/// Metadata (dimensions, MIME type, bit depth) is probed lazily on first
/// access of a derived property and cached until the source is reassigned;
/// constructing an `Image` never touches the filesystem.
///
/// # Examples
///
/// ```no_run
/// use longan::Image;
///
/// let img = Image::new("photo.png").prop("width", 2.0);
/// println!("{}x{}", img.width()?, img.height()?);
/// # Ok::<(), longan::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Image {
    source: PathBuf,
    properties: Properties,
    cache: OnceCell<ImageMetadata>,
}

impl Image {
    /// Create an image element for the given source path.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            properties: Properties::new(),
            cache: OnceCell::new(),
        }
    }

    /// Set an image property (chainable). `width` and `height` are in
    /// inches and override the probed pixel dimensions in the output
    /// markup.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.set(name, value);
        self
    }

    /// The source path.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Reassign the source path, invalidating cached metadata.
    pub fn set_source(&mut self, source: impl Into<PathBuf>) {
        self.source = source.into();
        self.cache = OnceCell::new();
    }

    /// The image's properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Probed metadata, cached after the first call.
    pub fn metadata(&self) -> Result<&ImageMetadata> {
        self.cache.get_or_try_init(|| probe(&self.source))
    }

    /// Pixel width of the source image.
    pub fn width(&self) -> Result<u32> {
        Ok(self.metadata()?.width())
    }

    /// Pixel height of the source image.
    pub fn height(&self) -> Result<u32> {
        Ok(self.metadata()?.height())
    }

    /// MIME type of the source image (e.g. `image/png`).
    pub fn content_type(&self) -> Result<&'static str> {
        Ok(self.metadata()?.format.to_mime_type())
    }

    /// Preferred file extension for the source image. JPEG images report
    /// `jpg`.
    pub fn extension(&self) -> Result<&'static str> {
        let format = self.metadata()?.format;
        format.extensions_str().first().copied().ok_or_else(|| {
            Error::MetadataUnavailable(format!("no known extension for {:?}", format))
        })
    }
}

fn probe(source: &Path) -> Result<ImageMetadata> {
    let reader = ImageReader::open(source)
        .map_err(|e| Error::MetadataUnavailable(format!("{}: {}", source.display(), e)))?
        .with_guessed_format()
        .map_err(|e| Error::MetadataUnavailable(format!("{}: {}", source.display(), e)))?;
    let format = reader.format().ok_or_else(|| {
        Error::MetadataUnavailable(format!("{}: unrecognized image format", source.display()))
    })?;
    let decoded = reader
        .decode()
        .map_err(|e| Error::MetadataUnavailable(format!("{}: {}", source.display(), e)))?;
    let (width, height) = decoded.dimensions();
    let color = decoded.color();
    let channels = color.channel_count();
    Ok(ImageMetadata {
        width,
        height,
        format,
        bits_per_channel: color.bits_per_pixel() / channels as u16,
        channels,
    })
}
