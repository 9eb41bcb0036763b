//! Decode, downscale, flatten and re-encode a single image.
//!
//! The pipeline mirrors what a browser canvas does when an `<img>` is drawn
//! onto a white-filled canvas and exported with `toBlob("image/jpeg", q)`:
//! transparency is composited onto opaque white and the output is always a
//! baseline JPEG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, ImageReader, RgbImage};
use log::debug;

use crate::dimensions::{fit_within, DEFAULT_MAX_DIMENSION};
use crate::error::TranscodeError;
use crate::filename::compressed_file_name;
use crate::media_type::{format_hint, is_image_media_type, OUTPUT_MEDIA_TYPE};

/// Default JPEG quality on the `0.0..=1.0` scale.
pub const DEFAULT_QUALITY: f32 = 0.6;

/// An image as handed over by the caller. Never modified.
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a> {
    pub bytes: &'a [u8],
    pub media_type: &'a str,
    pub file_name: &'a str,
}

impl<'a> SourceImage<'a> {
    pub fn new(bytes: &'a [u8], media_type: &'a str, file_name: &'a str) -> Self {
        Self {
            bytes,
            media_type,
            file_name,
        }
    }
}

/// Resampling filter used when downscaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResampleFilter {
    Nearest,
    /// Bilinear.
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscodeOptions {
    /// Longest allowed side of the output, in pixels.
    pub max_dimension: u32,
    /// JPEG quality in `0.0..=1.0`. Out of range values are clamped.
    pub quality: f32,
    pub filter: ResampleFilter,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_QUALITY,
            filter: ResampleFilter::default(),
        }
    }
}

impl TranscodeOptions {
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Quality on the JPEG encoder's `1..=100` scale.
    pub fn jpeg_quality(&self) -> u8 {
        let q = if self.quality.is_nan() {
            DEFAULT_QUALITY
        } else {
            self.quality.clamp(0.0, 1.0)
        };
        ((q * 100.0).round() as u8).max(1)
    }
}

/// The re-encoded image, fully owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodedImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub media_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub source_width: u32,
    pub source_height: u32,
}

impl TranscodedImage {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Downscales `source` to fit `options.max_dimension`, flattens it onto
/// white and re-encodes it as JPEG.
///
/// The media type is checked before the payload is touched, so non-image
/// input never allocates a raster.
pub fn transcode(
    source: &SourceImage<'_>,
    options: &TranscodeOptions,
) -> Result<TranscodedImage, TranscodeError> {
    if !is_image_media_type(source.media_type) {
        return Err(TranscodeError::InvalidInput(format!(
            "'{}' has media type '{}'",
            source.file_name, source.media_type
        )));
    }

    let decoded = decode(source)?;
    let (source_width, source_height) = (decoded.width(), decoded.height());
    let (width, height) = fit_within(source_width, source_height, options.max_dimension);
    debug!(
        "{}: {}x{} -> {}x{}",
        source.file_name, source_width, source_height, width, height
    );

    if width == 0 || height == 0 {
        return Err(TranscodeError::Encode(format!(
            "target size {width}x{height} is empty"
        )));
    }

    let flattened = flatten_onto_white(decoded);
    let resized = if (width, height) == (source_width, source_height) {
        flattened
    } else {
        imageops::resize(&flattened, width, height, options.filter.into())
    };

    let quality = options.jpeg_quality();
    let bytes = encode_jpeg(&resized, quality)?;
    debug!(
        "{}: encoded {} bytes at q={} (source {} bytes)",
        source.file_name,
        bytes.len(),
        quality,
        source.bytes.len()
    );

    Ok(TranscodedImage {
        bytes,
        file_name: compressed_file_name(source.file_name),
        media_type: OUTPUT_MEDIA_TYPE,
        width,
        height,
        source_width,
        source_height,
    })
}

fn decode(source: &SourceImage<'_>) -> Result<DynamicImage, TranscodeError> {
    let mut reader = ImageReader::new(Cursor::new(source.bytes))
        .with_guessed_format()
        .map_err(|e| TranscodeError::Decode(e.to_string()))?;

    // Content sniffing wins over the declared type, like a browser does.
    if reader.format().is_none() {
        match format_hint(source.media_type) {
            Some(format) => reader.set_format(format),
            None => {
                return Err(TranscodeError::Decode(format!(
                    "unrecognized image format for '{}'",
                    source.media_type
                )))
            }
        }
    }

    reader
        .decode()
        .map_err(|e| TranscodeError::Decode(e.to_string()))
}

/// Composites any alpha channel onto opaque white.
fn flatten_onto_white(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (src, dst) in rgba.pixels().zip(rgb.pixels_mut()) {
        let alpha = u16::from(src.0[3]);
        for c in 0..3 {
            let blended = u16::from(src.0[c]) * alpha + 255 * (255 - alpha);
            dst.0[c] = ((blended + 127) / 255) as u8;
        }
    }
    rgb
}

fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, TranscodeError> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .encode(img.as_raw(), img.width(), img.height(), ColorType::Rgb8.into())
        .map_err(|e| TranscodeError::Encode(e.to_string()))?;

    if buffer.is_empty() {
        return Err(TranscodeError::Encode("encoder produced no output".into()));
    }
    Ok(buffer)
}
