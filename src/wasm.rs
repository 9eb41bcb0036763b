//! Browser bindings. The page hands over the picked file's bytes, type and
//! name and gets back the JPEG plus its size readout.

use js_sys::Uint8Array;
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::dimensions::DEFAULT_MAX_DIMENSION;
use crate::stats::{format_megabytes, SizeStats};
use crate::transcode::{transcode, SourceImage, TranscodeOptions, TranscodedImage, DEFAULT_QUALITY};

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Routes `log` output to the browser console. `level` is a `log` level name
/// ("debug", "warn", ...) and defaults to "info". Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = level
        .as_deref()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    // Already installed on a second call; only the level changes.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[wasm_bindgen]
pub struct CompressedImage {
    image: TranscodedImage,
    stats: SizeStats,
}

#[wasm_bindgen]
impl CompressedImage {
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Uint8Array {
        Uint8Array::from(self.image.bytes.as_slice())
    }

    #[wasm_bindgen(getter, js_name = fileName)]
    pub fn file_name(&self) -> String {
        self.image.file_name.clone()
    }

    #[wasm_bindgen(getter, js_name = mediaType)]
    pub fn media_type(&self) -> String {
        self.image.media_type.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.image.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.image.height
    }

    #[wasm_bindgen(getter, js_name = originalSize)]
    pub fn original_size(&self) -> f64 {
        self.stats.original_bytes as f64
    }

    #[wasm_bindgen(getter, js_name = compressedSize)]
    pub fn compressed_size(&self) -> f64 {
        self.stats.compressed_bytes as f64
    }

    #[wasm_bindgen(getter, js_name = originalMegabytes)]
    pub fn original_megabytes(&self) -> String {
        format_megabytes(self.stats.original_bytes)
    }

    #[wasm_bindgen(getter, js_name = compressedMegabytes)]
    pub fn compressed_megabytes(&self) -> String {
        format_megabytes(self.stats.compressed_bytes)
    }
}

/// Compresses a picked file. `max_dimension` defaults to 1280 and `quality`
/// to 0.6.
#[wasm_bindgen(js_name = compressImage)]
pub fn compress_image(
    bytes: &[u8],
    media_type: &str,
    file_name: &str,
    max_dimension: Option<u32>,
    quality: Option<f32>,
) -> Result<CompressedImage, JsError> {
    let options = TranscodeOptions::default()
        .with_max_dimension(max_dimension.unwrap_or(DEFAULT_MAX_DIMENSION))
        .with_quality(quality.unwrap_or(DEFAULT_QUALITY));

    let source = SourceImage::new(bytes, media_type, file_name);
    let image = transcode(&source, &options).map_err(|e| {
        log::warn!("{}: {}", file_name, e);
        JsError::from(e)
    })?;

    let stats = SizeStats::new(bytes.len() as u64, image.bytes.len() as u64);
    log::info!("{} -> {}: {}", file_name, image.file_name, stats);

    Ok(CompressedImage { image, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_compress_image_defaults() {
        let png = png_bytes(2000, 1000);
        let out = compress_image(&png, "image/png", "p.png", None, None)
            .unwrap_or_else(|_| panic!("compression failed"));

        assert_eq!((out.width(), out.height()), (1280, 640));
        assert_eq!(out.file_name(), "compressed_p.jpg");
        assert_eq!(out.media_type(), "image/jpeg");
        assert_eq!(out.original_size(), png.len() as f64);
        assert_eq!(out.compressed_size(), out.image.bytes.len() as f64);
        assert_eq!(
            out.compressed_megabytes(),
            format_megabytes(out.image.bytes.len() as u64)
        );
        assert_eq!(
            out.original_megabytes(),
            format!("{:.2}", png.len() as f64 / 1_048_576.0)
        );

        let explicit = compress_image(&png, "image/png", "p.png", Some(1280), Some(0.6))
            .unwrap_or_else(|_| panic!("compression failed"));
        assert_eq!(explicit.image.bytes, out.image.bytes);
    }

    #[test]
    fn test_compress_image_overrides() {
        let png = png_bytes(400, 800);
        let out = compress_image(&png, "image/png", "tall.png", Some(200), Some(0.9))
            .unwrap_or_else(|_| panic!("compression failed"));

        assert_eq!((out.width(), out.height()), (100, 200));
    }
}
