//! Downsizes and re-encodes images as JPEG, in the browser (through
//! `wasm-bindgen`) or natively.

pub mod batch;
pub mod dimensions;
pub mod error;
pub mod filename;
pub mod media_type;
pub mod stats;
pub mod transcode;
pub mod wasm;

pub use dimensions::{fit_within, DEFAULT_MAX_DIMENSION};
pub use error::TranscodeError;
pub use filename::compressed_file_name;
pub use media_type::{is_image_media_type, OUTPUT_MEDIA_TYPE};
pub use stats::SizeStats;
pub use transcode::{
    transcode, ResampleFilter, SourceImage, TranscodeOptions, TranscodedImage, DEFAULT_QUALITY,
};
