use thiserror::Error;

/// Failure of a single transcode call. None of these are retried and no
/// partial output is ever returned.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The declared media type is not an image type.
    #[error("not a valid image file: {0}")]
    InvalidInput(String),

    /// The payload could not be parsed into a raster.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// Re-encoding produced no output.
    #[error("failed to encode compressed image: {0}")]
    Encode(String),
}

impl From<TranscodeError> for String {
    fn from(error: TranscodeError) -> Self {
        error.to_string()
    }
}
