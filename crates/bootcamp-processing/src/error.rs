use thiserror::Error;

/// Image processing errors
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Invalid crop rectangle: {0}")]
    InvalidCrop(String),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

