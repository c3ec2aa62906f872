use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No data provided")]
    EmptyPayload,

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Viewer error: {0}")]
    Viewer(String),
}

impl QrError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            QrError::EmptyPayload | QrError::InvalidParameter(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, QrError>;
