use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image bytes: {source}")]
    Malformed {
        #[source]
        source: image::ImageError,
    },
}

impl From<image::ImageError> for DecodeError {
    fn from(source: image::ImageError) -> Self {
        DecodeError::Malformed { source }
    }
}
