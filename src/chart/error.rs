use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to encode chart image: {source}")]
    Encode {
        #[from]
        source: image::ImageError,
    },
}
