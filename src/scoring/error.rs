use std::path::PathBuf;
use thiserror::Error;

use crate::chart::ChartError;
use crate::embedding::EmbeddingError;
use crate::imaging::DecodeError;
use crate::structural::StructuralError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("reference directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("no reference images found in {path}")]
    EmptyCorpus { path: PathBuf },

    #[error("failed to decode uploaded image: {0}")]
    Decode(#[from] DecodeError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("structural comparison failed: {0}")]
    Structural(#[from] StructuralError),

    #[error("confidence chart rendering failed: {0}")]
    Chart(#[from] ChartError),
}
