use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default input side length for the vision backbone.
pub const VISION_INPUT_SIZE: usize = crate::constants::VGG_INPUT_SIZE;

/// Default embedding dimension (flattened final feature map).
pub const VISION_EMBEDDING_DIM: usize = crate::constants::VGG_EMBEDDING_DIM;

#[derive(Debug, Clone)]
/// Configuration for [`VisionEmbedder`](super::VisionEmbedder).
pub struct VisionConfig {
    /// Path to the VGG16 weights file (safetensors, torchvision layout).
    pub model_path: PathBuf,
    /// Side length of the square network input.
    pub input_size: usize,
    /// Output embedding dimension.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no weights file required).
    pub testing_stub: bool,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            input_size: VISION_INPUT_SIZE,
            embedding_dim: VISION_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl VisionConfig {
    /// Env var used to locate the weights file.
    pub const ENV_MODEL_PATH: &'static str = "NOTIFCHECK_MODEL_PATH";

    /// Loads config from environment variables (a missing value becomes an
    /// empty path).
    pub fn from_env() -> Result<Self, EmbeddingError> {
        let model_path = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_default();

        Ok(Self {
            model_path,
            ..Default::default()
        })
    }

    /// Creates a config for a weights file.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no weights file; produces deterministic
    /// embeddings derived from pixel content).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.input_size == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "input_size must be non-zero".to_string(),
            });
        }

        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.model_path.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_path.exists() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }

        Ok(())
    }

    /// Returns `true` if the weights file path exists.
    pub fn model_available(&self) -> bool {
        !self.model_path.as_os_str().is_empty() && self.model_path.exists()
    }
}
