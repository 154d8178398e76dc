//! Visual embedding extraction and semantic similarity.
//!
//! [`VisionEmbedder`] runs a pretrained VGG16 convolutional backbone
//! (classifier head excluded) over a normalized image and flattens the final
//! feature map into a fixed-length vector. Use [`VisionConfig::stub`] for
//! tests without weight files.

/// Vision embedder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
pub(crate) mod vgg;


pub use config::{VISION_EMBEDDING_DIM, VISION_INPUT_SIZE, VisionConfig};
pub use error::EmbeddingError;

use std::sync::Arc;

use candle_core::{Device, Tensor};
use image::RgbImage;
use image::imageops::FilterType;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::embedding::device::select_device;
use vgg::VggBackbone;

/// Per-channel means subtracted during preprocessing, in B, G, R order: the
/// ImageNet statistics the backbone was pretrained with.
const IMAGENET_BGR_MEAN: [f32; 3] = [103.939, 116.779, 123.68];

enum EmbedderBackend {
    Model {
        model: Arc<Mutex<VggBackbone>>,
        device: Device,
    },
    Stub {
        device: Device,
    },
}

/// Embedding generator for screenshot comparison (supports stub mode).
///
/// Inference through the loaded backbone is serialized behind a mutex;
/// requests never share input or output buffers.
pub struct VisionEmbedder {
    backend: EmbedderBackend,
    config: VisionConfig,
}

impl std::fmt::Debug for VisionEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub { device } => format!("Stub({:?})", device),
                },
            )
            .field("input_size", &self.config.input_size)
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl VisionEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: VisionConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for vision embedder");

        if config.testing_stub {
            warn!("Vision embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub { device },
                config,
            });
        }

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_path.clone(),
            });
        }

        let expected_dim = VggBackbone::output_dim(config.input_size);
        if config.embedding_dim != expected_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) does not match backbone output ({}) for input size {}",
                    config.embedding_dim, expected_dim, config.input_size
                ),
            });
        }

        let model = VggBackbone::load(&config.model_path, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load VGG16 weights: {}", e),
            }
        })?;

        info!(
            model_path = %config.model_path.display(),
            input_size = config.input_size,
            embedding_dim = config.embedding_dim,
            "VGG16 backbone loaded successfully (conv stack only)"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model: Arc::new(Mutex::new(model)),
                device,
            },
            config,
        })
    }

    /// Extracts the embedding for a single image.
    ///
    /// The input is resized to the configured network resolution; the caller's
    /// image is never mutated.
    pub fn embed(&self, image: &RgbImage) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model { model, device } => {
                self.embed_with_model(image, model, device)
            }
            EmbedderBackend::Stub { .. } => self.embed_stub(image),
        }
    }

    fn embed_with_model(
        &self,
        image: &RgbImage,
        model: &Arc<Mutex<VggBackbone>>,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let input = self.preprocess(image, device)?;

        debug!(
            width = image.width(),
            height = image.height(),
            "Extracting embedding (conv forward pass)"
        );

        let features = model
            .lock()
            .forward(&input)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Conv forward pass failed: {}", e),
            })?;

        let embedding = features
            .flatten_all()
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Failed to flatten feature map: {}", e),
            })?;

        Ok(embedding)
    }

    /// Resizes to the network resolution and applies the pretraining input
    /// normalization: RGB reordered to BGR, per-channel mean subtraction,
    /// CHW layout.
    fn preprocess(&self, image: &RgbImage, device: &Device) -> Result<Tensor, EmbeddingError> {
        let size = self.config.input_size as u32;
        let resized = image::imageops::resize(image, size, size, FilterType::Triangle);

        let plane = (size as usize) * (size as usize);
        let mut data = vec![0f32; 3 * plane];
        for (i, pixel) in resized.pixels().enumerate() {
            let [r, g, b] = pixel.0;
            data[i] = b as f32 - IMAGENET_BGR_MEAN[0];
            data[plane + i] = g as f32 - IMAGENET_BGR_MEAN[1];
            data[2 * plane + i] = r as f32 - IMAGENET_BGR_MEAN[2];
        }

        let tensor = Tensor::from_vec(data, (1, 3, size as usize, size as usize), device)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Failed to create input tensor: {}", e),
            })?;

        Ok(tensor)
    }

    fn embed_stub(&self, image: &RgbImage) -> Result<Vec<f32>, EmbeddingError> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let size = self.config.input_size as u32;
        let resized = image::imageops::resize(image, size, size, FilterType::Triangle);

        debug!(
            width = image.width(),
            height = image.height(),
            "Extracting stub embedding"
        );

        let mut hasher = DefaultHasher::new();
        resized.as_raw().hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize(&mut embedding);

        Ok(embedding)
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub { .. })
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Model { .. })
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &VisionConfig {
        &self.config
    }
}

fn normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in embedding {
            *x /= norm;
        }
    }
}

/// Cosine similarity between two embeddings.
///
/// Returns 0.0 for zero-norm or length-mismatched inputs; a zero vector is a
/// degenerate case with no meaningful direction.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0f32;
    let mut norm_a = 0f32;
    let mut norm_b = 0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 { 0.0 } else { dot / denom }
}
