//! NotifCheck library crate (used by the server and integration tests).
//!
//! Scores how likely an uploaded notification screenshot is authentic by
//! comparing it against a corpus of known-genuine reference images.
//!
//! # Pipeline
//!
//! decode → embed (VGG16 conv backbone) → per-reference cosine + structural
//! similarity → 0.7/0.3 weighted combination → strict-maximum best match →
//! threshold classification → confidence chart.
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`VisionEmbedder`], [`VisionConfig`] - Embedding extraction
//! - [`AuthenticityScorer`], [`AnalysisReport`] - The analysis pipeline
//! - [`structural_similarity`] - Windowed SSIM comparison
//! - [`render_confidence_chart`] - Confidence bar rendering
//!
//! The embedder supports a deterministic stub mode
//! ([`VisionConfig::stub`]) so tests and model-less deployments run without
//! weight files.

pub mod chart;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod imaging;
pub mod scoring;
pub mod structural;

pub use chart::{CHART_HEIGHT, CHART_WIDTH, ChartError, encode_chart_base64, render_confidence_chart};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_AUTHENTICITY_THRESHOLD, SEMANTIC_WEIGHT, STRUCTURAL_WEIGHT, VGG_EMBEDDING_DIM,
    VGG_INPUT_SIZE,
};
pub use embedding::{
    EmbeddingError, VISION_EMBEDDING_DIM, VISION_INPUT_SIZE, VisionConfig, VisionEmbedder,
    cosine_similarity,
};
pub use imaging::{DecodeError, decode_bytes, decode_path};
pub use scoring::{
    AnalysisError, AnalysisReport, AuthenticityScorer, BestMatch, ComparisonResult,
    ReferenceEntry, confidence_percent, is_authentic,
};
pub use structural::{StructuralError, WINDOW_SIZE, structural_similarity};
