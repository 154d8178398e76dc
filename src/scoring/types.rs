use image::RgbImage;
use serde::Serialize;

use crate::constants::{SEMANTIC_WEIGHT, STRUCTURAL_WEIGHT};

/// A reference image paired with its corpus identifier. Ephemeral; rebuilt
/// from the reference directory on every request.
#[derive(Debug, Clone)]
pub struct ReferenceEntry {
    /// File name within the reference directory.
    pub file_name: String,
    /// Decoded reference image.
    pub image: RgbImage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Per-reference similarity outcome.
pub struct ComparisonResult {
    /// Cosine similarity between the two embeddings.
    pub semantic: f32,
    /// Windowed structural similarity.
    pub structural: f32,
    /// Weighted combination used for ranking and classification.
    pub combined: f32,
}

impl ComparisonResult {
    /// Combines the two components with the fixed 0.7 / 0.3 weighting.
    pub fn new(semantic: f32, structural: f32) -> Self {
        Self {
            semantic,
            structural,
            combined: SEMANTIC_WEIGHT * semantic + STRUCTURAL_WEIGHT * structural,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Best-scoring reference seen during a corpus scan.
pub struct BestMatch {
    /// File name of the winning reference.
    pub file_name: String,
    /// Its similarity scores.
    pub scores: ComparisonResult,
}

/// Final aggregate of one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Whether the best combined score strictly exceeds the threshold.
    pub is_authentic: bool,
    /// Best combined score expressed as a percentage (unclamped).
    pub confidence: f32,
    /// Base64-encoded PNG confidence bar.
    pub confidence_chart: String,
    /// Best combined score.
    pub combined_score: f32,
    /// Structural component of the best match.
    pub visual_similarity: f32,
    /// Semantic component of the best match.
    pub semantic_similarity: f32,
    /// File name of the best match, absent when nothing scored above zero.
    pub best_match_file: Option<String>,
}
