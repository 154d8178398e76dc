use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::chart;
use crate::constants::{DEFAULT_AUTHENTICITY_THRESHOLD, is_supported_extension};
use crate::embedding::{VisionEmbedder, cosine_similarity};
use crate::imaging;
use crate::structural::structural_similarity;

use super::error::AnalysisError;
use super::types::{AnalysisReport, BestMatch, ComparisonResult, ReferenceEntry};

/// Drives the full analysis pipeline: corpus scan, score combination,
/// threshold classification and chart rendering.
///
/// The embedder handle is injected so tests can substitute the deterministic
/// stub backend.
pub struct AuthenticityScorer {
    embedder: Arc<VisionEmbedder>,
    threshold: f32,
}

impl std::fmt::Debug for AuthenticityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticityScorer")
            .field("embedder", &self.embedder)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl AuthenticityScorer {
    pub fn new(embedder: Arc<VisionEmbedder>) -> Self {
        Self::with_threshold(embedder, DEFAULT_AUTHENTICITY_THRESHOLD)
    }

    pub fn with_threshold(embedder: Arc<VisionEmbedder>, threshold: f32) -> Self {
        Self {
            embedder,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn embedder(&self) -> &VisionEmbedder {
        &self.embedder
    }

    /// Analyzes raw uploaded image bytes against a reference directory.
    ///
    /// An undecodable upload is fatal to the request; undecodable references
    /// are skipped.
    pub fn analyze_bytes(
        &self,
        bytes: &[u8],
        reference_dir: &Path,
    ) -> Result<AnalysisReport, AnalysisError> {
        let upload = imaging::decode_bytes(bytes)?;
        self.analyze_image(&upload, reference_dir)
    }

    /// Analyzes an already-decoded upload against a reference directory.
    pub fn analyze_image(
        &self,
        upload: &RgbImage,
        reference_dir: &Path,
    ) -> Result<AnalysisReport, AnalysisError> {
        // Corpus validation happens before any embedding work.
        let references = reference_paths(reference_dir)?;

        info!(
            corpus_size = references.len(),
            reference_dir = %reference_dir.display(),
            "Scanning reference corpus"
        );

        let upload_embedding = self.embedder.embed(upload)?;

        let entries = references.into_iter().filter_map(|(file_name, path)| {
            match imaging::decode_path(&path) {
                Ok(image) => Some(ReferenceEntry { file_name, image }),
                Err(e) => {
                    warn!(file = %file_name, error = %e, "Skipping unreadable reference image");
                    None
                }
            }
        });

        let best = self.score_references(upload, &upload_embedding, entries)?;
        self.build_report(best)
    }

    /// Scans references in the given order, tracking the strict maximum of
    /// the combined score. Ties keep the first-seen reference; nothing is
    /// recorded unless a reference scores above zero.
    pub fn score_references<I>(
        &self,
        upload: &RgbImage,
        upload_embedding: &[f32],
        references: I,
    ) -> Result<Option<BestMatch>, AnalysisError>
    where
        I: IntoIterator<Item = ReferenceEntry>,
    {
        let mut best: Option<BestMatch> = None;
        let mut best_combined = 0.0f32;

        for entry in references {
            let reference_embedding = self.embedder.embed(&entry.image)?;
            let semantic = cosine_similarity(upload_embedding, &reference_embedding);
            let structural = structural_similarity(upload, &entry.image)?;
            let scores = ComparisonResult::new(semantic, structural);

            debug!(
                file = %entry.file_name,
                semantic,
                structural,
                combined = scores.combined,
                "Scored reference"
            );

            if scores.combined > best_combined {
                best_combined = scores.combined;
                best = Some(BestMatch {
                    file_name: entry.file_name,
                    scores,
                });
            }
        }

        Ok(best)
    }

    fn build_report(&self, best: Option<BestMatch>) -> Result<AnalysisReport, AnalysisError> {
        let (combined, semantic, structural, best_match_file) = match best {
            Some(m) => (
                m.scores.combined,
                m.scores.semantic,
                m.scores.structural,
                Some(m.file_name),
            ),
            None => (0.0, 0.0, 0.0, None),
        };

        let authentic = super::is_authentic(combined, self.threshold);
        let confidence = super::confidence_percent(combined);

        info!(
            combined_score = combined,
            is_authentic = authentic,
            best_match = best_match_file.as_deref().unwrap_or("<none>"),
            "Corpus scan complete"
        );

        let chart_png = chart::render_confidence_chart(confidence, self.threshold)?;

        Ok(AnalysisReport {
            is_authentic: authentic,
            confidence,
            confidence_chart: chart::encode_chart_base64(&chart_png),
            combined_score: combined,
            visual_similarity: structural,
            semantic_similarity: semantic,
            best_match_file,
        })
    }
}

/// Lists qualifying reference files in directory-listing order (unsorted).
fn reference_paths(dir: &Path) -> Result<Vec<(String, PathBuf)>, AnalysisError> {
    if !dir.is_dir() {
        return Err(AnalysisError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|_| AnalysisError::DirectoryNotFound {
        path: dir.to_path_buf(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && is_supported_extension(name) {
            files.push((name.to_string(), path));
        }
    }

    if files.is_empty() {
        return Err(AnalysisError::EmptyCorpus {
            path: dir.to_path_buf(),
        });
    }

    Ok(files)
}
