//! Cross-cutting, shared constants.
//!
//! The combined-score weights and the authenticity threshold are treated as
//! invariants across modules (scoring, chart, gateway). The chart renderer and
//! the classifier must read the SAME threshold constant so the visual verdict
//! never diverges from the textual one.

/// Weight of the semantic (embedding cosine) component in the combined score.
pub const SEMANTIC_WEIGHT: f32 = 0.7;

/// Weight of the structural (SSIM) component in the combined score.
pub const STRUCTURAL_WEIGHT: f32 = 0.3;

/// Combined score above which an upload is classified as authentic.
///
/// The comparison is strict: a score exactly equal to the threshold is
/// inauthentic.
pub const DEFAULT_AUTHENTICITY_THRESHOLD: f32 = 0.65;

/// Side length of the square input the VGG backbone expects.
pub const VGG_INPUT_SIZE: usize = 224;

/// Flattened embedding length for the VGG16 conv backbone at
/// [`VGG_INPUT_SIZE`]: the final 7x7x512 feature map.
pub const VGG_EMBEDDING_DIM: usize = 7 * 7 * 512;

/// Reference file extensions admitted into the corpus (case-insensitive).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Returns `true` if `file_name` carries a supported reference extension.
pub fn is_supported_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
}
