use std::path::PathBuf;
use std::sync::Arc;

use crate::scoring::AuthenticityScorer;

#[derive(Clone)]
pub struct HandlerState {
    /// Shared pipeline; the embedder inside serializes model access.
    pub scorer: Arc<AuthenticityScorer>,

    /// Directory used when a request does not name a reference corpus.
    pub default_reference_dir: PathBuf,
}

impl HandlerState {
    pub fn new(scorer: Arc<AuthenticityScorer>, default_reference_dir: PathBuf) -> Self {
        Self {
            scorer,
            default_reference_dir,
        }
    }
}
