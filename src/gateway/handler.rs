use std::path::PathBuf;

use axum::{
    Json,
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;

/// `POST /analyze`: scores an uploaded screenshot against the reference
/// corpus.
///
/// Multipart form with a required `file` part (image bytes) and an optional
/// `reference_dir` text part overriding the configured default corpus.
#[instrument(skip(state, multipart))]
pub async fn analyze_handler(
    State(state): State<HandlerState>,
    mut multipart: Multipart,
) -> Result<Response, GatewayError> {
    let mut file_bytes = None;
    let mut file_name: Option<String> = None;
    let mut reference_dir: Option<PathBuf> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        GatewayError::InvalidRequest(format!("Malformed multipart body: {}", e))
    })? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(|s| s.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("Failed to read file part: {}", e))
                })?;
                file_bytes = Some(bytes);
            }
            Some("reference_dir") => {
                let text = field.text().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!(
                        "Failed to read reference_dir part: {}",
                        e
                    ))
                })?;
                let text = text.trim();
                if !text.is_empty() {
                    reference_dir = Some(PathBuf::from(text));
                }
            }
            _ => {}
        }
    }

    let bytes = file_bytes
        .ok_or_else(|| GatewayError::InvalidRequest("missing 'file' part".to_string()))?;
    let dir = reference_dir.unwrap_or_else(|| state.default_reference_dir.clone());

    debug!(
        file = file_name.as_deref().unwrap_or("<unnamed>"),
        upload_bytes = bytes.len(),
        reference_dir = %dir.display(),
        "Analyzing uploaded screenshot"
    );

    // The pipeline is synchronous and CPU-bound; keep it off the async
    // workers.
    let scorer = state.scorer.clone();
    let report = tokio::task::spawn_blocking(move || scorer.analyze_bytes(&bytes, &dir))
        .await
        .map_err(|e| GatewayError::Internal(format!("Analysis task failed: {}", e)))??;

    Ok(Json(report).into_response())
}
