use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::scoring::AnalysisError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            // Client-supplied inputs: a bad corpus path or an undecodable
            // upload are the caller's fault, everything else is ours.
            GatewayError::Analysis(
                AnalysisError::DirectoryNotFound { .. }
                | AnalysisError::EmptyCorpus { .. }
                | AnalysisError::Decode(_),
            ) => StatusCode::BAD_REQUEST,
            GatewayError::Analysis(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
