//! HTTP error mapping
//!
//! Request-level problems become a 400 with a plain-text reason. Multipart
//! transport failures keep the status axum assigns them (413 when the body
//! exceeds the upload ceiling). Everything else is a logged 500.

use crate::types::ImportError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

/// Error returned by request handlers
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Import(e) if e.is_request_error() => {
                warn!(reason = %e, "request rejected");
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            WebError::Import(e) => {
                error!(error = %e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            WebError::Multipart(e) => {
                warn!(reason = %e, "multipart upload failed");
                (e.status(), e.body_text()).into_response()
            }
        }
    }
}
