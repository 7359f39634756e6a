//! Error responses.
//!
//! # Design Decisions
//! - Every error body is JSON with a `detail` field
//! - Whitelist denials additionally carry the allowed pattern list
//! - Body shape problems of any kind map to 422

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::http::types::{DenialBody, ErrorBody};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Repository URL not allowed: {repo_url}")]
    RepoNotAllowed {
        repo_url: String,
        allowed_patterns: Vec<String>,
    },

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RepoNotAllowed { .. } => StatusCode::FORBIDDEN,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        match self {
            ApiError::RepoNotAllowed {
                allowed_patterns, ..
            } => (
                status,
                Json(DenialBody {
                    detail,
                    allowed_patterns,
                }),
            )
                .into_response(),
            _ => (status, Json(ErrorBody { detail })).into_response(),
        }
    }
}
