//! Whitelist Middleware.
//! Rejects render requests whose `repoURL` is not whitelisted.

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::http::error::ApiError;
use crate::http::server::{AppState, RENDER_PATH};
use crate::security::Whitelist;

/// Outcome of inspecting a render request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Hand the request to the next stage unchanged.
    Continue,
    /// Answer 403 without running the handler.
    Reject { repo_url: String },
}

/// Only `POST /render` is inspected.
pub fn applies_to(method: &Method, path: &str) -> bool {
    method == Method::POST && path == RENDER_PATH
}

/// Classify a buffered render body against the whitelist.
///
/// Anything that is not a JSON object with a non-empty string `repoURL`
/// continues; the handler's own validation decides what to do with it.
pub fn classify(body: &[u8], whitelist: &Whitelist) -> Verdict {
    if body.is_empty() {
        return Verdict::Continue;
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "Render body is not JSON, deferring to handler");
            return Verdict::Continue;
        }
    };

    let repo_url = match value.get("repoURL").and_then(Value::as_str) {
        Some(url) if !url.is_empty() => url,
        _ => return Verdict::Continue,
    };

    if whitelist.is_allowed(repo_url) {
        Verdict::Continue
    } else {
        Verdict::Reject {
            repo_url: repo_url.to_string(),
        }
    }
}

pub async fn whitelist_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !applies_to(req.method(), req.uri().path()) {
        return next.run(req).await;
    }

    // Buffer once; the handler reads the same bytes afterwards.
    let (parts, body) = req.into_parts();
    let limit = state.settings.max_body_bytes;
    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, limit, "Failed to buffer render request body");
            return ApiError::PayloadTooLarge { limit }.into_response();
        }
    };

    match classify(&bytes, &state.whitelist) {
        Verdict::Continue => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Verdict::Reject { repo_url } => {
            warn!(repo_url = %repo_url, "Repository URL not allowed");
            ApiError::RepoNotAllowed {
                repo_url,
                allowed_patterns: state.whitelist.patterns().to_vec(),
            }
            .into_response()
        }
    }
}
