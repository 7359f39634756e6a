use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::debug;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::types::{HealthResponse, RenderRequest, RenderResponse, WhitelistResponse};

pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Render manifests for a repository. Runs after the whitelist gate.
pub async fn render(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, ApiError> {
    let Json(req) = payload?;

    debug!(
        repo_url = %req.repo_url,
        path = %req.path,
        target_revision = %req.target_revision,
        "Rendering"
    );

    Ok(Json(state.renderer.render(&req)))
}

pub async fn whitelist(State(state): State<AppState>) -> Json<WhitelistResponse> {
    Json(WhitelistResponse {
        patterns: state.whitelist.patterns().to_vec(),
    })
}
