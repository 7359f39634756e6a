//! HTTP client for the renderer service, used by the CLI.
//!
//! One request per call, fixed per-operation timeout, no retries.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::http::server::{RENDER_PATH, WHITELIST_PATH};
use crate::http::types::{ErrorBody, RenderRequest, RenderResponse, WhitelistResponse};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

pub const RENDER_TIMEOUT: Duration = Duration::from_secs(30);
pub const WHITELIST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Cannot connect to server at {server}")]
    Connect { server: String },

    /// The server refused the repository; carries its `detail` text.
    #[error("{detail}")]
    Denied { detail: String },

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// How `render` output is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON response.
    Json,
    /// Flattened `key: value` listing.
    Yaml,
}

pub struct RendererClient {
    client: Client,
    server: String,
}

impl RendererClient {
    pub fn new(server: &str) -> Self {
        Self {
            client: Client::new(),
            server: server.trim_end_matches('/').to_string(),
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// `POST /render`. A 403 surfaces the server's denial message.
    pub async fn render(&self, req: &RenderRequest) -> Result<RenderResponse, ClientError> {
        let resp = self
            .client
            .post(format!("{}{}", self.server, RENDER_PATH))
            .timeout(RENDER_TIMEOUT)
            .json(req)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if status == StatusCode::FORBIDDEN {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| "Repository not allowed".to_string());
            return Err(ClientError::Denied { detail });
        }
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(resp.json().await?)
    }

    /// `GET /whitelist`.
    pub async fn whitelist(&self) -> Result<WhitelistResponse, ClientError> {
        let resp = self
            .client
            .get(format!("{}{}", self.server, WHITELIST_PATH))
            .timeout(WHITELIST_TIMEOUT)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(resp.json().await?)
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_connect() {
            ClientError::Connect {
                server: self.server.clone(),
            }
        } else {
            ClientError::Transport(err)
        }
    }
}

/// Render a `RenderResponse` for the terminal.
pub fn format_render(resp: &RenderResponse, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(resp),
        OutputFormat::Yaml => {
            let mut lines = vec![
                format!("repoURL: {}", resp.repo_url),
                format!("path: {}", resp.path),
                format!("targetRevision: {}", resp.target_revision),
                format!("mock: {}", resp.mock),
                "manifests:".to_string(),
            ];
            for manifest in &resp.manifests {
                let kind = manifest
                    .get("kind")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown");
                let name = manifest
                    .get("metadata")
                    .and_then(|m| m.get("name"))
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");
                lines.push(format!("  - {}/{}", kind, name));
            }
            Ok(lines.join("\n"))
        }
    }
}

pub fn format_whitelist(resp: &WhitelistResponse) -> String {
    let mut lines = vec!["Whitelist patterns:".to_string()];
    lines.extend(resp.patterns.iter().map(|p| format!("  - {}", p)));
    lines.join("\n")
}
