//! Manifest rendering.
//!
//! Only the mock path exists: it echoes the request back inside a fixed
//! `ConfigMap`. With mock mode off the renderer returns no manifests.

use serde_json::{json, Value};

use crate::config::Settings;
use crate::http::types::{Manifest, RenderRequest, RenderResponse};

/// Kind of the synthesized mock document.
pub const MOCK_KIND: &str = "ConfigMap";

/// Name of the synthesized mock document.
pub const MOCK_NAME: &str = "mock-manifest";

/// How render requests are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Echo the request inside a single fake manifest.
    Mock,
    /// Real rendering is not implemented; returns an empty list.
    Placeholder,
}

/// Produces render responses. Stateless; identical requests give identical output.
#[derive(Debug, Clone)]
pub struct Renderer {
    mode: RenderMode,
    upstream_url: String,
}

impl Renderer {
    pub fn new(mode: RenderMode, upstream_url: impl Into<String>) -> Self {
        Self {
            mode,
            upstream_url: upstream_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mode = if settings.mock_mode {
            RenderMode::Mock
        } else {
            RenderMode::Placeholder
        };
        Self::new(mode, settings.upstream_url.clone())
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn render(&self, req: &RenderRequest) -> RenderResponse {
        let manifests = match self.mode {
            RenderMode::Mock => vec![mock_manifest(req)],
            RenderMode::Placeholder => {
                tracing::debug!(
                    repo_url = %req.repo_url,
                    upstream_url = %self.upstream_url,
                    "Rendering not implemented, returning no manifests"
                );
                Vec::new()
            }
        };

        RenderResponse {
            repo_url: req.repo_url.clone(),
            path: req.path.clone(),
            target_revision: req.target_revision.clone(),
            manifests,
            mock: self.mode == RenderMode::Mock,
        }
    }
}

fn mock_manifest(req: &RenderRequest) -> Manifest {
    let doc = json!({
        "apiVersion": "v1",
        "kind": MOCK_KIND,
        "metadata": { "name": MOCK_NAME },
        "data": {
            "repoURL": req.repo_url,
            "path": req.path,
            "targetRevision": req.target_revision,
        },
    });

    match doc {
        Value::Object(map) => map,
        _ => Manifest::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_mode_echoes_request() {
        let renderer = Renderer::new(RenderMode::Mock, "");
        let resp = renderer.render(&RenderRequest::new("https://github.com/org/repo"));

        assert!(resp.mock);
        assert_eq!(resp.manifests.len(), 1);
        let manifest = &resp.manifests[0];
        assert_eq!(manifest["kind"], MOCK_KIND);
        assert_eq!(manifest["metadata"]["name"], MOCK_NAME);
        assert_eq!(
            manifest["data"],
            json!({
                "repoURL": "https://github.com/org/repo",
                "path": ".",
                "targetRevision": "HEAD",
            })
        );
    }

    #[test]
    fn test_placeholder_mode_returns_nothing() {
        let settings = Settings {
            mock_mode: false,
            ..Settings::default()
        };
        let renderer = Renderer::from_settings(&settings);
        assert_eq!(renderer.mode(), RenderMode::Placeholder);

        let req = RenderRequest {
            repo_url: "https://github.com/org/repo".into(),
            path: "apps/web".into(),
            target_revision: "v1.2.0".into(),
        };
        let resp = renderer.render(&req);
        assert!(!resp.mock);
        assert!(resp.manifests.is_empty());
        assert_eq!(resp.path, "apps/web");
        assert_eq!(resp.target_revision, "v1.2.0");
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = Renderer::from_settings(&Settings::default());
        let req = RenderRequest::new("https://github.com/org/repo");
        assert_eq!(renderer.render(&req), renderer.render(&req));
    }
}
