//! Request and response bodies shared by the server and the CLI client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A free-form Kubernetes document. Not schema-validated.
pub type Manifest = Map<String, Value>;

fn default_path() -> String {
    ".".to_string()
}

fn default_revision() -> String {
    "HEAD".to_string()
}

/// Body of `POST /render`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    #[serde(rename = "repoURL")]
    pub repo_url: String,

    /// Directory within the repository.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(rename = "targetRevision", default = "default_revision")]
    pub target_revision: String,
}

impl RenderRequest {
    /// Request for `repo_url` with the default path and revision.
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            path: default_path(),
            target_revision: default_revision(),
        }
    }
}

/// Body returned by `POST /render`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResponse {
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    pub path: String,
    #[serde(rename = "targetRevision")]
    pub target_revision: String,
    pub manifests: Vec<Manifest>,
    pub mock: bool,
}

/// Body returned by `GET /whitelist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistResponse {
    pub patterns: Vec<String>,
}

/// Body returned by `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of a 403 produced by the whitelist gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenialBody {
    pub detail: String,
    pub allowed_patterns: Vec<String>,
}

/// Body of other error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_request_defaults() {
        let req: RenderRequest =
            serde_json::from_value(json!({"repoURL": "https://github.com/org/repo"})).unwrap();
        assert_eq!(req, RenderRequest::new("https://github.com/org/repo"));
        assert_eq!(req.path, ".");
        assert_eq!(req.target_revision, "HEAD");
    }

    #[test]
    fn test_render_request_requires_repo_url() {
        let err = serde_json::from_value::<RenderRequest>(json!({"path": "apps"})).unwrap_err();
        assert!(err.to_string().contains("repoURL"));
    }

    #[test]
    fn test_render_request_wire_names() {
        let value = serde_json::to_value(RenderRequest {
            repo_url: "u".into(),
            path: "p".into(),
            target_revision: "r".into(),
        })
        .unwrap();
        assert_eq!(value, json!({"repoURL": "u", "path": "p", "targetRevision": "r"}));
    }
}
