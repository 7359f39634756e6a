//! Configuration loading from the environment and an optional TOML file.
//!
//! Precedence, lowest first: built-in defaults, the TOML file named by
//! `ARGOCD_RENDERER_CONFIG`, then individual `ARGOCD_RENDERER_*` variables.
//! Variable names are matched case-insensitively.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{Settings, ENV_PREFIX};
use crate::config::validation::{validate_config, ValidationError};

/// Names the optional TOML file loaded before environment overrides.
pub const CONFIG_FILE_VAR: &str = "ARGOCD_RENDERER_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidVar {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load settings from the process environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let vars = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
    load_from_vars(vars)
}

/// Load settings from an explicit set of variables.
///
/// Separated from [`load_settings`] so callers and tests never have to
/// mutate the process environment.
pub fn load_from_vars<I, K, V>(vars: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into().to_ascii_uppercase(), v.into()))
        .filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .collect();

    let mut settings = match vars.get(CONFIG_FILE_VAR) {
        Some(path) if !path.trim().is_empty() => load_file(Path::new(path.trim()))?,
        _ => Settings::default(),
    };

    apply_env(&mut settings, &vars)?;
    validate_config(&settings).map_err(ConfigError::Validation)?;

    Ok(settings)
}

/// Parse a TOML configuration file. Missing keys keep their defaults.
pub fn load_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

fn apply_env(settings: &mut Settings, vars: &HashMap<String, String>) -> Result<(), ConfigError> {
    let get = |key: &str| {
        let name = format!("{}{}", ENV_PREFIX, key);
        vars.get(&name).map(|value| (name, value.as_str()))
    };

    if let Some((name, raw)) = get("WHITELIST_PATTERNS") {
        settings.whitelist_patterns = parse_patterns(&name, raw)?;
    }
    if let Some((name, raw)) = get("MOCK_MODE") {
        settings.mock_mode = parse_bool(&name, raw)?;
    }
    if let Some((_, raw)) = get("UPSTREAM_URL") {
        settings.upstream_url = raw.trim().to_string();
    }
    if let Some((_, raw)) = get("BIND_ADDRESS") {
        settings.bind_address = raw.trim().to_string();
    }
    if let Some((name, raw)) = get("REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_number(&name, raw)?;
    }
    if let Some((name, raw)) = get("MAX_BODY_BYTES") {
        settings.max_body_bytes = parse_number(&name, raw)?;
    }

    Ok(())
}

/// Accepts a JSON array of strings or a comma-separated list.
fn parse_patterns(name: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(trimmed)
            .map_err(|e| invalid(name, raw, e.to_string()));
    }

    Ok(trimmed
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect())
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "t" | "y" => Ok(true),
        "0" | "false" | "no" | "off" | "f" | "n" => Ok(false),
        _ => Err(invalid(name, raw, "expected a boolean".to_string())),
    }
}

fn parse_number<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(name, raw, e.to_string()))
}

fn invalid(name: &str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidVar {
        name: name.to_string(),
        value: value.to_string(),
        reason,
    }
}
