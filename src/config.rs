//! Connection settings.
//!
//! Each field resolves as: CLI flag > environment variable > config file >
//! default. The config file is JSON, or YAML when its extension is
//! `.yaml` / `.yml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::UsageError;

pub const TOKEN_ENV: &str = "HIPCHAT_TOKEN";
pub const ENDPOINT_ENV: &str = "HIPCHAT_ENDPOINT";
pub const DEFAULT_ENDPOINT: &str = "https://api.hipchat.com/v2/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Resolved settings for one invocation.
#[derive(Clone)]
pub struct Settings {
    pub auth_token: String,
    pub endpoint: Url,
    pub timeout: Duration,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("auth_token", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Contents of `--config PATH`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub auth_token: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Raw values taken from the command line.
#[derive(Debug, Default, Clone)]
pub struct SettingsArgs {
    pub auth_token: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub config: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, UsageError> {
        let fail = |reason: String| UsageError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        let lower = path.to_string_lossy().to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            serde_yaml::from_str(&raw).map_err(|e| fail(e.to_string()))
        } else {
            serde_json::from_str(&raw).map_err(|e| fail(e.to_string()))
        }
    }
}

/// Resolve settings from flags, the environment (through `env`) and the
/// optional config file. A missing token is a usage error.
pub fn resolve(
    args: &SettingsArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, UsageError> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let env_value = |key: &str| env(key).filter(|v| !v.trim().is_empty());
    let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

    let auth_token = non_empty(&args.auth_token)
        .or_else(|| env_value(TOKEN_ENV))
        .or_else(|| non_empty(&file.auth_token))
        .ok_or(UsageError::MissingToken)?;

    let raw_endpoint = non_empty(&args.endpoint)
        .or_else(|| env_value(ENDPOINT_ENV))
        .or_else(|| non_empty(&file.endpoint))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let endpoint = parse_endpoint(&raw_endpoint)?;

    let timeout_secs = args
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(Settings {
        auth_token: auth_token.trim().to_string(),
        endpoint,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn parse_endpoint(raw: &str) -> Result<Url, UsageError> {
    let url = Url::parse(raw.trim()).map_err(|_| UsageError::InvalidEndpoint(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(url),
        _ => Err(UsageError::InvalidEndpoint(raw.to_string())),
    }
}
