//! Error types.
//!
//! `UsageError` covers everything detected before a request is sent;
//! `ApiError` covers the request itself. `main` maps them to exit codes 2 and 1.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("missing required option --{option} for --{operation}")]
    MissingOption {
        operation: &'static str,
        option: &'static str,
    },

    #[error("invalid value '{value}' for --{option}; valid choices: {choices}")]
    InvalidChoice {
        option: &'static str,
        value: String,
        choices: String,
    },

    #[error("no auth token: pass --auth-token or set HIPCHAT_TOKEN")]
    MissingToken,

    #[error("invalid endpoint '{0}': expected an http(s) URL")]
    InvalidEndpoint(String),

    #[error("config file {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("cannot read file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HipChat returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Build a `Status` error, preferring HipChat's `error.message` field
    /// over the raw body.
    pub fn from_status(status: reqwest::StatusCode, raw: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(raw)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            });
        let body = match message {
            Some(m) => m,
            None if raw.trim().is_empty() => "(empty body)".to_string(),
            None => raw.trim().chars().take(300).collect(),
        };
        ApiError::Status { status, body }
    }
}
