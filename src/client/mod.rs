//! HipChat v2 REST client.
//!
//! HipChatClient::new(&Settings) -> client bound to one endpoint + token
//!   url_for(&ApiRequest)  -> absolute URL (segments percent-encoded)
//!   execute(&ApiRequest)  -> decoded JSON body (`null` for empty bodies)
//!   exists(&ApiRequest)   -> false on 404, true on 2xx
//!
//! One request per call. No retries, no pagination.

pub mod request;

pub use request::{ApiRequest, FileUpload, RequestBody};

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::Settings;
use crate::error::ApiError;

const USER_AGENT: &str = concat!("hipchat-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HipChatClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl HipChatClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            token: settings.auth_token.clone(),
        })
    }

    /// Absolute URL for `req`: endpoint path, then the request's segments,
    /// then its query pairs.
    pub fn url_for(&self, req: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty();
            segments.extend(req.path.iter());
        }
        if !req.query.is_empty() {
            url.query_pairs_mut().extend_pairs(req.query.iter());
        }
        Ok(url)
    }

    async fn send(&self, req: &ApiRequest) -> Result<reqwest::Response, ApiError> {
        let url = self.url_for(req)?;
        debug!(method = %req.method, url = %url, "sending request");

        let builder = self
            .http
            .request(req.method.clone(), url)
            .bearer_auth(&self.token);
        let builder = match &req.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Upload(upload) => {
                let (content_type, bytes) = upload.encode();
                builder.header(CONTENT_TYPE, content_type).body(bytes)
            }
        };

        let resp = builder.send().await?;
        info!(status = resp.status().as_u16(), "response received");
        Ok(resp)
    }

    /// Perform `req` and decode the JSON response body.
    pub async fn execute(&self, req: &ApiRequest) -> Result<Value, ApiError> {
        let resp = self.send(req).await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Perform `req` only to learn whether the resource exists.
    pub async fn exists(&self, req: &ApiRequest) -> Result<bool, ApiError> {
        let resp = self.send(req).await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if status.is_success() {
            return Ok(true);
        }
        let text = resp.text().await?;
        Err(ApiError::from_status(status, &text))
    }
}
