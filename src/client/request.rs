//! Request description: method, path segments, query and body.
//!
//! Nothing here performs I/O; `HipChatClient` turns an `ApiRequest` into an
//! actual HTTP call.

use reqwest::Method;
use serde_json::Value;

/// Base boundary for multipart/related uploads; a numeric suffix is added
/// when the payload already contains it.
pub const UPLOAD_BOUNDARY: &str = "hipchat-cli-upload-boundary";

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Upload(FileUpload),
}

/// A file shared into a room: JSON metadata followed by the raw file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub metadata: Value,
    pub file_name: String,
    pub content: Vec<u8>,
}

impl FileUpload {
    /// First of `UPLOAD_BOUNDARY`, `UPLOAD_BOUNDARY-1`, ... that occurs
    /// nowhere in the metadata, file name or file content.
    pub fn boundary(&self) -> String {
        let metadata = self.metadata.to_string();
        let mut boundary = UPLOAD_BOUNDARY.to_string();
        let mut n = 0u32;
        while contains(&self.content, boundary.as_bytes())
            || metadata.contains(&boundary)
            || self.file_name.contains(&boundary)
        {
            n += 1;
            boundary = format!("{UPLOAD_BOUNDARY}-{n}");
        }
        boundary
    }

    /// Encode as `multipart/related`. Returns the content type and body.
    pub fn encode(&self) -> (String, Vec<u8>) {
        let boundary = self.boundary();
        let mut body = Vec::with_capacity(self.content.len() + 512);
        let metadata = self.metadata.to_string();

        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n");
        body.extend_from_slice(b"Content-Disposition: attachment; name=\"metadata\"\r\n\r\n");
        body.extend_from_slice(metadata.as_bytes());
        body.extend_from_slice(b"\r\n");

        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: attachment; name=\"file\"; filename=\"{}\"\r\n\r\n",
                self.file_name.replace('"', "'")
            )
            .as_bytes(),
        );
        body.extend_from_slice(&self.content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        (format!("multipart/related; boundary={boundary}"), body)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments relative to the API endpoint, unencoded.
    pub path: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(method: Method, path: &[&str], body: RequestBody) -> Self {
        Self {
            method,
            path: path.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body,
        }
    }

    pub fn get(path: &[&str]) -> Self {
        Self::new(Method::GET, path, RequestBody::Empty)
    }

    pub fn delete(path: &[&str]) -> Self {
        Self::new(Method::DELETE, path, RequestBody::Empty)
    }

    pub fn post(path: &[&str], body: Value) -> Self {
        Self::new(Method::POST, path, RequestBody::Json(body))
    }

    pub fn put(path: &[&str], body: Value) -> Self {
        Self::new(Method::PUT, path, RequestBody::Json(body))
    }

    pub fn upload(path: &[&str], upload: FileUpload) -> Self {
        Self::new(Method::POST, path, RequestBody::Upload(upload))
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    #[cfg(test)]
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(v) => Some(v),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn upload_body(&self) -> Option<&FileUpload> {
        match &self.body {
            RequestBody::Upload(u) => Some(u),
            _ => None,
        }
    }
}
