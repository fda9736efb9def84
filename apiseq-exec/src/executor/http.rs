use std::time::{Duration, Instant};

use apiseq_core::types::Headers;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("http error: {0}")]
    Other(String),
}

/// A fully resolved request, as it goes on the wire and into the execution log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    /// Parsed JSON when possible, the raw text otherwise, `null` when empty.
    pub body: JsonValue,
    pub duration: Duration,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, req: HttpRequest, timeout: Duration) -> Result<HttpResponse, HttpError>;
}

pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 10 * 1024 * 1024;

pub struct ReqwestHttpClient {
    client: reqwest::Client,
    max_response_bytes: usize,
}

impl ReqwestHttpClient {
    pub fn new(max_response_bytes: usize) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("apiseq/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Other(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, max_response_bytes })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest, timeout: Duration) -> Result<HttpResponse, HttpError> {
        let method: reqwest::Method = req
            .method
            .parse()
            .map_err(|_| HttpError::InvalidRequest(format!("bad method '{}'", req.method)))?;
        let url = url::Url::parse(&req.url)
            .map_err(|e| HttpError::InvalidRequest(format!("bad url '{}': {e}", req.url)))?;

        let mut rb = self.client.request(method, url).timeout(timeout);
        let has_content_type = req
            .headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("content-type"));
        for (k, v) in &req.headers {
            rb = rb.header(k.as_str(), v.as_str());
        }

        match req.body {
            None | Some(JsonValue::Null) => {}
            Some(JsonValue::String(text)) => rb = rb.body(text),
            Some(other) => {
                let bytes = serde_json::to_vec(&other)
                    .map_err(|e| HttpError::InvalidRequest(e.to_string()))?;
                if !has_content_type {
                    rb = rb.header("content-type", "application/json");
                }
                rb = rb.body(bytes);
            }
        }

        let started = Instant::now();
        let resp = rb.send().await.map_err(|e| map_reqwest_error(e, timeout))?;
        let status = resp.status();

        let mut headers = Headers::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.to_string(), s.to_string());
            }
        }

        let bytes = resp.bytes().await.map_err(|e| map_reqwest_error(e, timeout))?;
        if bytes.len() > self.max_response_bytes {
            return Err(HttpError::ResponseTooLarge { max_bytes: self.max_response_bytes });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: decode_body(&bytes),
            duration: started.elapsed(),
        })
    }
}

pub fn decode_body(bytes: &[u8]) -> JsonValue {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return JsonValue::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn map_reqwest_error(e: reqwest::Error, timeout: Duration) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout(timeout);
    }
    if e.is_connect() || e.is_request() {
        return HttpError::Network(e.to_string());
    }
    HttpError::Other(e.to_string())
}
