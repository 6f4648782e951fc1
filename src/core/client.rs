//! Tavus REST API client.
//!
//! A single pre-configured `reqwest` client bound to one base URL, one
//! `x-api-key` header and one request timeout. Every tool handler shares the
//! same instance. There is no retry policy: a failed request fails the tool
//! call immediately.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::config::TavusConfig;

/// Header carrying the Tavus API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Errors produced by [`TavusClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request never produced a response (connect failure, timeout...).
    #[error("{0}")]
    Transport(String),

    /// The API answered successfully but the body was not valid JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The configured base URL or a path segment could not form a URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Client for the Tavus REST API.
#[derive(Debug, Clone)]
pub struct TavusClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TavusClient {
    /// Build a client from the Tavus settings.
    pub fn new(config: &TavusConfig) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ApiError::Transport("API key is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// Resolve path segments against the base URL.
    ///
    /// Each segment is percent-encoded on its own, so an identifier can never
    /// introduce extra path components.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` a resource or collection.
    pub async fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.endpoint(segments)?;
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(Method::GET, request).await
    }

    /// `POST` a JSON body.
    pub async fn post(&self, segments: &[&str], body: &Value) -> Result<Value, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(Method::POST, self.http.post(url).json(body)).await
    }

    /// `POST` without a body (action sub-paths such as `/end`).
    pub async fn post_empty(&self, segments: &[&str]) -> Result<Value, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(Method::POST, self.http.post(url)).await
    }

    /// `PATCH` a JSON body.
    pub async fn patch(&self, segments: &[&str], body: &Value) -> Result<Value, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(Method::PATCH, self.http.patch(url).json(body)).await
    }

    /// `DELETE` a resource. The response body is discarded.
    pub async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        let url = self.endpoint(segments)?;
        self.send(Method::DELETE, self.http.delete(url)).await?;
        Ok(())
    }

    #[instrument(skip(self, method, request), fields(method = %method))]
    async fn send(&self, method: Method, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response was received: {}", e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!("{} {} -> {}", method, response.url().path(), status);

        // Captured before the body is consumed; used when the API gives no message.
        let status_error = response.error_for_status_ref().err().map(|e| e.to_string());

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if let Some(raw) = status_error {
            let message = upstream_message(&body).unwrap_or(raw);
            warn!("Tavus API returned {}: {}", status, message);
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&body)
    }
}

/// Extract the error message from an upstream error body, if it carries one.
///
/// Tavus reports errors as `{"message": ...}` or `{"error": ...}`.
pub fn upstream_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Decode a success body. An empty body decodes to `null`.
fn decode_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
