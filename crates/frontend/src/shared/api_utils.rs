//! API utilities for frontend-backend communication
//!
//! Provides the API base URL, the error type of every request and thin JSON
//! helpers over `gloo_net`.

use crate::shared::config::config;
use contracts::domain::common::ApiErrorBody;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Failure of a REST call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Not found")]
    NotFound,
    #[error("Failed to encode request: {0}")]
    Encode(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from a non-2xx response body.
    ///
    /// A JSON body with `message`/`error` wins, otherwise a generic text.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 404 {
            return ApiError::NotFound;
        }
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.text().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::Http { status, message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Get the base URL for API requests
///
/// A base URL stored in `localStorage` under the configured key wins.
/// Otherwise the URL is built from the current window location and the
/// configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };

    let cfg = &config().api;
    if let Some(custom) = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|s| s.get_item(&cfg.base_url_storage_key).ok().flatten())
        .filter(|v| !v.trim().is_empty())
    {
        return custom.trim_end_matches('/').to_string();
    }

    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, cfg.port)
}

/// Join a base URL and an API path
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    let builder = match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    };
    builder
        .header("Accept", "application/json")
        .header("Cache-Control", "no-cache")
}

async fn send(
    method: HttpMethod,
    url: &str,
    body: Option<String>,
) -> Result<Response, ApiError> {
    let builder = builder(method, url);
    let result = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await,
        None => builder.send().await,
    };

    let response = result.map_err(|e| {
        log::warn!("{:?} {} failed: {}", method, url, e);
        ApiError::Network(e.to_string())
    })?;

    if response.ok() {
        Ok(response)
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &text);
        if err != ApiError::NotFound {
            log::warn!("{:?} {} -> {}: {}", method, url, status, err);
        }
        Err(err)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET and decode JSON
pub async fn get_json<R: DeserializeOwned>(url: &str) -> Result<R, ApiError> {
    let response = send(HttpMethod::Get, url, None).await?;
    decode(response).await
}

/// GET where 404 means "no data"
pub async fn get_optional<R: DeserializeOwned>(url: &str) -> Result<Option<R>, ApiError> {
    match get_json(url).await {
        Ok(v) => Ok(Some(v)),
        Err(ApiError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Send a JSON body (or none) and decode the JSON response
pub async fn send_json<B: Serialize, R: DeserializeOwned>(
    method: HttpMethod,
    url: &str,
    body: Option<&B>,
) -> Result<R, ApiError> {
    let body = body.map(encode).transpose()?;
    let response = send(method, url, body).await?;
    decode(response).await
}

/// Send a JSON body and ignore the response payload
pub async fn send_json_discard<B: Serialize>(
    method: HttpMethod,
    url: &str,
    body: &B,
) -> Result<(), ApiError> {
    let body = encode(body)?;
    send(method, url, Some(body)).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_prefers_server_message() {
        assert_eq!(
            ApiError::from_response(400, r#"{"message": "quantity must be positive"}"#),
            ApiError::Http {
                status: 400,
                message: "quantity must be positive".to_string()
            }
        );
        assert_eq!(
            ApiError::from_response(500, r#"{"error": "db locked"}"#).to_string(),
            "db locked"
        );
    }

    #[test]
    fn test_error_generic_fallback() {
        assert_eq!(
            ApiError::from_response(502, "<html>Bad gateway</html>").to_string(),
            "HTTP 502"
        );
        assert_eq!(ApiError::from_response(404, ""), ApiError::NotFound);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3000/", "/sales_records/latest"),
            "http://localhost:3000/sales_records/latest"
        );
    }
}
