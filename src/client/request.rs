//! Request helpers shared by every endpoint
//!
//! One place decides what a response means: timeouts and connection failures
//! become network errors naming the host, 401 becomes the
//! [`UNAUTHORIZED_SENTINEL`](crate::error::UNAUTHORIZED_SENTINEL) error, and
//! any other non-2xx carries the server's `message`.

use std::time::{Duration, Instant};

use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Longest raw body quoted in an error message
const MAX_ERROR_BODY: usize = 300;

/// Status and fully-read body of a response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Send `request` and read its body, giving up after `timeout`.
///
/// The bound covers the whole exchange, headers and body. Dropping the
/// returned future aborts the request.
pub async fn send_with_timeout(
    http: &HttpClient,
    request: RequestBuilder,
    host: &str,
    timeout: Duration,
) -> Result<RawResponse, ApiError> {
    let request = request.build().map_err(|e| ApiError::network(host, e))?;
    let method = request.method().clone();
    let url = request.url().clone();
    let started = Instant::now();

    let exchange = async {
        let response = http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok::<_, reqwest::Error>(RawResponse {
            status,
            body: body.to_vec(),
        })
    };

    match tokio::time::timeout(timeout, exchange).await {
        Err(_) => {
            debug!("{} {} timed out after {:?}", method, url, timeout);
            Err(ApiError::Timeout {
                host: host.to_string(),
                after: timeout,
            })
        }
        Ok(Err(e)) if e.is_timeout() => Err(ApiError::Timeout {
            host: host.to_string(),
            after: timeout,
        }),
        Ok(Err(e)) => {
            debug!("{} {} failed: {}", method, url, e);
            Err(ApiError::network(host, e))
        }
        Ok(Ok(raw)) => {
            debug!(
                "{} {} -> {} in {:?}",
                method,
                url,
                raw.status,
                started.elapsed()
            );
            Ok(raw)
        }
    }
}

/// Turn a non-success response into the matching error.
pub fn classify(raw: RawResponse) -> Result<RawResponse, ApiError> {
    if raw.status == StatusCode::UNAUTHORIZED {
        debug!("401 - token invalid or expired");
        return Err(ApiError::Unauthorized);
    }
    if !raw.status.is_success() {
        let body = raw.text();
        debug!("Error body: {}", body);
        return Err(ApiError::Http {
            status: raw.status.as_u16(),
            message: error_message(raw.status, &body),
        });
    }
    Ok(raw)
}

/// The `message` of a JSON error body. A list of messages (validation errors)
/// is joined with `", "`.
pub fn extract_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("message")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

/// Best-effort human message for a failed response.
///
/// JSON bodies without a usable `message` give `HTTP <status>`; bodies that are
/// not JSON at all are quoted raw, truncated.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = extract_message(body) {
        return message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || serde_json::from_str::<Value>(trimmed).is_ok() {
        return format!("HTTP {}", status.as_u16());
    }
    format!("HTTP {}: {}", status.as_u16(), truncate(trimmed, MAX_ERROR_BODY))
}

/// Deserialize a successful body. Malformed JSON keeps the raw text.
pub fn parse_json<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&raw.body).map_err(|e| {
        debug!("Failed to parse response: {}", e);
        ApiError::InvalidResponse {
            status: raw.status.as_u16(),
            body: truncate(&raw.text(), MAX_ERROR_BODY),
        }
    })
}

/// First `max` characters of `s`
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
