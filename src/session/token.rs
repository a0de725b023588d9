//! Token extraction and inspection helpers

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Login response fields that may carry the bearer token, in priority order.
pub const TOKEN_FIELDS: [&str; 3] = ["access_token", "token", "jwt"];

/// Pick the bearer token out of a login response body.
///
/// Empty strings and non-string values are skipped so a lower-priority field
/// can still supply the token.
pub fn resolve_token(body: &Value) -> Option<String> {
    TOKEN_FIELDS.iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Masked form safe to print or log
pub fn mask(token: &str) -> String {
    "•".repeat(token.chars().count().min(8))
}

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    general_purpose::URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| e.to_string())
}

/// Expiry of a JWT-shaped token, when it has one.
///
/// The token stays opaque to the rest of the client; this is only used to
/// report session status.
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    #[derive(Deserialize)]
    struct JwtPayload {
        exp: i64,
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload_bytes = base64_decode_url(parts[1]).ok()?;
    let payload: JwtPayload = serde_json::from_slice(&payload_bytes).ok()?;
    DateTime::from_timestamp(payload.exp, 0)
}
