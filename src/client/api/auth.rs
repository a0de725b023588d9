//! Authentication API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::Result;

/// Authentication operations
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token and store it in the session.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// Create client credentials. Returns the backend's response body.
    async fn register(&self, request: &RegisterRequest) -> Result<Value>;

    /// Drop the stored session token.
    async fn logout(&self);
}
