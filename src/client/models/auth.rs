//! Authentication models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /auth-cliente/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth-cliente/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub id_cliente: i64,
    pub email: String,
    pub telefono: String,
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token resolved from the response body
    pub token: String,

    /// User record, when the backend includes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
}
