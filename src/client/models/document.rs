//! Document models

use serde::{Deserialize, Serialize};

/// Document metadata from `GET /mis-documentos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Storage record id
    #[serde(rename = "_id", default)]
    pub record_id: String,

    /// Public id, last segment of the download URL
    pub doc_id: String,

    pub filename: String,

    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,

    #[serde(rename = "id_cliente")]
    pub client_id: i64,

    #[serde(rename = "id_expediente")]
    pub case_file_id: i64,

    /// ISO timestamp
    pub created_at: String,
}
