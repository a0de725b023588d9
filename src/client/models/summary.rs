//! AI summary models

use serde::{Deserialize, Serialize};

/// Summary produced by the AI service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Absent when the summary was not saved
    #[serde(default)]
    pub id: Option<String>,

    pub filename: String,

    pub summary: String,

    #[serde(default)]
    pub key_points: Vec<String>,

    #[serde(default)]
    pub confidence_note: Option<String>,

    #[serde(default)]
    pub saved: bool,

    #[serde(default)]
    pub image_path: Option<String>,

    /// Signed URL, valid for the requested TTL
    #[serde(default)]
    pub image_url: Option<String>,
}
