//! Note (nota) models

use serde::{Deserialize, Serialize};

use super::CaseFile;

/// Free-text note attached to a case file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "id_nota")]
    pub id: i64,

    #[serde(rename = "contenido")]
    pub content: String,

    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,

    #[serde(rename = "expediente")]
    pub case_file: CaseFile,

    /// ISO timestamp
    #[serde(rename = "fecha_registro")]
    pub recorded_at: String,
}
