//! Case file (expediente) models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a case file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    #[serde(rename = "ABIERTO")]
    Open,
    #[serde(rename = "EN_PROCESO")]
    InProcess,
    #[serde(rename = "CERRADO")]
    Closed,
}

impl CaseStatus {
    /// Value used by the backend in bodies and query strings
    pub fn as_wire(&self) -> &'static str {
        match self {
            CaseStatus::Open => "ABIERTO",
            CaseStatus::InProcess => "EN_PROCESO",
            CaseStatus::Closed => "CERRADO",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CaseStatus::Open => "Open",
            CaseStatus::InProcess => "In process",
            CaseStatus::Closed => "Closed",
        };
        f.write_str(label)
    }
}

/// Client owning a case file, embedded in note responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummary {
    #[serde(rename = "id_cliente")]
    pub id: i64,

    #[serde(rename = "nombre_completo")]
    pub full_name: String,

    #[serde(rename = "contacto_email", default)]
    pub email: Option<String>,

    #[serde(rename = "contacto_tel", default)]
    pub phone: Option<String>,
}

/// Case file summary used to scope deadline queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    #[serde(rename = "id_expediente")]
    pub id: i64,

    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "estado")]
    pub status: CaseStatus,

    /// `YYYY-MM-DD`
    #[serde(rename = "fecha_inicio", default)]
    pub opened_on: Option<String>,

    /// `YYYY-MM-DD`
    #[serde(rename = "fecha_cierre", default)]
    pub closed_on: Option<String>,

    #[serde(rename = "fecha_creacion", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(
        rename = "fecha_actualizacion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,

    #[serde(rename = "cliente", default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientSummary>,
}

impl CaseFile {
    /// Case-insensitive match of `query` against "<id> <title>".
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        format!("{} {}", self.id, self.title)
            .to_lowercase()
            .contains(&q)
    }

    /// `#12 — Divorcio López`
    pub fn label(&self) -> String {
        format!("#{} — {}", self.id, self.title)
    }
}
