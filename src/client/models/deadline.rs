//! Deadline (plazo) models

use serde::{Deserialize, Serialize};

use crate::deadlines::DueDate;

/// Deadline attached to a case file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deadline {
    #[serde(rename = "id_plazo")]
    pub id: i64,

    #[serde(rename = "descripcion")]
    pub description: String,

    /// Bare date or timestamp, see [`DueDate`]
    #[serde(rename = "fecha_vencimiento")]
    pub due_date: DueDate,

    #[serde(rename = "cumplido")]
    pub completed: bool,

    /// Set by the server when completed; may be null even then
    #[serde(rename = "fecha_cumplimiento", default)]
    pub completed_on: Option<String>,

    #[serde(rename = "fecha_creacion", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(
        rename = "fecha_actualizacion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}
