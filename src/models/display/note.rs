//! Note display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Note;
use crate::output::formatters::{format_timestamp_local, truncate_chars};

/// Widest content cell in table output
const CONTENT_PREVIEW_CHARS: usize = 80;

/// Note display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NoteDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "CASE FILE")]
    pub case_file: String,

    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub kind: String,

    #[tabled(rename = "CONTENT")]
    #[serde(skip)]
    pub preview: String,

    /// Full text, JSON only
    #[tabled(skip)]
    pub content: String,

    #[tabled(rename = "RECORDED")]
    pub recorded_at: String,
}

impl From<Note> for NoteDisplay {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            case_file: note.case_file.label(),
            kind: note.kind.unwrap_or_else(|| "-".to_string()),
            preview: truncate_chars(&note.content, CONTENT_PREVIEW_CHARS),
            content: note.content,
            recorded_at: format_timestamp_local(&note.recorded_at),
        }
    }
}
