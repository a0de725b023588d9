//! AI summary display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Summary;
use crate::output::formatters::truncate_chars;

const SUMMARY_PREVIEW_CHARS: usize = 60;

/// Summary display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SummaryDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "FILE")]
    pub filename: String,

    #[tabled(rename = "SUMMARY")]
    #[serde(skip)]
    pub preview: String,

    #[tabled(skip)]
    pub summary: String,

    #[tabled(rename = "KEY POINTS")]
    #[serde(skip)]
    pub key_point_count: usize,

    #[tabled(skip)]
    pub key_points: Vec<String>,

    #[tabled(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<Summary> for SummaryDisplay {
    fn from(s: Summary) -> Self {
        Self {
            id: s.id.unwrap_or_else(|| "-".to_string()),
            filename: s.filename,
            preview: truncate_chars(&s.summary, SUMMARY_PREVIEW_CHARS),
            summary: s.summary,
            key_point_count: s.key_points.len(),
            key_points: s.key_points,
            image_url: s.image_url,
        }
    }
}
