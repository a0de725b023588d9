//! Document display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Document;
use crate::output::formatters::{format_bytes, format_timestamp_local};

/// Document display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DocumentDisplay {
    #[tabled(rename = "DOC ID")]
    pub doc_id: String,

    #[tabled(rename = "FILENAME")]
    pub filename: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "CASE")]
    pub case_file_id: i64,

    #[tabled(rename = "UPLOADED")]
    pub uploaded: String,
}

impl From<Document> for DocumentDisplay {
    fn from(doc: Document) -> Self {
        Self {
            size: format_bytes(doc.size),
            uploaded: format_timestamp_local(&doc.created_at),
            doc_id: doc.doc_id,
            filename: doc.filename,
            case_file_id: doc.case_file_id,
        }
    }
}
