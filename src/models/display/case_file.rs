//! Case file display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::CaseFile;
use crate::output::formatters::format_date;

/// Case file display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CaseFileDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "OPENED")]
    pub opened_on: String,

    #[tabled(rename = "CLOSED")]
    pub closed_on: String,
}

impl From<CaseFile> for CaseFileDisplay {
    fn from(case: CaseFile) -> Self {
        Self {
            id: case.id,
            status: case.status.to_string(),
            opened_on: format_date(case.opened_on.as_deref()),
            closed_on: format_date(case.closed_on.as_deref()),
            title: case.title,
        }
    }
}

impl From<&CaseFile> for CaseFileDisplay {
    fn from(case: &CaseFile) -> Self {
        CaseFileDisplay::from(case.clone())
    }
}
