//! Deadline display model

use serde::Serialize;
use tabled::Tabled;

use crate::deadlines::{AnnotatedDeadline, DeadlineStatus};
use crate::output::formatters::format_date;

/// Deadline display model for table/JSON output.
///
/// Built from an [`AnnotatedDeadline`] so the status column reflects the
/// moment the list was rendered.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DeadlineDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,

    #[tabled(rename = "DUE")]
    pub due: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Negative once overdue; absent when completed
    #[tabled(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,

    #[tabled(rename = "COMPLETED ON")]
    pub completed_on: String,
}

impl From<AnnotatedDeadline> for DeadlineDisplay {
    fn from(item: AnnotatedDeadline) -> Self {
        let AnnotatedDeadline { deadline, status } = item;
        let completed_on = match status {
            // Server may omit the completion date even when completed.
            DeadlineStatus::Completed => format_date(deadline.completed_on.as_deref()),
            _ => "-".to_string(),
        };

        Self {
            id: deadline.id,
            due: deadline.due_date.to_string(),
            description: deadline.description,
            status: status.to_string(),
            days_remaining: status.days_remaining(),
            completed_on,
        }
    }
}
