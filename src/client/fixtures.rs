//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{CaseFile, CaseStatus, Deadline, Document, Note};
use crate::deadlines::DueDate;

// ============================================================================
// DeadlineBuilder
// ============================================================================

/// Builder for creating test Deadline instances.
///
/// # Example
/// ```ignore
/// let d = DeadlineBuilder::new(1).due("2025-03-01").completed(true).build();
/// ```
#[derive(Debug, Clone)]
pub struct DeadlineBuilder {
    id: i64,
    description: String,
    due: String,
    completed: bool,
    completed_on: Option<String>,
}

impl DeadlineBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            description: format!("Deadline {}", id),
            due: "2025-01-01".to_string(),
            completed: false,
            completed_on: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Due date in any accepted wire shape.
    pub fn due(mut self, due: impl Into<String>) -> Self {
        self.due = due.into();
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn completed_on(mut self, on: impl Into<String>) -> Self {
        self.completed_on = Some(on.into());
        self
    }

    /// Panics on an unparseable due date.
    pub fn build(self) -> Deadline {
        Deadline {
            id: self.id,
            description: self.description,
            due_date: DueDate::parse(&self.due).expect("fixture due date"),
            completed: self.completed,
            completed_on: self.completed_on,
            created_at: None,
            updated_at: None,
        }
    }
}

// ============================================================================
// CaseFileBuilder
// ============================================================================

#[derive(Debug, Clone)]
pub struct CaseFileBuilder {
    id: i64,
    title: String,
    status: CaseStatus,
}

impl CaseFileBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: format!("Case {}", id),
            status: CaseStatus::Open,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> CaseFile {
        CaseFile {
            id: self.id,
            title: self.title,
            description: None,
            status: self.status,
            opened_on: Some("2025-01-02".to_string()),
            closed_on: None,
            created_at: None,
            updated_at: None,
            client: None,
        }
    }
}

// ============================================================================
// Simple constructors
// ============================================================================

/// Note attached to `case_file`
pub fn note(id: i64, content: &str, case_file: CaseFile) -> Note {
    Note {
        id,
        content: content.to_string(),
        kind: None,
        case_file,
        recorded_at: "2025-01-05T14:00:00Z".to_string(),
    }
}

/// Document owned by client 1
pub fn document(doc_id: &str, filename: &str, case_file_id: i64) -> Document {
    Document {
        record_id: format!("rec-{}", doc_id),
        doc_id: doc_id.to_string(),
        filename: filename.to_string(),
        size: Some(2048),
        client_id: 1,
        case_file_id,
        created_at: "2025-01-05T14:00:00Z".to_string(),
    }
}
