//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod case_file;
mod deadline;
mod document;
mod note;
mod summary;

pub use case_file::CaseFileDisplay;
pub use deadline::DeadlineDisplay;
pub use document::DocumentDisplay;
pub use note::NoteDisplay;
pub use summary::SummaryDisplay;
