//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - login, registration, logout
//! - [`DocumentApi`] - document listing, download and upload
//! - [`CaseApi`] - case files and their deadlines
//! - [`NoteApi`] - notes and push-device registration
//! - [`SummaryApi`] - AI summarization service
//!
//! [`LegalClient`](super::LegalClient) implements all of them; the mock
//! client in tests does too.

mod auth;
mod cases;
mod documents;
mod notes;
mod summaries;

pub use auth::AuthApi;
pub use cases::{CaseApi, DeadlineApi};
pub use documents::DocumentApi;
pub use notes::NoteApi;
pub use summaries::SummaryApi;
