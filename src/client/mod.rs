//! APP LEGAL API client

pub mod api;
#[cfg(test)]
pub mod fixtures;
pub mod legal;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod params;
pub mod request;

pub use api::{AuthApi, CaseApi, DeadlineApi, DocumentApi, NoteApi, SummaryApi};
pub use legal::LegalClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockLegalClient;
pub use params::{CaseFilterParams, NoteFilterParams};
