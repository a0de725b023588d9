//! APP LEGAL API data models
//!
//! Wire names follow the backend (Spanish snake_case); Rust field names are
//! English. Models are organized by resource type.

mod auth;
mod case_file;
mod deadline;
mod device;
mod document;
mod note;
mod summary;
mod upload;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use case_file::{CaseFile, CaseStatus};
pub use deadline::Deadline;
pub use device::{DevicePlatform, DeviceRegistration};
pub use document::Document;
pub use note::Note;
pub use summary::Summary;
pub use upload::UploadFile;
