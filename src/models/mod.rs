//! Display models for CLI output
//!
//! Shared display model abstractions for converting API response types
//! into CLI-friendly display formats.

pub mod display;

pub use display::{
    CaseFileDisplay, DeadlineDisplay, DocumentDisplay, NoteDisplay, SummaryDisplay,
};
