//! Filter argument types for CLI commands

use clap::Args;

use super::{CaseStatusArg, PaginationArgs};
use crate::client::{CaseFilterParams, NoteFilterParams};

/// Filter arguments for `cases list`.
#[derive(Args, Debug, Default, Clone)]
pub struct CaseFilterArgs {
    /// Search by case number or title
    #[arg(long, short = 'q')]
    pub q: Option<String>,

    /// Filter by status
    #[arg(long, value_enum)]
    pub status: Option<CaseStatusArg>,
}

impl CaseFilterArgs {
    pub fn to_params(&self, pagination: &PaginationArgs) -> CaseFilterParams {
        CaseFilterParams {
            q: self.q.clone(),
            status: self.status.map(Into::into),
            limit: pagination.limit,
            offset: pagination.offset,
        }
    }
}

/// Filter arguments for `notes list`.
#[derive(Args, Debug, Default, Clone)]
pub struct NoteFilterArgs {
    /// Filter by note type
    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,

    /// Free-text search
    #[arg(long, short = 'q')]
    pub q: Option<String>,
}

impl NoteFilterArgs {
    pub fn to_params(&self, pagination: &PaginationArgs) -> NoteFilterParams {
        NoteFilterParams {
            limit: pagination.limit,
            offset: pagination.offset,
            kind: self.kind.clone(),
            q: self.q.clone(),
        }
    }
}
