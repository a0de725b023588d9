//! Case file and deadline API traits

use async_trait::async_trait;

use crate::client::models::{CaseFile, Deadline};
use crate::client::params::CaseFilterParams;
use crate::error::Result;

/// Case file listing
#[async_trait]
pub trait CaseApi: Send + Sync {
    /// Case files of the signed-in client
    async fn list_my_cases(&self, params: &CaseFilterParams) -> Result<Vec<CaseFile>>;
}

/// Deadline operations, consumed by the deadline engine
#[async_trait]
pub trait DeadlineApi: Send + Sync {
    /// Deadlines of one case file, in server order
    async fn list_deadlines(&self, case_id: i64) -> Result<Vec<Deadline>>;

    /// Mark a deadline complete; returns the server's updated record
    async fn complete_deadline(&self, deadline_id: i64) -> Result<Deadline>;

    async fn delete_deadline(&self, deadline_id: i64) -> Result<()>;
}
