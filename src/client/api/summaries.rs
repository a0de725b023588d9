//! AI summary API trait

use async_trait::async_trait;

use crate::client::models::{Summary, UploadFile};
use crate::error::Result;

/// AI summarization service (separate host, no bearer auth)
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// Summarize an image of a legal document and save the result
    async fn summarize(&self, file: UploadFile) -> Result<Summary>;

    /// All saved summaries, with signed image URLs
    async fn list_summaries(&self) -> Result<Vec<Summary>>;
}
