//! Document API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::{Document, UploadFile};
use crate::error::Result;

/// Document service operations
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Documents of the signed-in client
    async fn list_my_documents(&self) -> Result<Vec<Document>>;

    /// Public, unauthenticated URL of a document
    fn public_document_url(&self, doc_id: &str) -> String;

    /// Fetch document bytes through the public URL
    async fn download_document(&self, doc_id: &str) -> Result<Vec<u8>>;

    /// Upload a PDF into a case file
    async fn upload_document(&self, case_id: i64, file: UploadFile) -> Result<Value>;
}
