//! Mock APP LEGAL API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::api::{AuthApi, CaseApi, DeadlineApi, DocumentApi, NoteApi, SummaryApi};
use super::models::{
    CaseFile, Deadline, DeviceRegistration, Document, LoginRequest, LoginResponse, Note,
    RegisterRequest, Summary, UploadFile,
};
use super::params::{CaseFilterParams, NoteFilterParams};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockLegalClient::new()
///     .with_deadlines(9, vec![DeadlineBuilder::new(1).build()])
///     .await
///     .with_delay(9, Duration::from_millis(200))
///     .await;
/// ```
#[derive(Default)]
pub struct MockLegalClient {
    /// Token returned from login
    token: Arc<Mutex<Option<String>>>,
    documents: Arc<Mutex<Vec<Document>>>,
    cases: Arc<Mutex<Vec<CaseFile>>>,
    /// Deadlines keyed by case file id
    deadlines: Arc<Mutex<HashMap<i64, Vec<Deadline>>>>,
    /// Artificial latency for list_deadlines, keyed by case file id
    delays: Arc<Mutex<HashMap<i64, Duration>>>,
    notes: Arc<Mutex<Vec<Note>>>,
    summaries: Arc<Mutex<Vec<Summary>>>,
    devices: Arc<Mutex<Vec<DeviceRegistration>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub list_my_documents: usize,
    pub list_my_cases: usize,
    pub list_deadlines: usize,
    pub complete_deadline: usize,
    pub delete_deadline: usize,
    pub list_my_notes: usize,
    pub register_device: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.login
            + self.list_my_documents
            + self.list_my_cases
            + self.list_deadlines
            + self.complete_deadline
            + self.delete_deadline
            + self.list_my_notes
            + self.register_device
    }
}

impl MockLegalClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_token(self, token: &str) -> Self {
        *self.token.lock().await = Some(token.to_string());
        self
    }

    pub async fn with_documents(self, documents: Vec<Document>) -> Self {
        *self.documents.lock().await = documents;
        self
    }

    pub async fn with_cases(self, cases: Vec<CaseFile>) -> Self {
        *self.cases.lock().await = cases;
        self
    }

    /// Configure deadlines returned for one case file.
    pub async fn with_deadlines(self, case_id: i64, deadlines: Vec<Deadline>) -> Self {
        self.deadlines.lock().await.insert(case_id, deadlines);
        self
    }

    /// Delay list_deadlines responses for one case file.
    pub async fn with_delay(self, case_id: i64, delay: Duration) -> Self {
        self.delays.lock().await.insert(case_id, delay);
        self
    }

    pub async fn with_notes(self, notes: Vec<Note>) -> Self {
        *self.notes.lock().await = notes;
        self
    }

    pub async fn with_summaries(self, summaries: Vec<Summary>) -> Self {
        *self.summaries.lock().await = summaries;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        self.set_error(error).await;
        self
    }

    /// Arm a one-shot error on an already shared mock.
    pub async fn set_error(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Devices registered so far
    pub async fn registered_devices(&self) -> Vec<DeviceRegistration> {
        self.devices.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

fn not_found(what: &str, id: i64) -> ApiError {
    ApiError::Http {
        status: 404,
        message: format!("{} {} not found", what, id),
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockLegalClient {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse> {
        self.check_error().await?;
        self.call_count.lock().await.login += 1;

        let token = self
            .token
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| "mock-token".to_string());
        Ok(LoginResponse { token, user: None })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<serde_json::Value> {
        self.check_error().await?;
        Ok(serde_json::json!({ "id_cliente": request.id_cliente, "email": request.email }))
    }

    async fn logout(&self) {
        *self.token.lock().await = None;
    }
}

// ============================================================================
// DocumentApi Implementation
// ============================================================================

#[async_trait]
impl DocumentApi for MockLegalClient {
    async fn list_my_documents(&self) -> Result<Vec<Document>> {
        self.check_error().await?;
        self.call_count.lock().await.list_my_documents += 1;
        Ok(self.documents.lock().await.clone())
    }

    fn public_document_url(&self, doc_id: &str) -> String {
        format!("http://docs.test/documentos/{}", doc_id)
    }

    async fn download_document(&self, _doc_id: &str) -> Result<Vec<u8>> {
        self.check_error().await?;
        Ok(b"%PDF-1.4".to_vec())
    }

    async fn upload_document(&self, case_id: i64, file: UploadFile) -> Result<serde_json::Value> {
        self.check_error().await?;
        Ok(serde_json::json!({ "filename": file.file_name, "id_expediente": case_id }))
    }
}

// ============================================================================
// CaseApi / DeadlineApi Implementation
// ============================================================================

#[async_trait]
impl CaseApi for MockLegalClient {
    async fn list_my_cases(&self, params: &CaseFilterParams) -> Result<Vec<CaseFile>> {
        self.check_error().await?;
        self.call_count.lock().await.list_my_cases += 1;

        let cases = self.cases.lock().await;
        Ok(cases
            .iter()
            .filter(|c| params.q.as_deref().is_none_or(|q| c.matches(q)))
            .filter(|c| params.status.is_none_or(|s| c.status == s))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DeadlineApi for MockLegalClient {
    async fn list_deadlines(&self, case_id: i64) -> Result<Vec<Deadline>> {
        self.check_error().await?;
        self.call_count.lock().await.list_deadlines += 1;

        let delay = self.delays.lock().await.get(&case_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(self
            .deadlines
            .lock()
            .await
            .get(&case_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn complete_deadline(&self, deadline_id: i64) -> Result<Deadline> {
        self.check_error().await?;
        self.call_count.lock().await.complete_deadline += 1;

        let mut deadlines = self.deadlines.lock().await;
        let found = deadlines
            .values_mut()
            .flat_map(|list| list.iter_mut())
            .find(|d| d.id == deadline_id)
            .ok_or_else(|| not_found("Deadline", deadline_id))?;

        found.completed = true;
        found.completed_on = Some(chrono::Local::now().format("%Y-%m-%d").to_string());
        Ok(found.clone())
    }

    async fn delete_deadline(&self, deadline_id: i64) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.delete_deadline += 1;

        let mut deadlines = self.deadlines.lock().await;
        for list in deadlines.values_mut() {
            if let Some(pos) = list.iter().position(|d| d.id == deadline_id) {
                list.remove(pos);
                return Ok(());
            }
        }
        Err(not_found("Deadline", deadline_id).into())
    }
}

// ============================================================================
// NoteApi Implementation
// ============================================================================

#[async_trait]
impl NoteApi for MockLegalClient {
    async fn list_my_notes(&self, params: &NoteFilterParams) -> Result<Vec<Note>> {
        self.check_error().await?;
        self.call_count.lock().await.list_my_notes += 1;

        let notes = self.notes.lock().await;
        let offset = params.offset.unwrap_or(0);
        let limit = params.limit.unwrap_or(usize::MAX);
        Ok(notes.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.register_device += 1;
        self.devices.lock().await.push(registration.clone());
        Ok(())
    }
}

// ============================================================================
// SummaryApi Implementation
// ============================================================================

#[async_trait]
impl SummaryApi for MockLegalClient {
    async fn summarize(&self, file: UploadFile) -> Result<Summary> {
        self.check_error().await?;
        Ok(Summary {
            id: Some("mock-summary".to_string()),
            filename: file.file_name,
            summary: "Mock summary".to_string(),
            key_points: vec![],
            confidence_note: None,
            saved: true,
            image_path: None,
            image_url: None,
        })
    }

    async fn list_summaries(&self) -> Result<Vec<Summary>> {
        self.check_error().await?;
        Ok(self.summaries.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{CaseFileBuilder, DeadlineBuilder};

    #[tokio::test]
    async fn test_mock_one_shot_error() {
        let mock = MockLegalClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        assert!(mock.list_my_documents().await.is_err());
        assert!(mock.list_my_documents().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_deadlines_per_case() {
        let mock = MockLegalClient::new()
            .with_deadlines(1, vec![DeadlineBuilder::new(10).build()])
            .await
            .with_deadlines(2, vec![DeadlineBuilder::new(20).build()])
            .await;

        assert_eq!(mock.list_deadlines(1).await.unwrap()[0].id, 10);
        assert_eq!(mock.list_deadlines(2).await.unwrap()[0].id, 20);
        assert!(mock.list_deadlines(3).await.unwrap().is_empty());
        assert_eq!(mock.call_counts().await.list_deadlines, 3);
    }

    #[tokio::test]
    async fn test_mock_complete_and_delete() {
        let mock = MockLegalClient::new()
            .with_deadlines(1, vec![DeadlineBuilder::new(10).build()])
            .await;

        let done = mock.complete_deadline(10).await.unwrap();
        assert!(done.completed);
        assert!(done.completed_on.is_some());

        mock.delete_deadline(10).await.unwrap();
        assert!(mock.delete_deadline(10).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_case_filter() {
        let mock = MockLegalClient::new()
            .with_cases(vec![
                CaseFileBuilder::new(1).title("Divorcio").build(),
                CaseFileBuilder::new(2).title("Laboral").build(),
            ])
            .await;

        let params = CaseFilterParams {
            q: Some("labo".to_string()),
            ..Default::default()
        };
        let cases = mock.list_my_cases(&params).await.unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, 2);
    }
}
