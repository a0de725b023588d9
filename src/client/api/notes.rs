//! Note and device API trait

use async_trait::async_trait;

use crate::client::models::{DeviceRegistration, Note};
use crate::client::params::NoteFilterParams;
use crate::error::Result;

/// Notes and push notification registration
#[async_trait]
pub trait NoteApi: Send + Sync {
    async fn list_my_notes(&self, params: &NoteFilterParams) -> Result<Vec<Note>>;

    /// Register a push token for this client
    async fn register_device(&self, registration: &DeviceRegistration) -> Result<()>;
}
