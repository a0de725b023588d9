//! APP LEGAL API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{AuthApi, CaseApi, DeadlineApi, DocumentApi, NoteApi, SummaryApi};
use super::models::{
    CaseFile, Deadline, DeviceRegistration, Document, LoginRequest, LoginResponse, Note,
    RegisterRequest, Summary, UploadFile,
};
use super::params::{CaseFilterParams, NoteFilterParams};
use super::request::{self, RawResponse};
use crate::config::Config;
use crate::error::{ApiError, Error, Result};
use crate::session::{SessionStore, mask, resolve_token};

const JSON: &str = "application/json";

/// Query string for the summaries listing: signed image URLs valid 15 minutes
const SUMMARIES_QUERY: [(&str, &str); 2] = [("sign_urls", "true"), ("url_ttl", "900")];

/// APP LEGAL API client
///
/// Talks to three hosts: the main backend, the document service and the AI
/// summarization service. Bearer tokens come from the shared [`SessionStore`].
pub struct LegalClient {
    http: HttpClient,
    api_url: String,
    docs_url: String,
    ai_url: String,
    timeout: Duration,
    session: Arc<SessionStore>,
}

impl LegalClient {
    /// Create a client from configuration
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("applegal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::network(&config.api_url, e))?;

        Ok(Self {
            http,
            api_url: trim_base(&config.api_url),
            docs_url: trim_base(&config.docs_url),
            ai_url: trim_base(&config.ai_url),
            timeout: Duration::from_millis(config.timeout_ms),
            session,
        })
    }

    async fn execute(&self, request: RequestBuilder, host: &str) -> Result<RawResponse> {
        Ok(request::send_with_timeout(&self.http, request, host, self.timeout).await?)
    }

    /// Current bearer token, or `MissingToken`
    async fn bearer(&self) -> Result<String> {
        self.session
            .read()
            .await
            .ok_or_else(|| ApiError::MissingToken.into())
    }

    /// Build an authenticated JSON request against `host`
    async fn authed(&self, method: Method, host: &str, path: &str) -> Result<RequestBuilder> {
        let token = self.bearer().await?;
        Ok(self
            .http
            .request(method, format!("{}{}", host, path))
            .header(ACCEPT, JSON)
            .bearer_auth(token))
    }

    /// Authenticated request whose success body is JSON
    async fn authed_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let request = self.authed(method, &self.api_url, path).await?.query(query);
        let raw = request::classify(self.execute(request, &self.api_url).await?)?;
        Ok(request::parse_json(&raw)?)
    }

    /// Unauthenticated auth-endpoint POST. Failures, 401 included, are
    /// reported as `<prefix>: <message>` since no session exists yet.
    async fn auth_post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        prefix: &str,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.api_url, path);
        let request = self.http.post(&url).header(ACCEPT, JSON).json(body);
        let raw = self.execute(request, &self.api_url).await?;

        if !raw.status.is_success() {
            let body = raw.text();
            debug!("{} body: {}", path, body);
            return Err(ApiError::Http {
                status: raw.status.as_u16(),
                message: format!("{}: {}", prefix, request::error_message(raw.status, &body)),
            }
            .into());
        }
        Ok(raw)
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn file_part(file: UploadFile) -> Result<Part> {
    Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.mime)
        .map_err(|e| Error::Other(format!("Invalid mime type: {}", e)))
}

#[async_trait]
impl AuthApi for LegalClient {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse> {
        info!(
            "Logging in to {} as {} (password {})",
            self.api_url,
            req.email,
            mask(&req.password)
        );

        let raw = self
            .auth_post("/auth-cliente/login", req, "Login failed")
            .await?;

        // A non-JSON success body is treated as empty: no token.
        let body: Value = serde_json::from_slice(&raw.body).unwrap_or(Value::Null);
        let token = resolve_token(&body).ok_or_else(|| {
            Error::Other(
                "Login succeeded but the response carried no token \
                 (expected access_token, token or jwt)"
                    .to_string(),
            )
        })?;

        self.session.save(&token).await;

        Ok(LoginResponse {
            token,
            user: body.get("user").cloned(),
        })
    }

    async fn register(&self, req: &RegisterRequest) -> Result<Value> {
        info!(
            "Registering client {} <{}> at {}",
            req.id_cliente, req.email, self.api_url
        );

        let raw = self
            .auth_post("/auth-cliente/register", req, "Registration failed")
            .await?;

        Ok(serde_json::from_slice(&raw.body).unwrap_or_else(|_| Value::String(raw.text())))
    }

    async fn logout(&self) {
        self.session.clear().await;
    }
}

#[async_trait]
impl DocumentApi for LegalClient {
    async fn list_my_documents(&self) -> Result<Vec<Document>> {
        let request = self.authed(Method::GET, &self.docs_url, "/mis-documentos").await?;
        let raw = request::classify(self.execute(request, &self.docs_url).await?)?;

        // The service answers `null` when the client has no documents.
        let docs: Option<Vec<Document>> = request::parse_json(&raw)?;
        Ok(docs.unwrap_or_default())
    }

    fn public_document_url(&self, doc_id: &str) -> String {
        match Url::parse(&self.docs_url) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push("documentos").push(doc_id);
                }
                url.to_string()
            }
            Err(_) => format!("{}/documentos/{}", self.docs_url, doc_id),
        }
    }

    async fn download_document(&self, doc_id: &str) -> Result<Vec<u8>> {
        let url = self.public_document_url(doc_id);
        let raw = self.execute(self.http.get(&url), &self.docs_url).await?;

        if !raw.status.is_success() {
            return Err(ApiError::Http {
                status: raw.status.as_u16(),
                message: format!(
                    "Download failed: {}",
                    request::error_message(raw.status, &raw.text())
                ),
            }
            .into());
        }
        Ok(raw.body)
    }

    async fn upload_document(&self, case_id: i64, file: UploadFile) -> Result<Value> {
        let form = Form::new()
            .part("file", file_part(file)?)
            .text("id_expediente", case_id.to_string());

        let request = self
            .authed(Method::POST, &self.docs_url, "/documentos")
            .await?
            .multipart(form);
        let raw = request::classify(self.execute(request, &self.docs_url).await?)?;

        Ok(serde_json::from_slice(&raw.body).unwrap_or(Value::Null))
    }
}

#[async_trait]
impl CaseApi for LegalClient {
    async fn list_my_cases(&self, params: &CaseFilterParams) -> Result<Vec<CaseFile>> {
        self.authed_json(Method::GET, "/expedientes/mis", &params.to_query())
            .await
    }
}

#[async_trait]
impl DeadlineApi for LegalClient {
    async fn list_deadlines(&self, case_id: i64) -> Result<Vec<Deadline>> {
        let path = format!("/expedientes/{}/plazos", case_id);
        self.authed_json(Method::GET, &path, &[]).await
    }

    async fn complete_deadline(&self, deadline_id: i64) -> Result<Deadline> {
        let path = format!("/plazos/{}/cumplir", deadline_id);
        self.authed_json(Method::PATCH, &path, &[]).await
    }

    async fn delete_deadline(&self, deadline_id: i64) -> Result<()> {
        let path = format!("/plazos/{}", deadline_id);
        let request = self.authed(Method::DELETE, &self.api_url, &path).await?;
        request::classify(self.execute(request, &self.api_url).await?)?;
        Ok(())
    }
}

#[async_trait]
impl NoteApi for LegalClient {
    async fn list_my_notes(&self, params: &NoteFilterParams) -> Result<Vec<Note>> {
        self.authed_json(Method::GET, "/notas/mis", &params.to_query())
            .await
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> Result<()> {
        let request = self
            .authed(Method::POST, &self.api_url, "/notificaciones/device")
            .await?
            .json(registration);
        request::classify(self.execute(request, &self.api_url).await?)?;
        Ok(())
    }
}

#[async_trait]
impl SummaryApi for LegalClient {
    async fn summarize(&self, file: UploadFile) -> Result<Summary> {
        let url = format!("{}/legal/summarize", self.ai_url);
        let form = Form::new().part("file", file_part(file)?);
        let request = self
            .http
            .post(&url)
            .query(&[("save", "true")])
            .header(ACCEPT, JSON)
            .multipart(form);

        let raw = self.execute(request, &self.ai_url).await?;
        if !raw.status.is_success() {
            return Err(ApiError::Http {
                status: raw.status.as_u16(),
                message: format!(
                    "HTTP {}: {}",
                    raw.status.as_u16(),
                    request::truncate(&raw.text(), 300)
                ),
            }
            .into());
        }
        Ok(request::parse_json(&raw)?)
    }

    async fn list_summaries(&self) -> Result<Vec<Summary>> {
        let url = format!("{}/legal/summaries/all", self.ai_url);
        let request = self
            .http
            .get(&url)
            .query(&SUMMARIES_QUERY)
            .header(ACCEPT, JSON);

        let raw = self.execute(request, &self.ai_url).await?;
        if !raw.status.is_success() {
            return Err(ApiError::Http {
                status: raw.status.as_u16(),
                message: format!("HTTP {}", raw.status.as_u16()),
            }
            .into());
        }
        Ok(request::parse_json(&raw)?)
    }
}
