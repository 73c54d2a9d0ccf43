//! HTTP client for the chatbot backend.
//!
//! [`HttpBackend`] implements [`AnswerService`] and [`DocumentService`]
//! against the gateway that fronts the retrieval system.
//!
//! # Endpoints
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `GET`  | `/api/` | none | `{ "message": "..." }` |
//! | `POST` | `/api/answer` | `{ "question": "..." }` | `{ "mode": "...", "answer": "..." }` |
//! | `POST` | `/api/reset` | none | `{ "message": "..." }` (optional) |
//! | `POST` | `/api/document` | multipart field `file` | `{ "message": "..." }` (optional) |
//!
//! Any non-2xx status becomes [`ServiceError::Status`]. An answer body
//! that does not decode becomes [`ServiceError::Decode`]; message bodies
//! are lenient and decode to an empty [`MessageResponse`] instead.
//!
//! No retries are performed. A request timeout applies only when
//! `backend.timeout_secs` is set.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use std::time::Duration;
use tracing::debug;

use crate::config::BackendConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{AnswerRequest, AnswerResponse, MessageResponse};
use crate::service::{AnswerService, DocumentService};

/// Content type the Document Service accepts.
pub const MIME_PDF: &str = "application/pdf";

/// reqwest-backed client for the `/api/*` routes.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client from the `[backend]` config section.
    pub fn from_config(config: &BackendConfig) -> ServiceResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url(),
        })
    }

    /// Build a client for an explicit base URL such as `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/`: the backend's greeting, used as a reachability check.
    pub async fn greeting(&self) -> ServiceResult<MessageResponse> {
        let resp = self.client.get(self.url("/api/")).send().await?;
        read_message(resp).await
    }
}

#[async_trait]
impl AnswerService for HttpBackend {
    async fn answer(&self, question: &str) -> ServiceResult<AnswerResponse> {
        debug!(url = %self.url("/api/answer"), "sending question");
        let resp = self
            .client
            .post(self.url("/api/answer"))
            .json(&AnswerRequest { question })
            .send()
            .await?;
        let body = read_success_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn reset(&self) -> ServiceResult<MessageResponse> {
        debug!(url = %self.url("/api/reset"), "sending reset");
        let resp = self.client.post(self.url("/api/reset")).send().await?;
        read_message(resp).await
    }
}

#[async_trait]
impl DocumentService for HttpBackend {
    async fn upload_pdf(&self, file_name: &str, bytes: Vec<u8>) -> ServiceResult<MessageResponse> {
        debug!(file = file_name, size = bytes.len(), "uploading document");
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(MIME_PDF)?;
        let form = Form::new().part("file", part);
        let resp = self
            .client
            .post(self.url("/api/document"))
            .multipart(form)
            .send()
            .await?;
        read_message(resp).await
    }
}

/// Read the body, failing on non-2xx statuses.
async fn read_success_body(resp: Response) -> ServiceResult<String> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ServiceError::Status { status, body });
    }
    Ok(body)
}

async fn read_message(resp: Response) -> ServiceResult<MessageResponse> {
    let body = read_success_body(resp).await?;
    Ok(parse_message(&body))
}

fn parse_message(body: &str) -> MessageResponse {
    if body.trim().is_empty() {
        return MessageResponse::default();
    }
    match serde_json::from_str(body) {
        Ok(msg) => msg,
        Err(e) => {
            debug!(error = %e, "message body is not JSON, using default text");
            MessageResponse::default()
        }
    }
}
