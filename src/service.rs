//! Remote collaborator traits.
//!
//! The chat session and the upload flow talk to the backend only through
//! these traits. [`HttpBackend`](crate::backend::HttpBackend) implements
//! both over HTTP; tests and embedders can plug in their own.
//!
//! ```text
//! ┌─────────────┐   AnswerService    ┌──────────────────┐
//! │ ChatSession │──────────────────▶│                  │
//! └─────────────┘                    │   HttpBackend    │──▶ http://host:8080/api/*
//! ┌─────────────┐  DocumentService   │                  │
//! │ upload flow │──────────────────▶│                  │
//! └─────────────┘                    └──────────────────┘
//! ```

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{AnswerResponse, MessageResponse};

/// Answers questions and clears server-side conversation state.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use context_chatbot::error::ServiceResult;
/// use context_chatbot::models::{AnswerResponse, MessageResponse};
/// use context_chatbot::service::AnswerService;
///
/// struct Echo;
///
/// #[async_trait]
/// impl AnswerService for Echo {
///     async fn answer(&self, question: &str) -> ServiceResult<AnswerResponse> {
///         Ok(AnswerResponse { mode: "echo".into(), answer: question.into() })
///     }
///
///     async fn reset(&self) -> ServiceResult<MessageResponse> {
///         Ok(MessageResponse::default())
///     }
/// }
/// ```
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// `POST /api/answer` with a non-empty, trimmed question.
    async fn answer(&self, question: &str) -> ServiceResult<AnswerResponse>;

    /// `POST /api/reset`.
    async fn reset(&self) -> ServiceResult<MessageResponse>;
}

/// Ingests uploaded PDF documents.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// `POST /api/document` with a single multipart field `file`.
    async fn upload_pdf(&self, file_name: &str, bytes: Vec<u8>) -> ServiceResult<MessageResponse>;
}
