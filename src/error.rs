//! Error types for calls to the remote backend.

use reqwest::StatusCode;

/// Errors returned by [`AnswerService`](crate::service::AnswerService) and
/// [`DocumentService`](crate::service::DocumentService) implementations.
///
/// The chat session never propagates these to its caller; they are turned
/// into an error [`Exchange`](crate::models::Exchange) or a failure notice.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
