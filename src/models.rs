//! Core data types used throughout the chat client.
//!
//! Two groups live here: the wire shapes exchanged with the backend
//! (`AnswerRequest`, `AnswerResponse`, `MessageResponse`) and the
//! client-side records the UI renders (`Exchange`, and the notices
//! returned by reset and upload).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mode tag recorded when the Answer Service call failed.
pub const ERROR_MODE: &str = "error";

/// Answer text recorded when the Answer Service call failed.
pub const FAILED_ANSWER: &str = "Failed to get response.";

/// One recorded question/answer turn, successful or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Trimmed question as submitted.
    pub question: String,
    /// Opaque tag from the Answer Service, or [`ERROR_MODE`].
    pub mode: String,
    /// Answer text, or [`FAILED_ANSWER`].
    pub answer: String,
}

impl Exchange {
    pub fn answered(question: impl Into<String>, response: AnswerResponse) -> Self {
        Self {
            question: question.into(),
            mode: response.mode,
            answer: response.answer,
        }
    }

    pub fn failed(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            mode: ERROR_MODE.to_string(),
            answer: FAILED_ANSWER.to_string(),
        }
    }

    /// True when this exchange was recorded by the client after a failed call.
    pub fn is_error(&self) -> bool {
        self.mode == ERROR_MODE && self.answer == FAILED_ANSWER
    }
}

/// Body of `POST /api/answer`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRequest<'a> {
    pub question: &'a str,
}

/// Successful body of `POST /api/answer`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerResponse {
    pub mode: String,
    pub answer: String,
}

/// `{ "message": ... }` body returned by reset, upload, and the greeting route.
///
/// The message is optional; callers fall back to their own default text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Returns the message when present and non-empty.
    pub fn into_message(self) -> Option<String> {
        self.message.filter(|m| !m.is_empty())
    }
}

/// Notice surfaced to the caller after `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetNotice {
    /// The Answer Service confirmed the reset.
    Confirmed(String),
    /// The reset notification failed. Local state is already cleared.
    Failed,
}

impl ResetNotice {
    pub const DEFAULT_CONFIRMATION: &'static str = "Chat reset successfully!";
    pub const FAILURE: &'static str = "Failed to reset chat.";

    pub fn from_response(resp: MessageResponse) -> Self {
        ResetNotice::Confirmed(
            resp.into_message()
                .unwrap_or_else(|| Self::DEFAULT_CONFIRMATION.to_string()),
        )
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, ResetNotice::Confirmed(_))
    }
}

impl fmt::Display for ResetNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetNotice::Confirmed(msg) => f.write_str(msg),
            ResetNotice::Failed => f.write_str(Self::FAILURE),
        }
    }
}

/// Notice surfaced to the caller after a document upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadNotice {
    /// No file was selected.
    NoFile,
    /// The selected file is not a PDF.
    NotPdf,
    /// The Document Service accepted the file.
    Uploaded(String),
    /// Reading the file or calling the Document Service failed.
    Failed,
}

impl UploadNotice {
    pub const DEFAULT_CONFIRMATION: &'static str = "File uploaded successfully!";

    pub fn from_response(resp: MessageResponse) -> Self {
        UploadNotice::Uploaded(
            resp.into_message()
                .unwrap_or_else(|| Self::DEFAULT_CONFIRMATION.to_string()),
        )
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadNotice::Uploaded(_))
    }
}

impl fmt::Display for UploadNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadNotice::NoFile => f.write_str("Please select a file first."),
            UploadNotice::NotPdf => f.write_str("Only PDF files are allowed."),
            UploadNotice::Uploaded(msg) => f.write_str(msg),
            UploadNotice::Failed => f.write_str("Failed to upload file."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_exchange_uses_fixed_tag_and_text() {
        let ex = Exchange::failed("why?");
        assert_eq!(ex.mode, "error");
        assert_eq!(ex.answer, "Failed to get response.");
        assert!(ex.is_error());
    }

    #[test]
    fn answered_exchange_keeps_service_mode() {
        let ex = Exchange::answered(
            "What is the capital of France?",
            AnswerResponse {
                mode: "direct".into(),
                answer: "Paris".into(),
            },
        );
        assert_eq!(ex.mode, "direct");
        assert!(!ex.is_error());
    }

    #[test]
    fn answer_response_rejects_missing_fields() {
        let parsed: Result<AnswerResponse, _> = serde_json::from_str(r#"{"mode":"reasoning"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn answer_request_serializes_question_only() {
        let body = serde_json::to_value(AnswerRequest { question: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({ "question": "hi" }));
    }

    #[test]
    fn reset_notice_falls_back_to_default() {
        let notice = ResetNotice::from_response(MessageResponse::default());
        assert_eq!(notice.to_string(), "Chat reset successfully!");

        let empty: MessageResponse = serde_json::from_str(r#"{"message":""}"#).unwrap();
        assert_eq!(
            ResetNotice::from_response(empty),
            ResetNotice::Confirmed("Chat reset successfully!".into())
        );
    }

    #[test]
    fn reset_notice_uses_server_message() {
        let resp: MessageResponse = serde_json::from_str(r#"{"message":"Cleared"}"#).unwrap();
        assert_eq!(ResetNotice::from_response(resp).to_string(), "Cleared");
        assert_eq!(ResetNotice::Failed.to_string(), "Failed to reset chat.");
    }

    #[test]
    fn upload_notice_texts() {
        assert_eq!(UploadNotice::NoFile.to_string(), "Please select a file first.");
        assert_eq!(UploadNotice::NotPdf.to_string(), "Only PDF files are allowed.");
        assert_eq!(UploadNotice::Failed.to_string(), "Failed to upload file.");
        assert_eq!(
            UploadNotice::from_response(MessageResponse::default()).to_string(),
            "File uploaded successfully!"
        );
    }
}
