//! In-process stand-in for the chatbot backend, served by axum on an
//! ephemeral port. Records every call so tests can assert on traffic.

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reply {
    #[default]
    Ok,
    /// 502 with a JSON error body.
    BadGateway,
    /// 200 with a body that is not the expected JSON.
    Malformed,
}

#[derive(Debug, Default)]
pub struct Upload {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Default)]
pub struct Stub {
    pub answer_reply: Reply,
    pub reset_reply: Reply,
    /// Message returned by `/api/reset`; `None` sends `{}`.
    pub reset_message: Option<String>,
    pub questions: Mutex<Vec<String>>,
    pub resets: Mutex<usize>,
    pub uploads: Mutex<Vec<Upload>>,
}

impl Stub {
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn resets(&self) -> usize {
        *self.resets.lock().unwrap()
    }
}

/// Serve `stub` on 127.0.0.1 and return its base URL.
pub async fn spawn(stub: Stub) -> (String, Arc<Stub>) {
    let stub = Arc::new(stub);
    let app = Router::new()
        .route("/api/", get(greeting))
        .route("/api/answer", post(answer))
        .route("/api/reset", post(reset))
        .route("/api/document", post(document))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn failure(reply: Reply) -> Option<Response> {
    match reply {
        Reply::Ok => None,
        Reply::BadGateway => Some(
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "status": "Error", "error": "rag backend unavailable" })),
            )
                .into_response(),
        ),
        Reply::Malformed => Some((StatusCode::OK, "<html>oops</html>").into_response()),
    }
}

async fn greeting() -> Json<Value> {
    Json(json!({ "message": "Hello GoLang" }))
}

async fn answer(State(stub): State<Arc<Stub>>, Json(req): Json<Value>) -> Response {
    let question = req["question"].as_str().unwrap_or_default().to_string();
    stub.questions.lock().unwrap().push(question.clone());

    if question.starts_with("slow") {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    if let Some(resp) = failure(stub.answer_reply) {
        return resp;
    }

    let body = if question == "What is the capital of France?" {
        json!({ "mode": "direct", "answer": "Paris" })
    } else {
        json!({ "mode": "reasoning", "answer": format!("echo: {}", question) })
    };
    Json(body).into_response()
}

async fn reset(State(stub): State<Arc<Stub>>) -> Response {
    *stub.resets.lock().unwrap() += 1;
    if let Some(resp) = failure(stub.reset_reply) {
        return resp;
    }
    match &stub.reset_message {
        Some(msg) => Json(json!({ "message": msg })).into_response(),
        None => Json(json!({})).into_response(),
    }
}

async fn document(State(stub): State<Arc<Stub>>, mut multipart: Multipart) -> Response {
    let mut names = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let upload = Upload {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().unwrap_or_default().to_string(),
            content_type: field.content_type().unwrap_or_default().to_string(),
            size: 0,
        };
        let size = field.bytes().await.unwrap().len();
        names.push(upload.file_name.clone());
        stub.uploads.lock().unwrap().push(Upload { size, ..upload });
    }
    Json(json!({ "message": format!("{} added successfully", names.join(", ")) })).into_response()
}
