//! # Context Chatbot
//!
//! A terminal client for a retrieval-augmented question answering backend.
//!
//! Users upload PDF documents to the Document Service and ask questions of
//! the Answer Service. The [`session::ChatSession`] owns the conversation
//! transcript and turns every backend failure into data the view can show,
//! so nothing a user does can end the session.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │  CLI / REPL  │──▶│ ChatSession │──▶│              │
//! │  (chatbot)   │   └─────────────┘   │ HttpBackend  │──▶ /api/answer
//! │              │   ┌─────────────┐   │  (reqwest)   │──▶ /api/reset
//! │              │──▶│ upload flow │──▶│              │──▶ /api/document
//! └──────────────┘   └─────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! chatbot status                      # check the backend is up
//! chatbot upload ./handbook.pdf       # ingest a document
//! chatbot ask "What is the leave policy?"
//! chatbot chat                        # interactive session
//! chatbot reset                       # clear server-side conversation
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Exchanges, notices, and wire types |
//! | [`error`] | Backend error type |
//! | [`service`] | Answer and Document Service traits |
//! | [`backend`] | HTTP implementation of the service traits |
//! | [`session`] | Chat session and transcript |
//! | [`upload`] | PDF validation and upload |
//! | [`repl`] | Interactive chat loop |
//! | [`logging`] | Tracing subscriber setup |

pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repl;
pub mod service;
pub mod session;
pub mod upload;
