//! The chat session: transcript ownership and Answer Service mediation.
//!
//! A [`ChatSession`] is created once per conversation and owns everything
//! the chat view renders: the transcript of [`Exchange`]s and the busy
//! flag. It is `Send + Sync`, so a view can share it behind an `Arc`
//! and call into it from several tasks.
//!
//! # Ordering
//!
//! Submissions are serialized through a fair async mutex, so exchanges are
//! appended in the order `submit_question` was called, not the order the
//! responses arrive.
//!
//! # Reset
//!
//! [`ChatSession::reset`] clears the transcript before any network I/O and
//! does not wait behind queued submissions. Each reset bumps a generation
//! counter; a response to any submission made before the reset, whether it
//! was in flight or still queued, is dropped rather than appended to the
//! fresh transcript.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::models::{Exchange, ResetNotice};
use crate::service::AnswerService;

/// Result of [`ChatSession::submit_question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The question was blank after trimming. Nothing was sent or recorded.
    Skipped,
    /// The Answer Service replied; the exchange was appended.
    Answered(Exchange),
    /// The call failed; an error exchange was appended.
    Failed(Exchange),
    /// A reset happened after the call was made; the response was dropped.
    Discarded,
}

impl SubmitOutcome {
    /// Whether the caller may clear its input buffer.
    pub fn clears_input(&self) -> bool {
        matches!(self, SubmitOutcome::Answered(_))
    }

    /// The appended exchange, if any.
    pub fn exchange(&self) -> Option<&Exchange> {
        match self {
            SubmitOutcome::Answered(ex) | SubmitOutcome::Failed(ex) => Some(ex),
            SubmitOutcome::Skipped | SubmitOutcome::Discarded => None,
        }
    }
}

#[derive(Debug, Default)]
struct TranscriptState {
    exchanges: Vec<Exchange>,
    generation: u64,
}

/// In-memory chat session backed by an [`AnswerService`].
pub struct ChatSession {
    id: Uuid,
    service: Arc<dyn AnswerService>,
    state: Mutex<TranscriptState>,
    queue: tokio::sync::Mutex<()>,
    busy: AtomicBool,
}

/// Clears the busy flag when a submission ends, including when its future is dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        BusyGuard(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ChatSession {
    /// Start a session with an empty transcript.
    pub fn new(service: Arc<dyn AnswerService>) -> Self {
        Self {
            id: Uuid::new_v4(),
            service,
            state: Mutex::new(TranscriptState::default()),
            queue: tokio::sync::Mutex::new(()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True while a question is in flight. Views use it to disable sending.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Snapshot of the transcript, oldest first.
    pub fn transcript(&self) -> Vec<Exchange> {
        self.lock_state().exchanges.clone()
    }

    pub fn len(&self) -> usize {
        self.lock_state().exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().exchanges.is_empty()
    }

    /// Ask a question and record the outcome.
    ///
    /// Blank input returns [`SubmitOutcome::Skipped`] without a network
    /// call. Otherwise exactly one request is sent and, unless a reset
    /// intervenes, exactly one exchange is appended. Failures are recorded
    /// as error exchanges and never returned as errors.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn submit_question(&self, text: &str) -> SubmitOutcome {
        let question = text.trim();
        if question.is_empty() {
            return SubmitOutcome::Skipped;
        }

        // A reset issued while this call waits in the queue still voids it.
        let generation = self.lock_state().generation;
        let _turn = self.queue.lock().await;
        let _busy = BusyGuard::set(&self.busy);

        let result = self.service.answer(question).await;

        let mut state = self.lock_state();
        if state.generation != generation {
            debug!("session was reset after the question was submitted, dropping response");
            return SubmitOutcome::Discarded;
        }

        let outcome = match result {
            Ok(resp) => SubmitOutcome::Answered(Exchange::answered(question, resp)),
            Err(e) => {
                warn!(error = %e, "failed to get answer");
                SubmitOutcome::Failed(Exchange::failed(question))
            }
        };
        if let Some(ex) = outcome.exchange() {
            state.exchanges.push(ex.clone());
        }
        outcome
    }

    /// Clear the conversation locally and notify the Answer Service.
    ///
    /// The transcript is empty as soon as this is called, whatever the
    /// network outcome. The notice carries the server's confirmation or a
    /// fixed failure text.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn reset(&self) -> ResetNotice {
        {
            let mut state = self.lock_state();
            state.exchanges.clear();
            state.generation += 1;
        }

        match self.service.reset().await {
            Ok(resp) => ResetNotice::from_response(resp),
            Err(e) => {
                warn!(error = %e, "failed to reset remote conversation");
                ResetNotice::Failed
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, TranscriptState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("len", &self.len())
            .field("busy", &self.is_busy())
            .finish()
    }
}
