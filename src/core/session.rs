//! Translation session controller.
//!
//! Owns the conversation identity and orchestrates translate/refine calls.
//! The conversation id lives in a single shared cell: this controller is the
//! only writer, collaborators (the suggestion tracker, the UI shell) hold
//! read-only views of the same cell.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::api::TranslationApi;
use crate::shared::error::{AppError, AppResult};
use crate::shared::events::{notify_failure, AppEvent, EventSink};
use crate::shared::types::LanguagePair;

/// Shared handle to the current conversation id.
///
/// Cloning yields another view of the same cell. Absent means "no session
/// started yet"; refinement and improvement-polling are illegal in that
/// state.
#[derive(Clone, Default)]
pub struct ConversationHandle {
    inner: Arc<RwLock<Option<String>>>,
}

impl ConversationHandle {
    pub fn current(&self) -> Option<String> {
        self.inner.read().expect("conversation cell poisoned").clone()
    }

    pub fn is_active(&self) -> bool {
        self.current().is_some()
    }

    /// First write establishes the session; later writes only happen when the
    /// backend hands out a different id. Only the session controller calls
    /// this.
    pub(crate) fn adopt(&self, id: String) {
        *self.inner.write().expect("conversation cell poisoned") = Some(id);
    }
}

/// Conversation lifecycle state. `Active` has no explicit end: the session
/// lasts until the owning shell goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Active,
}

/// Clears the in-flight flag when dropped, so the flag can never stick on an
/// error path.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct TranslationSession {
    api: Arc<dyn TranslationApi>,
    sink: Arc<dyn EventSink>,
    conversation: ConversationHandle,
    translation: RwLock<Option<String>>,
    in_flight: Arc<AtomicBool>,
}

impl TranslationSession {
    pub fn new(api: Arc<dyn TranslationApi>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            api,
            sink,
            conversation: ConversationHandle::default(),
            translation: RwLock::new(None),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read-only view of the conversation cell for collaborators.
    pub fn conversation(&self) -> ConversationHandle {
        self.conversation.clone()
    }

    pub fn state(&self) -> SessionState {
        if self.conversation.is_active() {
            SessionState::Active
        } else {
            SessionState::NoSession
        }
    }

    /// Last good translation. A failed call never clears this; the failure
    /// surfaces as a separate notice instead of overwriting the output.
    pub fn current_translation(&self) -> Option<String> {
        self.translation.read().expect("translation cell poisoned").clone()
    }

    /// Whether a translate/refine call is currently in flight. The triggering
    /// control stays disabled while this is true.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn begin(&self) -> AppResult<InFlightGuard> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::Validation(
                "A translation request is already in progress".to_string(),
            ));
        }
        Ok(InFlightGuard(Arc::clone(&self.in_flight)))
    }

    /// Start (or continue) a translation.
    ///
    /// Adopts the returned conversation id when present; a reply without one
    /// leaves the prior id unchanged.
    pub async fn translate(&self, text: &str, pair: &LanguagePair) -> AppResult<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Enter text to translate".to_string()));
        }

        let _guard = self.begin()?;
        println!(
            "[Session] translate ({} -> {}), {} chars",
            pair.source,
            pair.target,
            text.len()
        );

        match self.api.translate(text, pair).await {
            Ok(reply) => {
                *self.translation.write().expect("translation cell poisoned") =
                    Some(reply.response.clone());
                if let Some(id) = reply.conversation_id.clone() {
                    self.conversation.adopt(id);
                }
                self.sink.emit(AppEvent::TranslationUpdated {
                    translation: reply.response.clone(),
                    conversation_id: self.conversation.current(),
                });
                Ok(reply.response)
            }
            Err(err) => {
                eprintln!("[Session] translate failed: {}", err);
                notify_failure(self.sink.as_ref(), "Translation failed", &err);
                Err(err)
            }
        }
    }

    /// Refine the current translation with free-text feedback.
    ///
    /// Requires an established conversation; without one this is a local
    /// validation error and no request is issued.
    pub async fn refine(&self, feedback: &str, pair: &LanguagePair) -> AppResult<String> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(AppError::Validation(
                "Enter refinement feedback first".to_string(),
            ));
        }
        let Some(conversation_id) = self.conversation.current() else {
            return Err(AppError::Validation(
                "Please start a new conversation first".to_string(),
            ));
        };

        let _guard = self.begin()?;
        println!("[Session] refine conversation {}", conversation_id);

        match self.api.refine(feedback, &conversation_id, pair).await {
            Ok(reply) => {
                *self.translation.write().expect("translation cell poisoned") =
                    Some(reply.response.clone());
                self.sink.emit(AppEvent::TranslationUpdated {
                    translation: reply.response.clone(),
                    conversation_id: Some(conversation_id),
                });
                Ok(reply.response)
            }
            Err(err) => {
                eprintln!("[Session] refine failed: {}", err);
                notify_failure(self.sink.as_ref(), "Refinement failed", &err);
                Err(err)
            }
        }
    }
}
