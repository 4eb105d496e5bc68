//! Glossary/rules suggestion tracker.
//!
//! Mirrors the backend's improvement suggestions for the active conversation.
//! Every load is a wholesale replace, never a merge: the backend is the
//! source of truth for which suggestions still exist, including whether an
//! applied one disappears.

use std::sync::{Arc, RwLock};

use crate::api::TranslationApi;
use crate::core::session::ConversationHandle;
use crate::shared::error::{AppError, AppResult};
use crate::shared::events::{notify_failure, EventSink};
use crate::shared::types::Improvement;

pub struct SuggestionTracker {
    api: Arc<dyn TranslationApi>,
    sink: Arc<dyn EventSink>,
    conversation: ConversationHandle,
    suggestions: RwLock<Vec<Improvement>>,
}

impl SuggestionTracker {
    pub fn new(
        api: Arc<dyn TranslationApi>,
        sink: Arc<dyn EventSink>,
        conversation: ConversationHandle,
    ) -> Self {
        Self {
            api,
            sink,
            conversation,
            suggestions: RwLock::new(Vec::new()),
        }
    }

    /// Current suggestion list (a snapshot of the last successful load).
    pub fn suggestions(&self) -> Vec<Improvement> {
        self.suggestions.read().expect("suggestion list poisoned").clone()
    }

    /// Fetch the suggestions for the active conversation.
    ///
    /// No-op when no conversation exists yet. On success the list is replaced
    /// wholesale; on failure the previous list is kept and a notice is
    /// raised.
    pub async fn load_improvements(&self) -> AppResult<()> {
        let Some(conversation_id) = self.conversation.current() else {
            return Ok(());
        };

        match self.api.improvements(&conversation_id).await {
            Ok(list) => {
                println!(
                    "[Suggestions] loaded {} suggestion(s) for conversation {}",
                    list.len(),
                    conversation_id
                );
                *self.suggestions.write().expect("suggestion list poisoned") = list;
                Ok(())
            }
            Err(err) => {
                eprintln!("[Suggestions] load failed: {}", err);
                notify_failure(self.sink.as_ref(), "Load suggestions failed", &err);
                Err(err)
            }
        }
    }

    /// Apply one suggestion, then re-fetch the list.
    ///
    /// The applied suggestion is never filtered out locally; if the backend
    /// still returns it, it stays visible. A failed apply leaves the list
    /// untouched so the user can retry.
    pub async fn apply(&self, improvement: &Improvement) -> AppResult<()> {
        let Some(conversation_id) = self.conversation.current() else {
            return Err(AppError::Validation(
                "No active conversation to apply suggestions to".to_string(),
            ));
        };

        match self.api.apply_improvement(improvement, &conversation_id).await {
            Ok(_) => {
                println!("[Suggestions] applied {}", improvement.summary());
                self.load_improvements().await
            }
            Err(err) => {
                eprintln!("[Suggestions] apply failed: {}", err);
                notify_failure(self.sink.as_ref(), "Apply suggestion failed", &err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::api::TranslateReply;
    use crate::shared::events::{CollectingSink, NoticeLevel};
    use crate::shared::types::{Ack, LanguagePair};

    struct FakeBackend {
        served: Mutex<Vec<Improvement>>,
        applied: Mutex<Vec<Improvement>>,
        fetches: Mutex<u32>,
        unauthorized: bool,
    }

    impl FakeBackend {
        fn serving(list: Vec<Improvement>) -> Self {
            Self {
                served: Mutex::new(list),
                applied: Mutex::new(Vec::new()),
                fetches: Mutex::new(0),
                unauthorized: false,
            }
        }
    }

    #[async_trait]
    impl TranslationApi for FakeBackend {
        async fn translate(&self, _: &str, _: &LanguagePair) -> AppResult<TranslateReply> {
            unreachable!("tracker never translates")
        }

        async fn refine(&self, _: &str, _: &str, _: &LanguagePair) -> AppResult<TranslateReply> {
            unreachable!("tracker never refines")
        }

        async fn improvements(&self, _conversation_id: &str) -> AppResult<Vec<Improvement>> {
            *self.fetches.lock().unwrap() += 1;
            Ok(self.served.lock().unwrap().clone())
        }

        async fn apply_improvement(
            &self,
            improvement: &Improvement,
            _conversation_id: &str,
        ) -> AppResult<Ack> {
            if self.unauthorized {
                return Err(AppError::Auth("unauthorised".to_string()));
            }
            self.applied.lock().unwrap().push(improvement.clone());
            // Backend prunes the applied suggestion from its cache.
            self.served
                .lock()
                .unwrap()
                .retain(|candidate| candidate != improvement);
            Ok(Ack {
                message: "success".to_string(),
                status: None,
            })
        }
    }

    fn glossary_suggestion() -> Improvement {
        Improvement::Glossary {
            source: "cerveza".to_string(),
            target: "beer".to_string(),
            note: "prefer over 'pint'".to_string(),
        }
    }

    fn rule_suggestion() -> Improvement {
        Improvement::Rule {
            text: "Keep an informal tone".to_string(),
        }
    }

    fn active_conversation() -> ConversationHandle {
        let handle = ConversationHandle::default();
        handle.adopt("abc123".to_string());
        handle
    }

    fn tracker_with(
        backend: FakeBackend,
        conversation: ConversationHandle,
    ) -> (SuggestionTracker, Arc<FakeBackend>, Arc<CollectingSink>) {
        let backend = Arc::new(backend);
        let sink = Arc::new(CollectingSink::new());
        let tracker = SuggestionTracker::new(backend.clone(), sink.clone(), conversation);
        (tracker, backend, sink)
    }

    #[tokio::test]
    async fn load_is_a_noop_without_a_conversation() {
        let (tracker, backend, _) =
            tracker_with(FakeBackend::serving(vec![glossary_suggestion()]), ConversationHandle::default());

        tracker.load_improvements().await.unwrap();
        assert_eq!(*backend.fetches.lock().unwrap(), 0, "no request may be issued");
        assert!(tracker.suggestions().is_empty());
    }

    #[tokio::test]
    async fn load_replaces_the_list_wholesale() {
        let conversation = active_conversation();
        let (tracker, _, _) = tracker_with(
            FakeBackend::serving(vec![glossary_suggestion(), rule_suggestion()]),
            conversation,
        );

        tracker.load_improvements().await.unwrap();
        tracker.load_improvements().await.unwrap();

        // Idempotent: a double load yields the identical list, not duplicates.
        assert_eq!(
            tracker.suggestions(),
            vec![glossary_suggestion(), rule_suggestion()]
        );
    }

    #[tokio::test]
    async fn apply_refreshes_from_the_backend() {
        let conversation = active_conversation();
        let (tracker, backend, _) = tracker_with(
            FakeBackend::serving(vec![glossary_suggestion(), rule_suggestion()]),
            conversation,
        );

        tracker.load_improvements().await.unwrap();
        tracker.apply(&glossary_suggestion()).await.unwrap();

        assert_eq!(*backend.applied.lock().unwrap(), vec![glossary_suggestion()]);
        assert_eq!(tracker.suggestions(), vec![rule_suggestion()]);
    }

    #[tokio::test]
    async fn unauthorized_apply_keeps_the_suggestion_visible() {
        let conversation = active_conversation();
        let mut backend = FakeBackend::serving(vec![glossary_suggestion()]);
        backend.unauthorized = true;
        let (tracker, _, sink) = tracker_with(backend, conversation);

        tracker.load_improvements().await.unwrap();
        let err = tracker.apply(&glossary_suggestion()).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));

        assert_eq!(tracker.suggestions(), vec![glossary_suggestion()]);
        let notices = sink.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::AuthRequired);
    }
}
