//! Glossary editor: forced term mappings for one language pair.

use std::sync::{Arc, RwLock};

use crate::api::{GlossaryApi, GlossaryEdit};
use crate::core::stores::{ConfirmDelete, StoreInfo};
use crate::shared::error::{AppError, AppResult};
use crate::shared::events::{notify_failure, EventSink};
use crate::shared::types::{GlossaryEntry, LanguagePair};

pub struct GlossaryEditor {
    api: Arc<dyn GlossaryApi>,
    sink: Arc<dyn EventSink>,
    pair: LanguagePair,
    entries: RwLock<Vec<GlossaryEntry>>,
}

impl GlossaryEditor {
    pub fn new(api: Arc<dyn GlossaryApi>, sink: Arc<dyn EventSink>, pair: LanguagePair) -> Self {
        Self {
            api,
            sink,
            pair,
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    /// Cached entries from the last reload.
    pub fn entries(&self) -> Vec<GlossaryEntry> {
        self.entries.read().expect("glossary cache poisoned").clone()
    }

    /// Replace the cache with the backend's current list.
    pub async fn reload(&self) -> AppResult<()> {
        match self.api.glossary_entries(&self.pair).await {
            Ok(list) => {
                *self.entries.write().expect("glossary cache poisoned") = list;
                Ok(())
            }
            Err(err) => {
                eprintln!("[Glossary] reload failed: {}", err);
                notify_failure(self.sink.as_ref(), "Load glossary failed", &err);
                Err(err)
            }
        }
    }

    /// Add a term mapping, then reload once.
    pub async fn add(&self, source: &str, target: &str, note: &str) -> AppResult<()> {
        let source = source.trim();
        let target = target.trim();
        if source.is_empty() || target.is_empty() {
            return Err(AppError::Validation(
                "Glossary entries need both a source and a target term".to_string(),
            ));
        }

        let entry = GlossaryEntry {
            source: source.to_string(),
            target: target.to_string(),
            note: note.trim().to_string(),
            source_language: self.pair.source.clone(),
            target_language: self.pair.target.clone(),
        };
        match self.api.add_glossary_entry(&entry).await {
            Ok(_) => {
                println!("[Glossary] added \"{}\" -> \"{}\"", source, target);
                self.reload().await
            }
            Err(err) => {
                eprintln!("[Glossary] add failed: {}", err);
                notify_failure(self.sink.as_ref(), "Add glossary entry failed", &err);
                Err(err)
            }
        }
    }

    /// Rewrite an existing entry, keyed by its old source term.
    pub async fn edit(
        &self,
        old_source: &str,
        new_source: &str,
        target: &str,
        note: &str,
    ) -> AppResult<()> {
        let new_source = new_source.trim();
        let target = target.trim();
        if new_source.is_empty() || target.is_empty() {
            return Err(AppError::Validation(
                "Glossary entries need both a source and a target term".to_string(),
            ));
        }

        let edit = GlossaryEdit {
            old_source: old_source.to_string(),
            new_source: new_source.to_string(),
            target: target.to_string(),
            note: note.trim().to_string(),
            source_language: self.pair.source.clone(),
            target_language: self.pair.target.clone(),
        };
        match self.api.edit_glossary_entry(&edit).await {
            Ok(_) => self.reload().await,
            Err(err) => {
                eprintln!("[Glossary] edit failed: {}", err);
                notify_failure(self.sink.as_ref(), "Edit glossary entry failed", &err);
                Err(err)
            }
        }
    }

    /// Delete the entry for `source` after confirmation. Returns false when
    /// the user declined; no request is issued in that case.
    pub async fn delete(&self, source: &str, gate: &dyn ConfirmDelete) -> AppResult<bool> {
        if !gate.confirm(&format!("Delete glossary entry \"{}\"?", source)) {
            return Ok(false);
        }
        match self.api.delete_glossary_entry(source, &self.pair).await {
            Ok(_) => {
                println!("[Glossary] deleted \"{}\"", source);
                self.reload().await?;
                Ok(true)
            }
            Err(err) => {
                eprintln!("[Glossary] delete failed: {}", err);
                notify_failure(self.sink.as_ref(), "Delete glossary entry failed", &err);
                Err(err)
            }
        }
    }
}

impl StoreInfo for GlossaryEditor {
    fn id(&self) -> &'static str {
        "glossary"
    }

    fn label(&self) -> &'static str {
        "Glossary"
    }

    fn len(&self) -> usize {
        self.entries.read().expect("glossary cache poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::core::stores::AlwaysAnswer;
    use crate::shared::events::CollectingSink;
    use crate::shared::types::Ack;

    #[derive(Default)]
    struct FakeGlossary {
        entries: Mutex<Vec<GlossaryEntry>>,
        requests: Mutex<Vec<String>>,
    }

    fn ok_ack() -> AppResult<Ack> {
        Ok(Ack {
            message: "success".to_string(),
            status: None,
        })
    }

    #[async_trait]
    impl GlossaryApi for FakeGlossary {
        async fn glossary_entries(&self, _pair: &LanguagePair) -> AppResult<Vec<GlossaryEntry>> {
            self.requests.lock().unwrap().push("list".to_string());
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn add_glossary_entry(&self, entry: &GlossaryEntry) -> AppResult<Ack> {
            self.requests.lock().unwrap().push(format!("add:{}", entry.source));
            self.entries.lock().unwrap().push(entry.clone());
            ok_ack()
        }

        async fn edit_glossary_entry(&self, edit: &GlossaryEdit) -> AppResult<Ack> {
            self.requests
                .lock()
                .unwrap()
                .push(format!("edit:{}:{}", edit.old_source, edit.new_source));
            let mut entries = self.entries.lock().unwrap();
            if let Some(entry) = entries.iter_mut().find(|e| e.source == edit.old_source) {
                entry.source = edit.new_source.clone();
                entry.target = edit.target.clone();
                entry.note = edit.note.clone();
            }
            ok_ack()
        }

        async fn delete_glossary_entry(&self, source: &str, _pair: &LanguagePair) -> AppResult<Ack> {
            self.requests.lock().unwrap().push(format!("delete:{}", source));
            self.entries.lock().unwrap().retain(|e| e.source != source);
            ok_ack()
        }
    }

    fn editor_with(backend: FakeGlossary) -> (GlossaryEditor, Arc<FakeGlossary>) {
        let backend = Arc::new(backend);
        let sink = Arc::new(CollectingSink::new());
        let editor = GlossaryEditor::new(
            backend.clone(),
            sink,
            LanguagePair::new("es", "en").unwrap(),
        );
        (editor, backend)
    }

    #[tokio::test]
    async fn add_appears_after_one_reload() {
        let (editor, _) = editor_with(FakeGlossary::default());

        editor.add("cerveza", "beer", "").await.unwrap();

        let entries = editor.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, "cerveza");
        assert_eq!(entries[0].source_language, "es");
        assert_eq!(editor.len(), 1);
    }

    #[tokio::test]
    async fn blank_terms_are_rejected_locally() {
        let (editor, backend) = editor_with(FakeGlossary::default());

        let err = editor.add("  ", "beer", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let (editor, backend) = editor_with(FakeGlossary::default());
        editor.add("cerveza", "beer", "").await.unwrap();
        backend.requests.lock().unwrap().clear();

        let deleted = editor.delete("cerveza", &AlwaysAnswer(false)).await.unwrap();

        assert!(!deleted);
        assert!(backend.requests.lock().unwrap().is_empty());
        assert_eq!(editor.len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_entry() {
        let (editor, _) = editor_with(FakeGlossary::default());
        editor.add("cerveza", "beer", "").await.unwrap();

        let deleted = editor.delete("cerveza", &AlwaysAnswer(true)).await.unwrap();

        assert!(deleted);
        assert!(editor.is_empty());
    }

    #[tokio::test]
    async fn edit_rekeys_by_old_source() {
        let (editor, backend) = editor_with(FakeGlossary::default());
        editor.add("cerveza", "beers", "").await.unwrap();

        editor.edit("cerveza", "cerveza", "beer", "singular").await.unwrap();

        assert!(backend
            .requests
            .lock()
            .unwrap()
            .contains(&"edit:cerveza:cerveza".to_string()));
        let entries = editor.entries();
        assert_eq!(entries[0].target, "beer");
        assert_eq!(entries[0].note, "singular");
    }
}
