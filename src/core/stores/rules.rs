//! Rules editor: free-text translation instructions for one language pair.

use std::sync::{Arc, RwLock};

use crate::api::{RuleEdit, RulesApi};
use crate::core::stores::{ConfirmDelete, StoreInfo};
use crate::shared::error::{AppError, AppResult};
use crate::shared::events::{notify_failure, EventSink};
use crate::shared::types::{LanguagePair, RuleEntry};

pub struct RulesEditor {
    api: Arc<dyn RulesApi>,
    sink: Arc<dyn EventSink>,
    pair: LanguagePair,
    entries: RwLock<Vec<RuleEntry>>,
}

impl RulesEditor {
    pub fn new(api: Arc<dyn RulesApi>, sink: Arc<dyn EventSink>, pair: LanguagePair) -> Self {
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

    pub fn entries(&self) -> Vec<RuleEntry> {
        self.entries.read().expect("rules cache poisoned").clone()
    }

    pub async fn reload(&self) -> AppResult<()> {
        match self.api.rules_entries(&self.pair).await {
            Ok(list) => {
                *self.entries.write().expect("rules cache poisoned") = list;
                Ok(())
            }
            Err(err) => {
                eprintln!("[Rules] reload failed: {}", err);
                notify_failure(self.sink.as_ref(), "Load rules failed", &err);
                Err(err)
            }
        }
    }

    pub async fn add(&self, text: &str) -> AppResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Rule text cannot be empty".to_string()));
        }

        match self.api.add_rule(text, &self.pair).await {
            Ok(_) => {
                println!("[Rules] added \"{}\"", text);
                self.reload().await
            }
            Err(err) => {
                eprintln!("[Rules] add failed: {}", err);
                notify_failure(self.sink.as_ref(), "Add rule failed", &err);
                Err(err)
            }
        }
    }

    /// Rewrite a rule, keyed by its old text.
    pub async fn edit(&self, old_text: &str, new_text: &str) -> AppResult<()> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(AppError::Validation("Rule text cannot be empty".to_string()));
        }

        let edit = RuleEdit {
            old_text: old_text.to_string(),
            new_text: new_text.to_string(),
            source_language: self.pair.source.clone(),
            target_language: self.pair.target.clone(),
        };
        match self.api.edit_rule(&edit).await {
            Ok(_) => self.reload().await,
            Err(err) => {
                eprintln!("[Rules] edit failed: {}", err);
                notify_failure(self.sink.as_ref(), "Edit rule failed", &err);
                Err(err)
            }
        }
    }

    /// Delete a rule after confirmation. Returns false when declined; nothing
    /// is sent in that case.
    pub async fn delete(&self, text: &str, gate: &dyn ConfirmDelete) -> AppResult<bool> {
        if !gate.confirm(&format!("Delete rule \"{}\"?", text)) {
            return Ok(false);
        }
        match self.api.delete_rule(text, &self.pair).await {
            Ok(_) => {
                println!("[Rules] deleted \"{}\"", text);
                self.reload().await?;
                Ok(true)
            }
            Err(err) => {
                eprintln!("[Rules] delete failed: {}", err);
                notify_failure(self.sink.as_ref(), "Delete rule failed", &err);
                Err(err)
            }
        }
    }
}

impl StoreInfo for RulesEditor {
    fn id(&self) -> &'static str {
        "rules"
    }

    fn label(&self) -> &'static str {
        "Rules"
    }

    fn len(&self) -> usize {
        self.entries.read().expect("rules cache poisoned").len()
    }
}
