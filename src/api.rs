//! HTTP layer for the Translate Prompt backend.
//!
//! One trait per backend collaborator so the core components can be driven
//! by fakes in tests. [`client::ApiClient`] implements all of them against
//! the real REST API.

use async_trait::async_trait;

use crate::shared::error::AppResult;
use crate::shared::types::{Ack, GlossaryEntry, Improvement, LanguagePair, RuleEntry, UserDetails};

pub mod auth;
pub mod client;
pub mod glossary;
pub mod graphs;
pub mod rules;
pub mod user;

pub use client::ApiClient;
pub use glossary::GlossaryEdit;
pub use graphs::TranslateReply;
pub use rules::RuleEdit;

/// Conversation-scoped translation operations.
#[async_trait]
pub trait TranslationApi: Send + Sync {
    async fn translate(&self, text: &str, pair: &LanguagePair) -> AppResult<TranslateReply>;

    async fn refine(
        &self,
        feedback: &str,
        conversation_id: &str,
        pair: &LanguagePair,
    ) -> AppResult<TranslateReply>;

    async fn improvements(&self, conversation_id: &str) -> AppResult<Vec<Improvement>>;

    async fn apply_improvement(
        &self,
        improvement: &Improvement,
        conversation_id: &str,
    ) -> AppResult<Ack>;
}

/// Glossary store CRUD, scoped by language pair.
#[async_trait]
pub trait GlossaryApi: Send + Sync {
    async fn glossary_entries(&self, pair: &LanguagePair) -> AppResult<Vec<GlossaryEntry>>;
    async fn add_glossary_entry(&self, entry: &GlossaryEntry) -> AppResult<Ack>;
    async fn edit_glossary_entry(&self, edit: &GlossaryEdit) -> AppResult<Ack>;
    async fn delete_glossary_entry(&self, source: &str, pair: &LanguagePair) -> AppResult<Ack>;
}

/// Rules store CRUD, scoped by language pair.
#[async_trait]
pub trait RulesApi: Send + Sync {
    async fn rules_entries(&self, pair: &LanguagePair) -> AppResult<Vec<RuleEntry>>;
    async fn add_rule(&self, text: &str, pair: &LanguagePair) -> AppResult<Ack>;
    async fn edit_rule(&self, edit: &RuleEdit) -> AppResult<Ack>;
    async fn delete_rule(&self, text: &str, pair: &LanguagePair) -> AppResult<Ack>;
}

/// Account service (read-mostly; checkout happens in the browser).
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn user_details(&self) -> AppResult<UserDetails>;
}
