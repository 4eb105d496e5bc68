//! `/rules` CRUD endpoints.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, RulesApi};
use crate::shared::error::AppResult;
use crate::shared::types::{Ack, LanguagePair, RuleEntry};

/// Edit request with explicit old/new text, since the text is the key.
#[derive(Debug, Clone, Serialize)]
pub struct RuleEdit {
    pub old_text: String,
    pub new_text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Deserialize)]
struct RulesListWire {
    #[serde(default)]
    entries: Vec<RuleEntry>,
}

#[derive(Serialize)]
struct AddRuleWire<'a> {
    rules_entry: RuleBody<'a>,
}

#[derive(Serialize)]
struct RuleBody<'a> {
    text: &'a str,
    source_language: &'a str,
    target_language: &'a str,
}

#[derive(Serialize)]
struct DeleteRuleWire<'a> {
    text: &'a str,
    source_language: &'a str,
    target_language: &'a str,
}

#[async_trait]
impl RulesApi for ApiClient {
    async fn rules_entries(&self, pair: &LanguagePair) -> AppResult<Vec<RuleEntry>> {
        let wire: RulesListWire = self
            .execute(self.request(Method::GET, "/rules/rules-entries").query(&[
                ("source_language", pair.source.as_str()),
                ("target_language", pair.target.as_str()),
            ]))
            .await?;
        Ok(wire.entries)
    }

    async fn add_rule(&self, text: &str, pair: &LanguagePair) -> AppResult<Ack> {
        let body = AddRuleWire {
            rules_entry: RuleBody {
                text,
                source_language: &pair.source,
                target_language: &pair.target,
            },
        };
        self.execute(self.request(Method::POST, "/rules/add-rule").json(&body))
            .await
    }

    async fn edit_rule(&self, edit: &RuleEdit) -> AppResult<Ack> {
        self.execute(self.request(Method::PUT, "/rules/edit-rule").json(edit))
            .await
    }

    async fn delete_rule(&self, text: &str, pair: &LanguagePair) -> AppResult<Ack> {
        let body = DeleteRuleWire {
            text,
            source_language: &pair.source,
            target_language: &pair.target,
        };
        self.execute(self.request(Method::DELETE, "/rules/delete-rule").json(&body))
            .await
    }
}
