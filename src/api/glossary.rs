//! `/glossary` CRUD endpoints.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, GlossaryApi};
use crate::shared::error::AppResult;
use crate::shared::types::{Ack, GlossaryEntry, LanguagePair};

/// Edit request carrying an explicit old/new key pair so renaming the
/// `source` term itself is unambiguous.
#[derive(Debug, Clone, Serialize)]
pub struct GlossaryEdit {
    pub old_source: String,
    pub new_source: String,
    pub target: String,
    pub note: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Deserialize)]
struct GlossaryListWire {
    #[serde(default)]
    entries: Vec<GlossaryEntry>,
}

#[derive(Serialize)]
struct DeleteGlossaryWire<'a> {
    source: &'a str,
    source_language: &'a str,
    target_language: &'a str,
}

#[async_trait]
impl GlossaryApi for ApiClient {
    async fn glossary_entries(&self, pair: &LanguagePair) -> AppResult<Vec<GlossaryEntry>> {
        let wire: GlossaryListWire = self
            .execute(
                self.request(Method::GET, "/glossary/glossary-entries")
                    .query(&[
                        ("source_language", pair.source.as_str()),
                        ("target_language", pair.target.as_str()),
                    ]),
            )
            .await?;
        Ok(wire.entries)
    }

    async fn add_glossary_entry(&self, entry: &GlossaryEntry) -> AppResult<Ack> {
        self.execute(
            self.request(Method::POST, "/glossary/add-glossary-entry")
                .json(entry),
        )
        .await
    }

    async fn edit_glossary_entry(&self, edit: &GlossaryEdit) -> AppResult<Ack> {
        self.execute(
            self.request(Method::PUT, "/glossary/edit-glossary-entry")
                .json(edit),
        )
        .await
    }

    async fn delete_glossary_entry(&self, source: &str, pair: &LanguagePair) -> AppResult<Ack> {
        let body = DeleteGlossaryWire {
            source,
            source_language: &pair.source,
            target_language: &pair.target,
        };
        self.execute(
            self.request(Method::DELETE, "/glossary/delete-glossary-entry")
                .json(&body),
        )
        .await
    }
}
