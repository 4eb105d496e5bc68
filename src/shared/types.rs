//! Shared DTOs exchanged with the Translate Prompt backend and the frontend.
//!
//! Wire field names follow the backend API (snake_case, `message`/`response`
//! for translation payloads). TypeScript bindings are exported for the web
//! frontend; run `cargo test export_bindings` to regenerate them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::shared::error::{AppError, AppResult};

/// Sentinel source value meaning "let the client auto-detect".
pub const AUTO_SOURCE: &str = "auto";

/// A source/target language selection.
///
/// `source` may be the `"auto"` sentinel; `target` never is. Construct via
/// [`LanguagePair::new`] to keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> AppResult<Self> {
        let source = source.into();
        let target = target.into();
        if target == AUTO_SOURCE {
            return Err(AppError::Validation(
                "Target language cannot be 'auto'".to_string(),
            ));
        }
        if target.trim().is_empty() {
            return Err(AppError::Validation("Target language is required".to_string()));
        }
        Ok(Self { source, target })
    }

    pub fn is_auto_source(&self) -> bool {
        self.source == AUTO_SOURCE
    }

    /// Source code as sent on the wire: omitted entirely when auto.
    pub fn wire_source(&self) -> Option<&str> {
        if self.is_auto_source() {
            None
        } else {
            Some(&self.source)
        }
    }
}

/// A user-specific forced term mapping applied by the backend translator.
///
/// Keyed by `(source, source_language, target_language)`; renaming the
/// `source` term goes through the explicit old/new pair on the edit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub struct GlossaryEntry {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub note: String,
    pub source_language: String,
    pub target_language: String,
}

/// A free-text style/behaviour instruction scoped to a language pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub struct RuleEntry {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A backend-proposed glossary or rule addition distilled from refinement
/// feedback, awaiting explicit user approval.
///
/// Tagged union so apply-dispatch is an exhaustive match, not field sniffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type")]
#[ts(export, export_to = "bindings/bindings.ts")]
pub enum Improvement {
    #[serde(rename = "glossary")]
    Glossary {
        source: String,
        target: String,
        #[serde(default)]
        note: String,
    },
    #[serde(rename = "rules")]
    Rule { text: String },
}

impl Improvement {
    /// Short human-readable summary for notices and CLI listings.
    pub fn summary(&self) -> String {
        match self {
            Improvement::Glossary { source, target, .. } => {
                format!("glossary: \"{}\" -> \"{}\"", source, target)
            }
            Improvement::Rule { text } => format!("rule: {}", text),
        }
    }
}

/// Read-mostly account details shown on the settings/billing screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub struct UserDetails {
    pub user_id: String,
    pub token_count: i64,
    pub quota_used: i64,
    pub quota_limit: i64,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default)]
    pub billing_portal_url: Option<String>,
    #[serde(default)]
    pub lemonsqueezy_customer_id: Option<String>,
}

impl UserDetails {
    pub fn quota_remaining(&self) -> i64 {
        (self.quota_limit - self.quota_used).max(0)
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.subscription_status.as_deref(), Some("active"))
    }
}

/// Generic mutation acknowledgement from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub struct Ack {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
