//! `/graphs` endpoints: starting and refining a translation conversation,
//! plus the conversation-scoped improvement suggestions.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, TranslationApi};
use crate::shared::error::AppResult;
use crate::shared::types::{Ack, Improvement, LanguagePair};

/// Backend reply for both translate and refine.
///
/// A reply without `conversation_id` must not regress an already-adopted id;
/// the session controller enforces that.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateReply {
    pub response: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
struct TranslateWire<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_language: Option<&'a str>,
    target_language: &'a str,
}

#[derive(Serialize)]
struct RefineWire<'a> {
    message: &'a str,
    conversation_id: &'a str,
    source_language: &'a str,
    target_language: &'a str,
}

#[derive(Serialize)]
struct ApplyImprovementWire<'a> {
    improvement: &'a Improvement,
    conversation_id: &'a str,
}

#[async_trait]
impl TranslationApi for ApiClient {
    async fn translate(&self, text: &str, pair: &LanguagePair) -> AppResult<TranslateReply> {
        let body = TranslateWire {
            message: text,
            source_language: pair.wire_source(),
            target_language: &pair.target,
        };
        self.execute(self.request(Method::POST, "/graphs/translate").json(&body))
            .await
    }

    async fn refine(
        &self,
        feedback: &str,
        conversation_id: &str,
        pair: &LanguagePair,
    ) -> AppResult<TranslateReply> {
        let body = RefineWire {
            message: feedback,
            conversation_id,
            source_language: &pair.source,
            target_language: &pair.target,
        };
        self.execute(
            self.request(Method::POST, "/graphs/refine-translation")
                .json(&body),
        )
        .await
    }

    async fn improvements(&self, conversation_id: &str) -> AppResult<Vec<Improvement>> {
        let path = format!(
            "/glossary/glossary-improvements/{}",
            urlencoding::encode(conversation_id)
        );
        self.execute(self.request(Method::GET, &path)).await
    }

    async fn apply_improvement(
        &self,
        improvement: &Improvement,
        conversation_id: &str,
    ) -> AppResult<Ack> {
        let body = ApplyImprovementWire {
            improvement,
            conversation_id,
        };
        self.execute(
            self.request(Method::POST, "/glossary/apply-improvement")
                .json(&body),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_wire_omits_auto_source() {
        let pair = LanguagePair::new("auto", "en").unwrap();
        let wire = TranslateWire {
            message: "Dos cervezas, por favor",
            source_language: pair.wire_source(),
            target_language: &pair.target,
        };
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("source_language").is_none());
        assert_eq!(json["target_language"], "en");
    }

    #[test]
    fn translate_wire_keeps_explicit_source() {
        let pair = LanguagePair::new("es", "en").unwrap();
        let wire = TranslateWire {
            message: "Dos cervezas, por favor",
            source_language: pair.wire_source(),
            target_language: &pair.target,
        };
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["source_language"], "es");
    }

    #[test]
    fn reply_tolerates_missing_conversation_id() {
        let reply: TranslateReply =
            serde_json::from_str(r#"{"response": "Two beers, please"}"#).unwrap();
        assert_eq!(reply.response, "Two beers, please");
        assert_eq!(reply.conversation_id, None);
    }
}
