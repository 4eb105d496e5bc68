//! End-to-end session flow against a mock backend.

use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;

use translate_prompt::api::ApiClient;
use translate_prompt::core::session::{SessionState, TranslationSession};
use translate_prompt::core::suggestions::SuggestionTracker;
use translate_prompt::shared::error::AppError;
use translate_prompt::shared::events::{CollectingSink, NoticeLevel};
use translate_prompt::shared::types::{Improvement, LanguagePair};

fn harness(
    server: &mockito::ServerGuard,
) -> (TranslationSession, SuggestionTracker, Arc<CollectingSink>) {
    let api = Arc::new(ApiClient::new(server.url()).expect("client"));
    let sink = Arc::new(CollectingSink::new());
    let session = TranslationSession::new(api.clone(), sink.clone());
    let tracker = SuggestionTracker::new(api, sink.clone(), session.conversation());
    (session, tracker, sink)
}

fn pair() -> LanguagePair {
    LanguagePair::new("es", "en").unwrap()
}

#[tokio::test]
async fn cold_start_translate_refine_and_apply() {
    let mut server = mockito::Server::new_async().await;

    let translate = server
        .mock("POST", "/graphs/translate")
        .match_body(Matcher::Json(json!({
            "message": "Dos cervezas, por favor",
            "source_language": "es",
            "target_language": "en",
        })))
        .with_body(
            json!({"response": "Two beers, please", "conversation_id": "conv-1"}).to_string(),
        )
        .create_async()
        .await;

    let refine = server
        .mock("POST", "/graphs/refine-translation")
        .match_body(Matcher::Json(json!({
            "message": "more casual",
            "conversation_id": "conv-1",
            "source_language": "es",
            "target_language": "en",
        })))
        .with_body(json!({"response": "Two beers, please!"}).to_string())
        .create_async()
        .await;

    let improvements = server
        .mock("GET", "/glossary/glossary-improvements/conv-1")
        .with_body(
            json!([
                {"type": "glossary", "source": "cerveza", "target": "beer"},
                {"type": "rules", "text": "Keep an informal tone"},
            ])
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    let apply = server
        .mock("POST", "/glossary/apply-improvement")
        .match_body(Matcher::Json(json!({
            "improvement": {"type": "rules", "text": "Keep an informal tone"},
            "conversation_id": "conv-1",
        })))
        .with_body(json!({"message": "success"}).to_string())
        .create_async()
        .await;

    let (session, tracker, _) = harness(&server);
    assert_eq!(session.state(), SessionState::NoSession);

    let translated = session
        .translate("Dos cervezas, por favor", &pair())
        .await
        .unwrap();
    assert_eq!(translated, "Two beers, please");
    assert_eq!(session.state(), SessionState::Active);

    // Refinement keeps the adopted id even though the reply omits one.
    let refined = session.refine("more casual", &pair()).await.unwrap();
    assert_eq!(refined, "Two beers, please!");
    assert_eq!(session.conversation().current().as_deref(), Some("conv-1"));

    tracker.load_improvements().await.unwrap();
    assert_eq!(tracker.suggestions().len(), 2);

    let rule = Improvement::Rule {
        text: "Keep an informal tone".to_string(),
    };
    tracker.apply(&rule).await.unwrap();

    translate.assert_async().await;
    refine.assert_async().await;
    improvements.assert_async().await;
    apply.assert_async().await;
}

#[tokio::test]
async fn reloading_suggestions_is_idempotent() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/graphs/translate")
        .with_body(json!({"response": "Hello", "conversation_id": "conv-2"}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/glossary/glossary-improvements/conv-2")
        .with_body(json!([{"type": "rules", "text": "Use British spelling"}]).to_string())
        .expect(3)
        .create_async()
        .await;

    let (session, tracker, _) = harness(&server);
    session.translate("Hola", &pair()).await.unwrap();

    for _ in 0..3 {
        tracker.load_improvements().await.unwrap();
        assert_eq!(tracker.suggestions().len(), 1);
    }
}

#[tokio::test]
async fn unauthorized_apply_raises_sign_in_notice_and_keeps_list() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/graphs/translate")
        .with_body(json!({"response": "Hello", "conversation_id": "conv-3"}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/glossary/glossary-improvements/conv-3")
        .with_body(
            json!([{"type": "glossary", "source": "hola", "target": "hello"}]).to_string(),
        )
        .create_async()
        .await;
    server
        .mock("POST", "/glossary/apply-improvement")
        .with_status(401)
        .with_body(json!({"detail": "Not authenticated"}).to_string())
        .create_async()
        .await;

    let (session, tracker, sink) = harness(&server);
    session.translate("Hola", &pair()).await.unwrap();
    tracker.load_improvements().await.unwrap();

    let suggestion = tracker.suggestions()[0].clone();
    let err = tracker.apply(&suggestion).await.unwrap_err();
    assert!(matches!(err, AppError::Auth(_)));

    // The list stays put so the user can retry after signing in.
    assert_eq!(tracker.suggestions(), vec![suggestion]);
    let notices = sink.notices();
    assert!(notices
        .iter()
        .any(|n| n.level == NoticeLevel::AuthRequired));
}

#[tokio::test]
async fn backend_error_detail_is_flattened() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/graphs/translate")
        .with_status(422)
        .with_body(json!({"detail": "target_language is required"}).to_string())
        .create_async()
        .await;

    let (session, _, _) = harness(&server);
    let err = session.translate("Hola", &pair()).await.unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "target_language is required");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
