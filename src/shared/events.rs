//! Application events and the notice (toast) surface.
//!
//! The UI shell subscribes to one event stream instead of polling component
//! state. `EventSink` is the seam: the desktop shell forwards events over its
//! IPC bridge, the CLI prints them, tests collect them.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::shared::error::AppError;
use crate::shared::settings::AppSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub enum NoticeLevel {
    Info,
    Error,
    /// 401 from the backend: rendered as a sign-in prompt, not a generic error.
    AuthRequired,
}

/// A dismissible notification. `id` lets the frontend dismiss individual
/// notices; `raised_at` is RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub struct Notice {
    pub id: String,
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
    pub raised_at: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            level,
            title: title.into(),
            body: body.into(),
            raised_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, body)
    }

    pub fn auth_required(body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::AuthRequired, "Authentication Required", body)
    }
}

/// Events emitted to the UI shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub enum AppEvent {
    /// The displayed translation changed (initial translation or refinement).
    TranslationUpdated {
        translation: String,
        conversation_id: Option<String>,
    },
    SettingsUpdated(AppSettings),
    NoticeRaised(Notice),
}

/// Emit an application event to whatever shell is listening.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AppEvent);
}

/// Raise a notice for a failed operation.
///
/// 401 is special-cased into a sign-in prompt; everything else becomes a
/// generic error notice titled after the operation that failed.
pub fn notify_failure(sink: &dyn EventSink, operation: &str, err: &AppError) {
    let notice = match err {
        AppError::Auth(_) => Notice::auth_required(
            "Create your personal glossary and unlock advanced features by signing up or logging in.",
        ),
        other => Notice::error(operation.to_string(), other.to_string()),
    };
    sink.emit(AppEvent::NoticeRaised(notice));
}

/// Sink that prints events to stdout/stderr. Used by the CLI shell.
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&self, event: AppEvent) {
        match event {
            AppEvent::TranslationUpdated { translation, .. } => {
                println!("{}", translation);
            }
            AppEvent::SettingsUpdated(settings) => {
                println!(
                    "[Settings] Saved ({} -> {})",
                    settings.preferences.default_source_lang,
                    settings.preferences.default_target_lang
                );
            }
            AppEvent::NoticeRaised(notice) => match notice.level {
                NoticeLevel::Info => println!("[Notice] {}: {}", notice.title, notice.body),
                NoticeLevel::Error => eprintln!("[Error] {}: {}", notice.title, notice.body),
                NoticeLevel::AuthRequired => {
                    eprintln!("[Sign in required] {}", notice.body);
                    eprintln!("Run `translate-prompt login --token <token>` to authenticate.");
                }
            },
        }
    }
}

/// Sink that records every event. For tests and headless embedding.
#[derive(Default)]
pub struct CollectingSink {
    events: std::sync::Mutex<Vec<AppEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().expect("event sink poisoned").clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                AppEvent::NoticeRaised(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: AppEvent) {
        self.events.lock().expect("event sink poisoned").push(event);
    }
}
