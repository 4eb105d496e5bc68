//! User settings persistence.
//!
//! The client keeps exactly two durable preference strings: the last chosen
//! source and target language codes. They are read at startup and written on
//! every user-driven language change, mirroring the browser-local storage of
//! the web frontend.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs;
use ts_rs::TS;

use crate::shared::error::{AppError, AppResult};
use crate::shared::events::{AppEvent, EventSink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub struct AppSettings {
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/bindings.ts")]
pub struct UserPreferences {
    pub default_source_lang: String,
    pub default_target_lang: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            preferences: UserPreferences {
                default_source_lang: "en".to_string(),
                default_target_lang: "es".to_string(),
            },
        }
    }
}

impl AppSettings {
    pub fn settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "translateprompt", "translate-prompt")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Io("Failed to determine config directory".to_string()))
    }

    pub async fn load() -> AppResult<Self> {
        Self::load_from(&Self::settings_path()?).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to_disk(path).await?;
            return Ok(settings);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::Io(format!("Failed to parse settings: {}", e)))
    }

    async fn save_to_disk(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Io(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content)
            .await
            .map_err(|e| AppError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Save settings to disk and emit the update event.
    pub async fn save(&self, sink: &dyn EventSink) -> AppResult<()> {
        self.save_to(&Self::settings_path()?, sink).await
    }

    pub async fn save_to(&self, path: &Path, sink: &dyn EventSink) -> AppResult<()> {
        self.save_to_disk(path).await?;
        sink.emit(AppEvent::SettingsUpdated(self.clone()));
        Ok(())
    }
}
