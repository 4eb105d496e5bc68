//! Command-line shell for the Translate Prompt client.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Select};

use translate_prompt::api::auth::SessionStore;
use translate_prompt::api::ApiClient;
use translate_prompt::core::account::AccountService;
use translate_prompt::core::detection::AutoDetector;
use translate_prompt::core::session::TranslationSession;
use translate_prompt::core::stores::{
    AlwaysAnswer, ConfirmDelete, EditorStore, GlossaryEditor, RulesEditor, StoreInfo,
};
use translate_prompt::core::suggestions::SuggestionTracker;
use translate_prompt::shared::error::{AppError, AppResult};
use translate_prompt::shared::events::{CollectingSink, EventSink, StdoutSink};
use translate_prompt::shared::languages::{is_known_code, language_name, pair_label, FEATURED};
use translate_prompt::shared::settings::AppSettings;
use translate_prompt::shared::types::{Improvement, LanguagePair, AUTO_SOURCE};

#[derive(Parser)]
#[command(name = "translate-prompt", version, about = "Translation that learns from your feedback")]
struct Cli {
    /// Source language code, or "auto" to detect.
    #[arg(long, global = true)]
    from: Option<String>,

    /// Target language code.
    #[arg(long, global = true)]
    to: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a piece of text once.
    Translate { text: String },
    /// Interactive translate/refine session with glossary suggestions.
    Session,
    /// Manage forced term mappings.
    Glossary {
        #[command(subcommand)]
        action: GlossaryAction,
    },
    /// Manage free-text translation rules.
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Overview of the editable stores for the active language pair.
    Manage,
    /// Show account, quota and subscription details.
    Account,
    /// List the featured language codes.
    Languages,
    /// Store a backend session token in the OS keyring.
    Login {
        #[arg(long)]
        token: String,
    },
    /// Remove the stored session token.
    Logout,
}

#[derive(Subcommand)]
enum GlossaryAction {
    List,
    Add {
        source: String,
        target: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    Edit {
        old_source: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        target: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    Delete {
        source: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    List,
    Add { text: String },
    Edit { old_text: String, new_text: String },
    Delete {
        text: String,
        #[arg(long)]
        yes: bool,
    },
}

/// Deletion gate backed by an interactive prompt.
struct PromptGate;

impl ConfirmDelete for PromptGate {
    fn confirm(&self, description: &str) -> bool {
        Confirm::new()
            .with_prompt(description)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Command::Login { token } => {
            SessionStore::store(&token)?;
            println!("Session token stored.");
            return Ok(());
        }
        Command::Logout => {
            SessionStore::clear()?;
            println!("Session token removed.");
            return Ok(());
        }
        Command::Languages => {
            for code in FEATURED {
                println!("{}  {}", code, language_name(code).unwrap_or("?"));
            }
            return Ok(());
        }
        _ => {}
    }

    let settings = AppSettings::load().await.unwrap_or_default();
    let pair = resolve_pair(&settings, cli.from.as_deref(), cli.to.as_deref())?;
    persist_language_choice(&settings, &pair).await;

    let api = Arc::new(ApiClient::from_env()?);

    match cli.command {
        Command::Translate { text } => translate_once(api, &text, &pair).await,
        Command::Session => interactive_session(api, pair).await,
        Command::Glossary { action } => run_glossary(api, pair, action).await,
        Command::Rules { action } => run_rules(api, pair, action).await,
        Command::Manage => run_manage(api, pair).await,
        Command::Account => run_account(api).await,
        Command::Login { .. } | Command::Logout | Command::Languages => unreachable!(),
    }
}

/// Resolve the active pair from flags, falling back to saved preferences.
fn resolve_pair(
    settings: &AppSettings,
    from: Option<&str>,
    to: Option<&str>,
) -> AppResult<LanguagePair> {
    let source = from.unwrap_or(&settings.preferences.default_source_lang);
    let target = to.unwrap_or(&settings.preferences.default_target_lang);
    if !is_known_code(source) {
        return Err(AppError::Validation(format!(
            "Unknown source language code: {}",
            source
        )));
    }
    if target == AUTO_SOURCE || !is_known_code(target) {
        return Err(AppError::Validation(format!(
            "Unknown target language code: {}",
            target
        )));
    }
    LanguagePair::new(source, target)
}

/// Remember the selection for next time. Best-effort: a failed write is not
/// worth interrupting the actual command for.
async fn persist_language_choice(settings: &AppSettings, pair: &LanguagePair) {
    if settings.preferences.default_source_lang == pair.source
        && settings.preferences.default_target_lang == pair.target
    {
        return;
    }
    let mut updated = settings.clone();
    updated.preferences.default_source_lang = pair.source.clone();
    updated.preferences.default_target_lang = pair.target.clone();
    let quiet = CollectingSink::new();
    if let Err(err) = updated.save(&quiet).await {
        eprintln!("[Settings] save failed: {}", err);
    }
}

async fn translate_once(api: Arc<ApiClient>, text: &str, pair: &LanguagePair) -> AppResult<()> {
    let sink: Arc<dyn EventSink> = Arc::new(StdoutSink);
    let session = TranslationSession::new(api, sink);

    if pair.is_auto_source() {
        let mut detector = AutoDetector::default();
        if let Some(code) = detector.observe(text) {
            eprintln!("[Detect] source looks like {}", language_name(code).unwrap_or(code));
        }
    }

    // The stdout sink prints the translation when it arrives.
    session.translate(text, pair).await?;
    Ok(())
}

async fn interactive_session(api: Arc<ApiClient>, pair: LanguagePair) -> AppResult<()> {
    let sink: Arc<dyn EventSink> = Arc::new(StdoutSink);
    let session = TranslationSession::new(api.clone(), sink.clone());
    let tracker = SuggestionTracker::new(api, sink, session.conversation());
    let mut detector = AutoDetector::default();

    println!("Session: {}", pair_label(&pair.source, &pair.target));

    loop {
        let text: String = Input::new()
            .with_prompt("Text to translate (empty to quit)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::Io(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(());
        }

        if pair.is_auto_source() {
            if let Some(code) = detector.observe(&text) {
                println!("[Detect] source looks like {}", language_name(code).unwrap_or(code));
            }
        }

        if session.translate(&text, &pair).await.is_err() {
            continue;
        }

        loop {
            let choice = Select::new()
                .with_prompt("Next")
                .items(&["Refine translation", "Review suggestions", "New text", "Quit"])
                .default(0)
                .interact()
                .map_err(|e| AppError::Io(e.to_string()))?;
            match choice {
                0 => {
                    let feedback: String = Input::new()
                        .with_prompt("Feedback")
                        .interact_text()
                        .map_err(|e| AppError::Io(e.to_string()))?;
                    if session.refine(&feedback, &pair).await.is_ok() {
                        // Refinement feedback is what generates suggestions.
                        let _ = tracker.load_improvements().await;
                        offer_suggestions(&tracker).await?;
                    }
                }
                1 => {
                    let _ = tracker.load_improvements().await;
                    offer_suggestions(&tracker).await?;
                }
                2 => break,
                _ => return Ok(()),
            }
        }
    }
}

async fn offer_suggestions(tracker: &SuggestionTracker) -> AppResult<()> {
    loop {
        let suggestions = tracker.suggestions();
        if suggestions.is_empty() {
            println!("No suggestions right now.");
            return Ok(());
        }

        let mut items: Vec<String> = suggestions.iter().map(Improvement::summary).collect();
        items.push("Back".to_string());
        let choice = Select::new()
            .with_prompt("Apply a suggestion?")
            .items(&items)
            .default(items.len() - 1)
            .interact()
            .map_err(|e| AppError::Io(e.to_string()))?;
        if choice == suggestions.len() {
            return Ok(());
        }
        let _ = tracker.apply(&suggestions[choice]).await;
    }
}

async fn run_glossary(
    api: Arc<ApiClient>,
    pair: LanguagePair,
    action: GlossaryAction,
) -> AppResult<()> {
    let sink: Arc<dyn EventSink> = Arc::new(StdoutSink);
    let editor = GlossaryEditor::new(api, sink, pair);

    match action {
        GlossaryAction::List => {
            editor.reload().await?;
            let entries = editor.entries();
            if entries.is_empty() {
                println!("No glossary entries for {}.", pair_label(&editor.pair().source, &editor.pair().target));
            }
            for entry in entries {
                if entry.note.is_empty() {
                    println!("{} -> {}", entry.source, entry.target);
                } else {
                    println!("{} -> {}  ({})", entry.source, entry.target, entry.note);
                }
            }
        }
        GlossaryAction::Add { source, target, note } => {
            editor.add(&source, &target, &note).await?;
        }
        GlossaryAction::Edit {
            old_source,
            source,
            target,
            note,
        } => {
            let new_source = source.unwrap_or_else(|| old_source.clone());
            editor.edit(&old_source, &new_source, &target, &note).await?;
            println!("[Glossary] updated \"{}\"", new_source);
        }
        GlossaryAction::Delete { source, yes } => {
            let deleted = if yes {
                editor.delete(&source, &AlwaysAnswer(true)).await?
            } else {
                editor.delete(&source, &PromptGate).await?
            };
            if !deleted {
                println!("Not deleted.");
            }
        }
    }
    Ok(())
}

async fn run_rules(api: Arc<ApiClient>, pair: LanguagePair, action: RulesAction) -> AppResult<()> {
    let sink: Arc<dyn EventSink> = Arc::new(StdoutSink);
    let editor = RulesEditor::new(api, sink, pair);

    match action {
        RulesAction::List => {
            editor.reload().await?;
            let entries = editor.entries();
            if entries.is_empty() {
                println!("No rules for {}.", pair_label(&editor.pair().source, &editor.pair().target));
            }
            for entry in entries {
                println!("- {}", entry.text);
            }
        }
        RulesAction::Add { text } => {
            editor.add(&text).await?;
        }
        RulesAction::Edit { old_text, new_text } => {
            editor.edit(&old_text, &new_text).await?;
            println!("[Rules] updated \"{}\"", new_text);
        }
        RulesAction::Delete { text, yes } => {
            let deleted = if yes {
                editor.delete(&text, &AlwaysAnswer(true)).await?
            } else {
                editor.delete(&text, &PromptGate).await?
            };
            if !deleted {
                println!("Not deleted.");
            }
        }
    }
    Ok(())
}

async fn run_manage(api: Arc<ApiClient>, pair: LanguagePair) -> AppResult<()> {
    let sink: Arc<dyn EventSink> = Arc::new(StdoutSink);
    let glossary = GlossaryEditor::new(api.clone(), sink.clone(), pair.clone());
    let rules = RulesEditor::new(api, sink, pair.clone());
    glossary.reload().await?;
    rules.reload().await?;

    println!("Stores for {}:", pair_label(&pair.source, &pair.target));
    let stores: [EditorStore; 2] = [glossary.into(), rules.into()];
    for store in &stores {
        println!("  {:<10} {:>3} entr{}  (translate-prompt {} list)",
            store.label(),
            store.len(),
            if store.len() == 1 { "y" } else { "ies" },
            store.id(),
        );
    }
    Ok(())
}

async fn run_account(api: Arc<ApiClient>) -> AppResult<()> {
    let sink: Arc<dyn EventSink> = Arc::new(StdoutSink);
    let account = AccountService::new(api, sink);
    let details = account.fetch().await?;

    println!("User:          {}", details.user_id);
    println!("Tokens used:   {}", details.token_count);
    println!(
        "Quota:         {}/{} ({} remaining)",
        details.quota_used,
        details.quota_limit,
        details.quota_remaining()
    );
    println!(
        "Subscription:  {}",
        details.subscription_status.as_deref().unwrap_or("free")
    );
    if let Some(url) = &details.billing_portal_url {
        println!("Billing:       {}", url);
    }
    Ok(())
}
