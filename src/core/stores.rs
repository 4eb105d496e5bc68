//! Editable knowledge stores (glossary terms and rules).
//!
//! Each editor caches the backend's entry list for one language pair and
//! pushes mutations through the API before reloading. The enum registry keeps
//! dispatch static while letting the management surface treat the stores
//! uniformly.

pub mod glossary;
pub mod rules;

use enum_dispatch::enum_dispatch;

pub use glossary::GlossaryEditor;
pub use rules::RulesEditor;

/// Uniform surface over the editable stores.
#[enum_dispatch]
pub trait StoreInfo {
    /// Stable identifier used by the CLI (`glossary`, `rules`).
    fn id(&self) -> &'static str;
    /// Human-readable name for listings.
    fn label(&self) -> &'static str;
    /// Number of cached entries from the last reload.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[enum_dispatch(StoreInfo)]
pub enum EditorStore {
    Glossary(GlossaryEditor),
    Rules(RulesEditor),
}

/// Deletion gate. Destructive operations ask before sending anything; a
/// declined confirmation must not issue a request.
pub trait ConfirmDelete {
    fn confirm(&self, description: &str) -> bool;
}

/// Fixed-answer gate for tests and `--yes` mode.
pub struct AlwaysAnswer(pub bool);

impl ConfirmDelete for AlwaysAnswer {
    fn confirm(&self, _description: &str) -> bool {
        self.0
    }
}
