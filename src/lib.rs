//! Translate Prompt client core.
//!
//! Human-in-the-loop translation: translate, refine with free-text feedback,
//! and curate the per-user glossary and rules the backend applies. This crate
//! holds the session/state machinery and the backend HTTP layer; `main.rs`
//! wraps it in a CLI shell.

pub mod api;
pub mod core;
pub mod shared;
