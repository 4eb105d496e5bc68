//! Client-side application core: session orchestration, detection, and the
//! editable knowledge stores.

pub mod account;
pub mod detection;
pub mod session;
pub mod stores;
pub mod suggestions;
