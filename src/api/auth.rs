//! Session token storage.
//!
//! The web frontend rides on backend session cookies; the desktop/CLI client
//! keeps its session token in the OS keyring instead.

use keyring::Entry;

use crate::shared::error::AppResult;

const KEYRING_SERVICE: &str = "translate-prompt";
const KEYRING_USER: &str = "session";

pub struct SessionStore;

impl SessionStore {
    fn entry() -> AppResult<Entry> {
        Ok(Entry::new(KEYRING_SERVICE, KEYRING_USER)?)
    }

    /// The stored session token, if any.
    pub fn load() -> AppResult<Option<String>> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn store(token: &str) -> AppResult<()> {
        Ok(Self::entry()?.set_password(token)?)
    }

    pub fn clear() -> AppResult<()> {
        match Self::entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_authenticated() -> bool {
        matches!(Self::load(), Ok(Some(_)))
    }
}
