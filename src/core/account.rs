//! Account details read surface.

use std::sync::Arc;

use crate::api::AccountApi;
use crate::shared::error::AppResult;
use crate::shared::events::{notify_failure, EventSink};
use crate::shared::types::UserDetails;

pub struct AccountService {
    api: Arc<dyn AccountApi>,
    sink: Arc<dyn EventSink>,
}

impl AccountService {
    pub fn new(api: Arc<dyn AccountApi>, sink: Arc<dyn EventSink>) -> Self {
        Self { api, sink }
    }

    pub async fn fetch(&self) -> AppResult<UserDetails> {
        match self.api.user_details().await {
            Ok(details) => Ok(details),
            Err(err) => {
                eprintln!("[Account] fetch failed: {}", err);
                notify_failure(self.sink.as_ref(), "Load account details failed", &err);
                Err(err)
            }
        }
    }
}
