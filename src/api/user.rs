//! `/user` endpoints.

use async_trait::async_trait;
use reqwest::Method;

use crate::api::{AccountApi, ApiClient};
use crate::shared::error::AppResult;
use crate::shared::types::UserDetails;

#[async_trait]
impl AccountApi for ApiClient {
    async fn user_details(&self) -> AppResult<UserDetails> {
        self.execute(self.request(Method::GET, "/user/details")).await
    }
}
