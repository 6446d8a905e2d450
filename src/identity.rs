use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::models::IdentityUser;

/// Read side of the external authentication provider: given a stable user
/// id, fetch the extended profile or nothing.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn fetch_user(&self, user_id: &str) -> Result<Option<IdentityUser>>;
}

/// HTTP client for the provider's user API, authenticated with the
/// server-side API key.
pub struct IdentityApi {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityApi {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityApi {
    async fn fetch_user(&self, user_id: &str) -> Result<Option<IdentityUser>> {
        let url = format!("{}/v1/users/{}", self.base_url, user_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Identity provider request failed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let user = response
            .error_for_status()
            .context("Identity provider rejected the request")?
            .json::<IdentityUser>()
            .await
            .context("Invalid identity provider response")?;

        Ok(Some(user))
    }
}
