//! Roblox Open Cloud client.
//!
//! Wraps the two remote calls the bot needs: username to user ID resolution and applying
//! a game-join restriction. Both are single-shot; a failed call is reported, never
//! retried.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serenity::async_trait;

use crate::error::roblox::RobloxError;
use crate::model::restriction::RestrictionRequest;

const USERS_API_URL: &str = "https://users.roblox.com";
const CLOUD_API_URL: &str = "https://apis.roblox.com";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);
const RESTRICTION_TIMEOUT: Duration = Duration::from_secs(20);

/// Operations against the external game platform.
#[async_trait]
pub trait RobloxApi: Send + Sync {
    /// Resolves a username to its positive numeric user ID.
    ///
    /// # Returns
    /// - `Ok(u64)` - The user ID of the first match
    /// - `Err(RobloxError::Resolution)` - Unknown username, non-200 response or transport failure
    async fn resolve_user_id(&self, username: &str) -> Result<u64, RobloxError>;

    /// Applies (or lifts) a game-join restriction.
    ///
    /// # Returns
    /// - `Ok(())` - Open Cloud answered with a 2xx status
    /// - `Err(RobloxError::Restriction)` - Non-success status, with status and body
    /// - `Err(RobloxError::Transport)` - No response received
    async fn apply_game_restriction(&self, request: &RestrictionRequest)
        -> Result<(), RobloxError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UsernameLookupRequest<'a> {
    usernames: [&'a str; 1],
    exclude_banned_users: bool,
}

#[derive(Deserialize)]
struct UsernameLookupResponse {
    #[serde(default)]
    data: Vec<UsernameMatch>,
}

#[derive(Deserialize)]
struct UsernameMatch {
    id: Option<i64>,
}

/// Open Cloud backed implementation of [`RobloxApi`].
#[derive(Clone)]
pub struct RobloxClient {
    http: reqwest::Client,
    api_key: String,
    users_url: String,
    cloud_url: String,
}

impl RobloxClient {
    /// Creates a client for the public Roblox endpoints.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `api_key` - Open Cloud API key sent as `x-api-key`
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self {
            http,
            api_key,
            users_url: USERS_API_URL.to_string(),
            cloud_url: CLOUD_API_URL.to_string(),
        }
    }

    /// Points the client at different hosts, e.g. a local test server.
    #[cfg(test)]
    pub fn with_base_urls(mut self, users_url: &str, cloud_url: &str) -> Self {
        self.users_url = users_url.trim_end_matches('/').to_string();
        self.cloud_url = cloud_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl RobloxApi for RobloxClient {
    async fn resolve_user_id(&self, username: &str) -> Result<u64, RobloxError> {
        let resolution = |reason: String| RobloxError::Resolution {
            username: username.to_string(),
            reason,
        };

        let response = self
            .http
            .post(format!("{}/v1/usernames/users", self.users_url))
            .header("x-api-key", &self.api_key)
            .timeout(LOOKUP_TIMEOUT)
            .json(&UsernameLookupRequest {
                usernames: [username],
                exclude_banned_users: false,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Roblox username lookup error for '{}': {}", username, e);
                resolution(e.to_string())
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Roblox username lookup failed for '{}': HTTP {} {}",
                username,
                status.as_u16(),
                body
            );
            return Err(resolution(format!("HTTP {}", status.as_u16())));
        }

        let payload: UsernameLookupResponse = response
            .json()
            .await
            .map_err(|e| resolution(format!("invalid response: {}", e)))?;

        let Some(user_id) = payload
            .data
            .first()
            .and_then(|user| user.id)
            .filter(|id| *id > 0)
        else {
            tracing::info!("Roblox username '{}' not found", username);
            return Err(resolution("not found".to_string()));
        };

        tracing::info!("Resolved Roblox username '{}' -> userId {}", username, user_id);

        Ok(user_id as u64)
    }

    async fn apply_game_restriction(
        &self,
        request: &RestrictionRequest,
    ) -> Result<(), RobloxError> {
        let url = format!(
            "{}/cloud/v2/universes/{}/user-restrictions/{}",
            self.cloud_url, request.universe_id, request.user_id
        );

        tracing::debug!(
            "Applying Roblox game-join restriction: userId={} duration={} excludeAlts={}",
            request.user_id,
            request.duration,
            request.exclude_alt_accounts
        );

        let response = self
            .http
            .patch(url)
            .header("x-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("updateMask", "gameJoinRestriction")])
            .timeout(RESTRICTION_TIMEOUT)
            .json(&request.body())
            .send()
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Roblox restriction network error for userId={}: {}",
                    request.user_id,
                    e
                )
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                "Roblox restriction applied successfully for userId={}",
                request.user_id
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            "Roblox restriction failed for userId={}: HTTP {} {}",
            request.user_id,
            status.as_u16(),
            body
        );

        Err(RobloxError::Restriction {
            status: status.as_u16(),
            body,
        })
    }
}
