//! State shared by every event handler.
//!
//! `BotState` is built once in `main` and moved into the Serenity event handler. Every
//! field is cheap to clone: the Roblox client wraps a `reqwest::Client` (an `Arc`
//! internally) and the log relay is itself a shared handle.

use crate::config::Config;
use crate::logging::relay::LogRelay;
use crate::model::permission::PermissionPolicy;
use crate::service::roblox::RobloxClient;

#[derive(Clone)]
pub struct BotState {
    /// Open Cloud client carrying the API key.
    pub roblox: RobloxClient,

    /// Role tiers allowed to run moderation commands.
    pub policy: PermissionPolicy,

    /// Universe every game restriction applies to.
    pub universe_id: String,

    /// Optional link appended to the DM sent before a Discord ban.
    pub appeal_url: Option<String>,

    /// Relay bound to the guild's `logs` channel once the bot is ready.
    pub log_relay: LogRelay,
}

impl BotState {
    /// Creates the bot state from loaded configuration.
    ///
    /// # Arguments
    /// - `config` - Validated configuration
    /// - `http_client` - Shared HTTP client for outbound Roblox calls
    /// - `log_relay` - Relay created by `logging::init`
    pub fn new(config: &Config, http_client: reqwest::Client, log_relay: LogRelay) -> Self {
        Self {
            roblox: RobloxClient::new(http_client, config.roblox_api_key.clone()),
            policy: config.permission_policy(),
            universe_id: config.universe_id.clone(),
            appeal_url: config.appeal_url.clone(),
            log_relay,
        }
    }
}
