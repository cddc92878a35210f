//! Error types and user-facing reply mapping.
//!
//! This module provides the bot's error hierarchy. The `AppError` enum is the top-level
//! error type that wraps the domain-specific errors; command handlers convert it into the
//! ephemeral reply shown to the invoking moderator via [`AppError::user_message`].

pub mod command;
pub mod config;
pub mod platform;
pub mod roblox;

use thiserror::Error;

use crate::error::{
    command::CommandError, config::ConfigError, platform::PlatformActionError,
    roblox::RobloxError,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Only `ConfigErr` and
/// gateway failures from `DiscordErr` during startup end the process; everything raised
/// while handling an interaction is caught at the handler boundary and reported to the
/// caller.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Invocation rejected before any external call (permissions, arguments).
    #[error(transparent)]
    CommandErr(#[from] CommandError),

    /// Roblox Open Cloud lookup or restriction failure.
    #[error(transparent)]
    RobloxErr(#[from] RobloxError),

    /// Native Discord ban failure.
    #[error(transparent)]
    PlatformErr(#[from] PlatformActionError),

    /// HTTP client construction error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Builds the ephemeral reply text for a failed command.
    ///
    /// Command and platform errors are shown verbatim, Roblox errors keep their HTTP
    /// status and body so moderators can act on them. Transport and Discord errors are
    /// logged in full and replaced with a generic message.
    ///
    /// # Returns
    /// - Reply content for `EditInteractionResponse`
    pub fn user_message(&self) -> String {
        match self {
            Self::CommandErr(err) => err.to_string(),
            Self::RobloxErr(RobloxError::Resolution { username, .. }) => {
                format!("Could not resolve Roblox username '{}'.", username)
            }
            Self::RobloxErr(err) => format!("❌ Restriction failed: {}", err),
            Self::PlatformErr(err) => format!("❌ Failed to ban member: {}", err),
            err => {
                tracing::error!("Internal error while handling command: {}", err);
                "❌ Something went wrong while handling this command.".to_string()
            }
        }
    }
}
