use thiserror::Error;

use crate::model::permission::PermissionTier;

/// Errors raised while validating a slash command invocation.
///
/// Messages are complete sentences because they are shown to the invoking user as-is.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Caller lacks the role tier the command requires.
    ///
    /// Reported to the caller and logged at info level only; not a system error.
    #[error("You need {0} permissions to use this command.")]
    PermissionDenied(PermissionTier),

    /// Command was invoked outside of a server.
    #[error("Use this command in a server.")]
    NotInGuild,

    /// An option was missing, blank, or out of range.
    #[error("{0}")]
    InvalidArgument(String),

    /// Discord delivered a command name that is not registered by this bot.
    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),
}
