use serenity::http::HttpError;
use thiserror::Error;

/// Failures of Discord's native moderation primitives.
#[derive(Error, Debug)]
pub enum PlatformActionError {
    /// Discord refused the action with 403, usually because the bot's role is too low
    /// or it lacks Ban Members.
    #[error("I don't have permission to ban that member")]
    MissingPermissions,

    /// No guild member matched the nickname that was searched for.
    #[error("could not find Discord member with nickname '{0}'")]
    MemberNotFound(String),

    /// Any other Discord API failure. Boxed due to size.
    #[error("{0}")]
    Discord(Box<serenity::Error>),
}

/// Maps a Discord 403 to `MissingPermissions`, everything else is kept as-is.
impl From<serenity::Error> for PlatformActionError {
    fn from(err: serenity::Error) -> Self {
        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
            if response.status_code.as_u16() == 403 {
                return Self::MissingPermissions;
            }
        }

        Self::Discord(Box::new(err))
    }
}
