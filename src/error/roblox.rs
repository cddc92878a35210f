use thiserror::Error;

/// Failures of the Roblox Open Cloud calls.
#[derive(Error, Debug)]
pub enum RobloxError {
    /// Username lookup failed.
    ///
    /// Covers unknown usernames as well as non-200 responses and transport failures of
    /// the lookup endpoint. Always carries the username that was attempted.
    #[error("could not resolve Roblox username '{username}' ({reason})")]
    Resolution {
        /// The username that was looked up
        username: String,
        /// Why the lookup did not produce a user ID
        reason: String,
    },

    /// The restriction endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Restriction {
        /// HTTP status code returned by Open Cloud
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The restriction request never produced a response.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Restriction duration was neither `-1` nor a positive number of seconds.
    #[error("duration must be -1 (forever) or a positive number of seconds, got {0}")]
    InvalidDuration(i64),
}
