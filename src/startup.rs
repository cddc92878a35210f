use std::time::Duration;

use crate::error::AppError;

/// Builds the shared HTTP client used for Roblox Open Cloud requests.
///
/// Redirects are disabled so the API key header is never forwarded to another host.
/// Per-request timeouts are set by the Roblox client itself; this only bounds the
/// connection phase.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Client ready to be shared
/// - `Err(AppError::ReqwestErr)` - TLS backend failed to initialize
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}
