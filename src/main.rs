mod bot;
mod config;
mod error;
mod logging;
mod model;
mod service;
mod startup;
mod state;

use crate::config::Config;
use crate::error::AppError;
use crate::state::BotState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let log_relay = logging::init();

    let config = Config::from_env()
        .inspect_err(|e| tracing::error!("Failed to load configuration: {}", e))?;

    tracing::info!(
        "Configured for universe {} (verification role {})",
        config.universe_id,
        config.verification_role_id
    );

    let http_client = startup::setup_reqwest_client()?;
    let state = BotState::new(&config, http_client, log_relay);

    let client = bot::start::init_bot(&config, state).await?;
    bot::start::start_bot(client).await
}
