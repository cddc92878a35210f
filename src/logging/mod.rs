//! Tracing setup.
//!
//! Records go to stdout through the fmt layer and, once a `logs` channel has been found,
//! to Discord through the relay layer. Verbosity is controlled with `RUST_LOG`.

pub mod relay;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::logging::relay::LogRelay;

const DEFAULT_FILTER: &str = "neverhome_bot=info,serenity=warn";

/// Installs the global subscriber and returns the unbound Discord relay.
///
/// Must be called once, before the first record is emitted.
pub fn init() -> LogRelay {
    let relay = LogRelay::new();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(relay.layer())
        .init();

    relay
}
