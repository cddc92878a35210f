//! Discord side of the bot.
//!
//! The gateway client dispatches `ready` and `interaction_create` events to
//! [`handler::Handler`]. Slash commands are defined in [`commands`] and act on the
//! invoking guild through [`guild::SerenityGuild`].
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild and channel data used to find the `logs` channel
//! - `GUILD_MEMBERS` - Member list used by `/banboth` (privileged intent)

pub mod commands;
pub mod guild;
pub mod handler;
pub mod start;
