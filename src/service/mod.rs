//! Business logic of the moderation bot.
//!
//! - **Permission** (`permission`) - role tier evaluation
//! - **Roblox** (`roblox`) - Open Cloud client
//! - **Member lookup** (`member_lookup`) - guild member search rules
//! - **Moderation** (`moderation`) - the gameban / discordban / banboth workflows
//!
//! Services talk to the outside world only through the `RobloxApi` and
//! `GuildModeration` traits, implemented over reqwest and Serenity respectively.

pub mod member_lookup;
pub mod moderation;
pub mod permission;
pub mod roblox;

#[cfg(test)]
mod test;
