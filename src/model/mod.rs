//! Domain models shared by the service and bot layers.
//!
//! These types carry no Serenity or HTTP handles, only plain data, so that the moderation
//! workflows can be driven from tests without a Discord connection.

pub mod caller;
pub mod command;
pub mod member;
pub mod permission;
pub mod restriction;
