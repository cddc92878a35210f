//! Validated arguments and outcomes of the moderation commands.

use crate::error::{platform::PlatformActionError, roblox::RobloxError};
use crate::model::{member::MemberProfile, restriction::RestrictionDuration};

/// Discord accepts at most 7 days of message history deletion on ban.
pub const MAX_DELETE_MESSAGE_DAYS: u8 = 7;

/// Who a game ban targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameBanTarget {
    /// Numeric Roblox user ID, used as-is
    UserId(u64),
    /// Roblox username, resolved before the restriction call
    Username(String),
}

/// Arguments of `/gameban`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameBanRequest {
    pub target: GameBanTarget,
    pub duration: RestrictionDuration,
    pub display_reason: String,
    pub private_reason: String,
    pub exclude_alt_accounts: bool,
}

/// Arguments of `/discordban`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordBanRequest {
    pub target: MemberProfile,
    pub reason: String,
    pub delete_message_days: u8,
}

/// Arguments of `/banboth`.
#[derive(Debug, Clone, PartialEq)]
pub struct BanBothRequest {
    /// Name shared by the Roblox account and the Discord member
    pub nickname: String,
    pub duration: RestrictionDuration,
    pub display_reason: String,
    pub private_reason: String,
    pub exclude_alt_accounts: bool,
    pub delete_message_days: u8,
}

/// Successful game ban.
#[derive(Debug, Clone, PartialEq)]
pub struct GameBanOutcome {
    pub user_id: u64,
    pub duration: RestrictionDuration,
}

impl GameBanOutcome {
    pub fn reply(&self) -> String {
        format!(
            "✅ Applied game-join restriction to Roblox user ID {} for {}.",
            self.user_id, self.duration
        )
    }
}

/// Result of each half of `/banboth`, reported independently.
#[derive(Debug)]
pub struct BanBothOutcome {
    /// Restricted Roblox user ID, or why the Roblox half failed
    pub roblox: Result<u64, RobloxError>,
    /// Banned member, or why the Discord half failed
    pub discord: Result<MemberProfile, PlatformActionError>,
}

impl BanBothOutcome {
    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.roblox.is_ok() && self.discord.is_ok()
    }

    /// One sentence per platform, e.g. `Roblox: restricted. Discord: banned.`
    pub fn reply(&self) -> String {
        let roblox = match &self.roblox {
            Ok(_) => "restricted".to_string(),
            Err(err) => format!("failed ({})", err),
        };
        let discord = match &self.discord {
            Ok(_) => "banned".to_string(),
            Err(err) => format!("failed ({})", err),
        };

        format!("Roblox: {}. Discord: {}.", roblox, discord)
    }
}

/// Clamps the requested deletion window into Discord's accepted range.
pub fn clamp_delete_message_days(days: i64) -> u8 {
    days.clamp(0, MAX_DELETE_MESSAGE_DAYS as i64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> MemberProfile {
        MemberProfile {
            user_id: 42,
            display_name: None,
            nick: Some("ExamplePlayer".to_string()),
            name: "example_player".to_string(),
        }
    }

    #[test]
    fn ban_both_reply_reports_full_success() {
        let outcome = BanBothOutcome {
            roblox: Ok(123456),
            discord: Ok(member()),
        };

        assert!(outcome.is_complete());
        assert_eq!(outcome.reply(), "Roblox: restricted. Discord: banned.");
    }

    #[test]
    fn ban_both_reply_reports_each_half_distinctly() {
        let outcome = BanBothOutcome {
            roblox: Err(RobloxError::Restriction {
                status: 403,
                body: "forbidden".to_string(),
            }),
            discord: Ok(member()),
        };

        assert!(!outcome.is_complete());
        assert_eq!(
            outcome.reply(),
            "Roblox: failed (HTTP 403: forbidden). Discord: banned."
        );

        let outcome = BanBothOutcome {
            roblox: Ok(123456),
            discord: Err(PlatformActionError::MissingPermissions),
        };
        assert_eq!(
            outcome.reply(),
            "Roblox: restricted. Discord: failed (I don't have permission to ban that member)."
        );
    }

    #[test]
    fn clamps_delete_message_days() {
        assert_eq!(clamp_delete_message_days(-3), 0);
        assert_eq!(clamp_delete_message_days(3), 3);
        assert_eq!(clamp_delete_message_days(30), 7);
    }

    #[test]
    fn game_ban_reply_names_user_and_duration() {
        let outcome = GameBanOutcome {
            user_id: 123456,
            duration: RestrictionDuration::Seconds(60),
        };

        assert_eq!(
            outcome.reply(),
            "✅ Applied game-join restriction to Roblox user ID 123456 for 60 seconds."
        );
    }
}
