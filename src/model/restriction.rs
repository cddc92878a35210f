use std::fmt;

use serde::Serialize;

use crate::error::roblox::RobloxError;

/// How long a game-join restriction lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionDuration {
    Permanent,
    Seconds(u64),
}

impl RestrictionDuration {
    /// Parses the command-option form: `-1` for permanent, otherwise positive seconds.
    ///
    /// # Returns
    /// - `Ok(RestrictionDuration)` - Valid duration
    /// - `Err(RobloxError::InvalidDuration)` - Zero or a negative value other than `-1`
    pub fn from_seconds(seconds: i64) -> Result<Self, RobloxError> {
        match seconds {
            -1 => Ok(Self::Permanent),
            s if s > 0 => Ok(Self::Seconds(s as u64)),
            s => Err(RobloxError::InvalidDuration(s)),
        }
    }

    /// Open Cloud duration string (`"3600s"`), `None` for permanent restrictions.
    pub fn as_api_string(&self) -> Option<String> {
        match self {
            Self::Permanent => None,
            Self::Seconds(seconds) => Some(format!("{}s", seconds)),
        }
    }
}

impl fmt::Display for RestrictionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permanent => write!(f, "forever"),
            Self::Seconds(seconds) => write!(f, "{} seconds", seconds),
        }
    }
}

/// Outbound game-join restriction for one user in one universe.
///
/// Constructed per command, sent once and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RestrictionRequest {
    pub universe_id: String,
    pub user_id: u64,
    /// `true` restricts the user, `false` lifts the restriction
    pub active: bool,
    pub duration: RestrictionDuration,
    /// Reason shown to the restricted player
    pub display_reason: String,
    /// Moderator-only reason
    pub private_reason: String,
    pub exclude_alt_accounts: bool,
}

impl RestrictionRequest {
    /// Request body for `PATCH .../user-restrictions/{user}?updateMask=gameJoinRestriction`.
    pub fn body(&self) -> RestrictionBody<'_> {
        RestrictionBody {
            game_join_restriction: GameJoinRestriction {
                active: self.active,
                duration: self.duration.as_api_string(),
                display_reason: &self.display_reason,
                private_reason: &self.private_reason,
                exclude_alt_accounts: self.exclude_alt_accounts,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionBody<'a> {
    game_join_restriction: GameJoinRestriction<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameJoinRestriction<'a> {
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    display_reason: &'a str,
    private_reason: &'a str,
    exclude_alt_accounts: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(duration: RestrictionDuration) -> RestrictionRequest {
        RestrictionRequest {
            universe_id: "987654".to_string(),
            user_id: 123456,
            active: true,
            duration,
            display_reason: "Exploiting".to_string(),
            private_reason: "Speed hacks (via Discord by mod)".to_string(),
            exclude_alt_accounts: false,
        }
    }

    /// Tests parsing of the duration option.
    ///
    /// Expected: -1 is permanent, positive is seconds, 0 and other negatives rejected
    #[test]
    fn parses_duration_option() {
        assert_eq!(
            RestrictionDuration::from_seconds(-1).unwrap(),
            RestrictionDuration::Permanent
        );
        assert_eq!(
            RestrictionDuration::from_seconds(3600).unwrap(),
            RestrictionDuration::Seconds(3600)
        );
        assert!(matches!(
            RestrictionDuration::from_seconds(0),
            Err(RobloxError::InvalidDuration(0))
        ));
        assert!(matches!(
            RestrictionDuration::from_seconds(-5),
            Err(RobloxError::InvalidDuration(-5))
        ));
    }

    /// Tests the Open Cloud body for a permanent restriction.
    ///
    /// Expected: camelCase fields, no duration key
    #[test]
    fn permanent_body_omits_duration() {
        let body = serde_json::to_value(request(RestrictionDuration::Permanent).body()).unwrap();

        assert_eq!(
            body,
            json!({
                "gameJoinRestriction": {
                    "active": true,
                    "displayReason": "Exploiting",
                    "privateReason": "Speed hacks (via Discord by mod)",
                    "excludeAltAccounts": false,
                }
            })
        );
    }

    /// Tests the Open Cloud body for a timed restriction.
    ///
    /// Expected: duration rendered as "<seconds>s"
    #[test]
    fn timed_body_includes_duration_string() {
        let body =
            serde_json::to_value(request(RestrictionDuration::Seconds(86400)).body()).unwrap();

        assert_eq!(body["gameJoinRestriction"]["duration"], "86400s");
    }
}
