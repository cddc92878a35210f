//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

use super::user::user_json;

/// Creates a test Serenity guild Member.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Account name
/// - `nick` - Optional guild nickname
/// - `global_name` - Optional profile display name
/// - `role_ids` - Roles the member holds in the guild
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::member::create_test_member;
///
/// let member = create_test_member(42, "example_player", Some("ExamplePlayer"), None, &[]);
/// assert_eq!(member.nick.as_deref(), Some("ExamplePlayer"));
/// ```
pub fn create_test_member(
    user_id: u64,
    username: &str,
    nick: Option<&str>,
    global_name: Option<&str>,
    role_ids: &[u64],
) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "guild_id": "100000000000000000",
        "user": user_json(user_id, username, global_name),
        "nick": nick,
        "avatar": null,
        "roles": roles,
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "permissions": null,
        "communication_disabled_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
