//! Test factory for creating Serenity User objects.

use serenity::all::User;

/// Creates a test Serenity User.
///
/// Uses the post-2023 username format (discriminator `"0"`), so the resulting user has
/// no discriminator and an optional profile display name (`global_name`).
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Account name
/// - `global_name` - Optional profile display name
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, username: &str, global_name: Option<&str>) -> User {
    serde_json::from_value(user_json(user_id, username, global_name))
        .expect("Failed to create test user - invalid JSON structure")
}

pub(crate) fn user_json(
    user_id: u64,
    username: &str,
    global_name: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0",
        "global_name": global_name,
        "avatar": null,
        "bot": false,
    })
}
