//! Environment-based bot configuration.

use crate::error::config::ConfigError;
use crate::model::permission::PermissionPolicy;

/// Immutable settings loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,

    pub roblox_api_key: String,
    pub universe_id: String,

    pub verification_role_id: u64,

    /// Optional permission tier role IDs, `0` when unset
    pub mod_role_id: u64,
    pub supermod_role_id: u64,
    pub admin_role_id: u64,

    /// Link included in the DM sent to members before a Discord ban
    pub appeal_url: Option<String>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables are present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidEnvVar)` - A numeric variable failed to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));
        let optional_id = |name: &str| match get(name) {
            Some(value) => parse_id(name, value),
            None => Ok(0),
        };

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            roblox_api_key: required("ROBLOX_API_KEY")?,
            universe_id: required("UNIVERSE_ID")?,
            verification_role_id: parse_id(
                "VERIFICATION_ROLE_ID",
                required("VERIFICATION_ROLE_ID")?,
            )?,
            mod_role_id: optional_id("DISCORD_MOD_ROLE_ID")?,
            supermod_role_id: optional_id("DISCORD_SUPERMOD_ROLE_ID")?,
            admin_role_id: optional_id("DISCORD_ADMIN_ROLE_ID")?,
            appeal_url: get("APPEAL_URL"),
        })
    }

    /// Derives the role policy used by the permission evaluator.
    pub fn permission_policy(&self) -> PermissionPolicy {
        PermissionPolicy::new(self.mod_role_id, self.supermod_role_id, self.admin_role_id)
    }
}

fn parse_id(name: &str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        })
}
