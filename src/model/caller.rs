use std::collections::{HashMap, HashSet};

use serenity::all::{Member, Role, RoleId};

/// The permission-relevant view of the member invoking a command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Caller {
    /// Discord user ID
    pub user_id: u64,
    /// Discord account name, used in audit reasons and logs
    pub name: String,
    /// IDs of every role the member holds
    pub role_ids: HashSet<u64>,
    /// Lower-cased names of those roles
    pub role_names: HashSet<String>,
    /// Whether the member has the native ADMINISTRATOR permission
    pub administrator: bool,
}

impl Caller {
    /// Builds a caller from an interaction member and the guild's role table.
    ///
    /// Interaction members carry their computed permissions; when those are absent the
    /// administrator flag is derived from the permissions of the member's roles. Roles
    /// missing from `guild_roles` still count by ID but contribute no name.
    ///
    /// # Arguments
    /// - `member` - The invoking guild member
    /// - `guild_roles` - All roles of the guild, keyed by ID
    pub fn from_member(member: &Member, guild_roles: &HashMap<RoleId, Role>) -> Self {
        let roles: Vec<&Role> = member
            .roles
            .iter()
            .filter_map(|id| guild_roles.get(id))
            .collect();

        let administrator = match member.permissions {
            Some(permissions) => permissions.administrator(),
            None => roles.iter().any(|role| role.permissions.administrator()),
        };

        Self {
            user_id: member.user.id.get(),
            name: member.user.name.clone(),
            role_ids: member.roles.iter().map(|id| id.get()).collect(),
            role_names: roles.iter().map(|role| role.name.to_lowercase()).collect(),
            administrator,
        }
    }

    #[cfg(test)]
    pub fn new(user_id: u64, name: &str) -> Self {
        Self {
            user_id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn with_role(mut self, role_id: u64, role_name: &str) -> Self {
        self.role_ids.insert(role_id);
        self.role_names.insert(role_name.to_lowercase());
        self
    }

    #[cfg(test)]
    pub fn with_administrator(mut self) -> Self {
        self.administrator = true;
        self
    }
}
