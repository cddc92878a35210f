use std::fmt;

/// Role IDs designating the moderation tiers.
///
/// `None` means the tier has no configured role and the evaluator falls back to
/// matching role names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionPolicy {
    pub mod_role_id: Option<u64>,
    pub supermod_role_id: Option<u64>,
    pub admin_role_id: Option<u64>,
}

impl PermissionPolicy {
    /// Creates a policy from raw configured IDs, treating `0` as unset.
    pub fn new(mod_role_id: u64, supermod_role_id: u64, admin_role_id: u64) -> Self {
        let configured = |id: u64| (id != 0).then_some(id);

        Self {
            mod_role_id: configured(mod_role_id),
            supermod_role_id: configured(supermod_role_id),
            admin_role_id: configured(admin_role_id),
        }
    }
}

/// Minimum role tier a command requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionTier {
    /// Admin, Mod or Supermod
    Moderator,
    /// Admin or Supermod
    SeniorModerator,
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moderator => write!(f, "Admin or Mod/Supermod"),
            Self::SeniorModerator => write!(f, "Admin or Supermod"),
        }
    }
}
