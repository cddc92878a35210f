//! Role-based permission evaluation.
//!
//! Configured role IDs take precedence. When a tier has no configured ID the evaluator
//! falls back to matching role names (`mod`, `supermod`, `admin`, case-insensitive), so
//! an unconfigured deployment still works. Any member able to create or self-assign a
//! role with one of those names passes the fallback.

use crate::error::{command::CommandError, AppError};
use crate::model::{
    caller::Caller,
    permission::{PermissionPolicy, PermissionTier},
};

const MOD_ROLE_NAME: &str = "mod";
const SUPERMOD_ROLE_NAME: &str = "supermod";
const ADMIN_ROLE_NAME: &str = "admin";

/// Checks whether the caller is an administrator.
///
/// The native ADMINISTRATOR permission always passes. Otherwise the configured admin
/// role is required, or a role named `admin` when none is configured.
pub fn is_admin(caller: &Caller, policy: &PermissionPolicy) -> bool {
    if caller.administrator {
        return true;
    }

    match policy.admin_role_id {
        Some(role_id) => caller.role_ids.contains(&role_id),
        None => caller.role_names.contains(ADMIN_ROLE_NAME),
    }
}

/// Checks whether the caller holds the moderator or senior moderator role.
///
/// If either role ID is configured only IDs are consulted.
pub fn has_moderator_role(caller: &Caller, policy: &PermissionPolicy) -> bool {
    if policy.mod_role_id.is_some() || policy.supermod_role_id.is_some() {
        return [policy.mod_role_id, policy.supermod_role_id]
            .into_iter()
            .flatten()
            .any(|role_id| caller.role_ids.contains(&role_id));
    }

    caller.role_names.contains(MOD_ROLE_NAME) || caller.role_names.contains(SUPERMOD_ROLE_NAME)
}

/// Checks whether the caller holds the senior moderator role.
pub fn has_supermod_role(caller: &Caller, policy: &PermissionPolicy) -> bool {
    match policy.supermod_role_id {
        Some(role_id) => caller.role_ids.contains(&role_id),
        None => caller.role_names.contains(SUPERMOD_ROLE_NAME),
    }
}

/// Requires the caller to meet a tier.
///
/// # Returns
/// - `Ok(())` - Caller is allowed
/// - `Err(CommandError::PermissionDenied)` - Caller lacks the tier
pub fn authorize(
    caller: &Caller,
    policy: &PermissionPolicy,
    tier: PermissionTier,
) -> Result<(), AppError> {
    let allowed = match tier {
        PermissionTier::Moderator => is_admin(caller, policy) || has_moderator_role(caller, policy),
        PermissionTier::SeniorModerator => {
            is_admin(caller, policy) || has_supermod_role(caller, policy)
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(CommandError::PermissionDenied(tier).into())
    }
}
