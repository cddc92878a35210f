//! Moderation workflows behind the slash commands.
//!
//! Each workflow is a linear sequence: permission check, resolve, act, report. The
//! permission check always runs before any Roblox or Discord call.

use serenity::async_trait;

use crate::error::{platform::PlatformActionError, roblox::RobloxError, AppError};
use crate::model::{
    caller::Caller,
    command::{
        BanBothOutcome, BanBothRequest, DiscordBanRequest, GameBanOutcome, GameBanRequest,
        GameBanTarget,
    },
    member::MemberProfile,
    permission::{PermissionPolicy, PermissionTier},
    restriction::{RestrictionDuration, RestrictionRequest},
};
use crate::service::{permission::authorize, roblox::RobloxApi};

/// Discord rejects audit log reasons longer than this.
const MAX_AUDIT_REASON_LENGTH: usize = 512;

/// Native moderation primitives of the guild a command runs in.
#[async_trait]
pub trait GuildModeration: Send + Sync {
    /// Guild name, used in the DM sent before a ban.
    fn guild_name(&self) -> &str;

    /// Searches the guild's members by display name, nickname or account name.
    async fn find_member(&self, query: &str) -> Result<Option<MemberProfile>, PlatformActionError>;

    /// Sends a direct message to a user.
    async fn send_direct_message(
        &self,
        user_id: u64,
        content: &str,
    ) -> Result<(), PlatformActionError>;

    /// Bans a user from the guild.
    async fn ban(
        &self,
        user_id: u64,
        delete_message_days: u8,
        reason: &str,
    ) -> Result<(), PlatformActionError>;
}

pub struct ModerationService<'a> {
    roblox: &'a dyn RobloxApi,
    guild: &'a dyn GuildModeration,
    policy: &'a PermissionPolicy,
    universe_id: &'a str,
    appeal_url: Option<&'a str>,
}

impl<'a> ModerationService<'a> {
    /// Creates a new ModerationService instance.
    ///
    /// # Arguments
    /// - `roblox` - Roblox Open Cloud operations
    /// - `guild` - Discord operations for the guild the command was invoked in
    /// - `policy` - Configured permission tiers
    /// - `universe_id` - Universe the game restrictions apply to
    /// - `appeal_url` - Optional link appended to ban DMs
    pub fn new(
        roblox: &'a dyn RobloxApi,
        guild: &'a dyn GuildModeration,
        policy: &'a PermissionPolicy,
        universe_id: &'a str,
        appeal_url: Option<&'a str>,
    ) -> Self {
        Self {
            roblox,
            guild,
            policy,
            universe_id,
            appeal_url,
        }
    }

    /// Applies a game-join restriction to one Roblox user.
    ///
    /// A username target is resolved first; if resolution fails no restriction call is
    /// made.
    ///
    /// # Returns
    /// - `Ok(GameBanOutcome)` - Restriction applied
    /// - `Err(AppError::CommandErr)` - Caller lacks the Moderator tier
    /// - `Err(AppError::RobloxErr)` - Resolution or restriction failed
    pub async fn game_ban(
        &self,
        caller: &Caller,
        request: GameBanRequest,
    ) -> Result<GameBanOutcome, AppError> {
        self.authorize(caller, PermissionTier::Moderator, "gameban")?;

        let user_id = match &request.target {
            GameBanTarget::UserId(user_id) => *user_id,
            GameBanTarget::Username(username) => self.roblox.resolve_user_id(username).await?,
        };

        self.restrict(
            caller,
            user_id,
            request.duration,
            &request.display_reason,
            &request.private_reason,
            request.exclude_alt_accounts,
        )
        .await?;

        tracing::info!(
            "BLOCKED (Roblox) userId={} display=**{}** private=**{}** blockedBy={}",
            user_id,
            request.display_reason,
            request.private_reason,
            caller.name
        );

        Ok(GameBanOutcome {
            user_id,
            duration: request.duration,
        })
    }

    /// Bans a member from the guild.
    ///
    /// The member is sent a best-effort DM first; DM failures are ignored.
    ///
    /// # Returns
    /// - `Ok(MemberProfile)` - The banned member
    /// - `Err(AppError::CommandErr)` - Caller lacks the Moderator tier
    /// - `Err(AppError::PlatformErr)` - Discord refused or failed the ban
    pub async fn discord_ban(
        &self,
        caller: &Caller,
        request: DiscordBanRequest,
    ) -> Result<MemberProfile, AppError> {
        self.authorize(caller, PermissionTier::Moderator, "discordban")?;

        self.notify_and_ban(
            caller,
            &request.target,
            &request.reason,
            request.delete_message_days,
            "",
        )
        .await
        .inspect_err(|e| tracing::warn!("Failed to ban {}: {}", request.target.name, e))?;

        tracing::info!(
            "BLOCKED (Discord) user={} ({}) reason=**{}** blockedBy={}",
            request.target.name,
            request.target.user_id,
            request.reason,
            caller.name
        );

        Ok(request.target)
    }

    /// Bans a shared nickname on both Roblox and Discord.
    ///
    /// The two halves run independently and concurrently. A failure on one side does
    /// not stop or roll back the other; both results are returned.
    ///
    /// # Returns
    /// - `Ok(BanBothOutcome)` - Per-platform results, possibly partial
    /// - `Err(AppError::CommandErr)` - Caller lacks the SeniorModerator tier
    pub async fn ban_both(
        &self,
        caller: &Caller,
        request: BanBothRequest,
    ) -> Result<BanBothOutcome, AppError> {
        self.authorize(caller, PermissionTier::SeniorModerator, "banboth")?;

        let roblox = async {
            let user_id = self.roblox.resolve_user_id(&request.nickname).await?;
            self.restrict(
                caller,
                user_id,
                request.duration,
                &request.display_reason,
                &request.private_reason,
                request.exclude_alt_accounts,
            )
            .await?;
            Ok::<u64, RobloxError>(user_id)
        };

        let discord = async {
            let member = self
                .guild
                .find_member(&request.nickname)
                .await?
                .ok_or_else(|| PlatformActionError::MemberNotFound(request.nickname.clone()))?;
            self.notify_and_ban(
                caller,
                &member,
                &request.display_reason,
                request.delete_message_days,
                " and restricted from the game",
            )
            .await?;
            Ok::<MemberProfile, PlatformActionError>(member)
        };

        let (roblox, discord) = tokio::join!(roblox, discord);
        let outcome = BanBothOutcome { roblox, discord };

        match (&outcome.roblox, &outcome.discord) {
            (Ok(user_id), Ok(member)) => tracing::info!(
                "BLOCKED (Both) nickname={} robloxUserId={} discordUser={} \
                 display=**{}** private=**{}** blockedBy={}",
                request.nickname,
                user_id,
                member.name,
                request.display_reason,
                request.private_reason,
                caller.name
            ),
            (roblox, discord) => tracing::warn!(
                "Partial ban for nickname={}: Roblox {} | Discord {} | blockedBy={}",
                request.nickname,
                describe(roblox),
                describe(discord),
                caller.name
            ),
        }

        Ok(outcome)
    }

    fn authorize(
        &self,
        caller: &Caller,
        tier: PermissionTier,
        command: &str,
    ) -> Result<(), AppError> {
        authorize(caller, self.policy, tier).inspect_err(|_| {
            tracing::info!(
                "/{} denied for {} due to insufficient permissions",
                command,
                caller.name
            )
        })
    }

    async fn restrict(
        &self,
        caller: &Caller,
        user_id: u64,
        duration: RestrictionDuration,
        display_reason: &str,
        private_reason: &str,
        exclude_alt_accounts: bool,
    ) -> Result<(), RobloxError> {
        let request = RestrictionRequest {
            universe_id: self.universe_id.to_string(),
            user_id,
            active: true,
            duration,
            display_reason: display_reason.to_string(),
            private_reason: format!("{} (via Discord by {})", private_reason, caller.name),
            exclude_alt_accounts,
        };

        self.roblox.apply_game_restriction(&request).await
    }

    async fn notify_and_ban(
        &self,
        caller: &Caller,
        target: &MemberProfile,
        reason: &str,
        delete_message_days: u8,
        scope: &str,
    ) -> Result<(), PlatformActionError> {
        let mut dm = format!(
            "You have been banned from '{}'{}.\nReason: {}",
            self.guild.guild_name(),
            scope,
            reason
        );
        if let Some(appeal_url) = self.appeal_url {
            dm.push_str(&format!("\nYou can appeal here: {}", appeal_url));
        }

        if let Err(e) = self.guild.send_direct_message(target.user_id, &dm).await {
            tracing::debug!("Could not DM {} before ban: {}", target.name, e);
        }

        let audit_reason = truncate(
            &format!("{} (by {} via Discord)", reason, caller.name),
            MAX_AUDIT_REASON_LENGTH,
        );

        self.guild
            .ban(target.user_id, delete_message_days, &audit_reason)
            .await
    }
}

fn describe<T, E: std::fmt::Display>(result: &Result<T, E>) -> String {
    match result {
        Ok(_) => "ok".to_string(),
        Err(e) => format!("failed: {}", e),
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
