//! Serenity-backed implementation of the guild moderation primitives.

use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{Cache, Context, CreateMessage, GuildId, Member, Role, RoleId, UserId};
use serenity::async_trait;
use serenity::http::Http;

use crate::error::{platform::PlatformActionError, AppError};
use crate::model::{caller::Caller, member::MemberProfile};
use crate::service::{member_lookup::find_member_by_nick_or_name, moderation::GuildModeration};

/// Maximum number of members Discord returns per list request.
const MEMBERS_PER_REQUEST: u64 = 1000;

/// The guild a command was invoked in.
pub struct SerenityGuild {
    http: Arc<Http>,
    cache: Arc<Cache>,
    guild_id: GuildId,
    name: String,
    roles: HashMap<RoleId, Role>,
}

impl SerenityGuild {
    /// Loads the guild's name and role table, preferring the gateway cache.
    ///
    /// # Returns
    /// - `Ok(SerenityGuild)` - Guild handle
    /// - `Err(AppError::DiscordErr)` - Guild not cached and the HTTP fetch failed
    pub async fn load(ctx: &Context, guild_id: GuildId) -> Result<Self, AppError> {
        let cached = ctx
            .cache
            .guild(guild_id)
            .map(|guild| (guild.name.clone(), guild.roles.clone()));

        let (name, roles) = match cached {
            Some(cached) => cached,
            None => {
                tracing::debug!("Guild {} not cached, fetching over HTTP", guild_id);
                let guild = guild_id.to_partial_guild(&ctx.http).await?;
                (guild.name, guild.roles)
            }
        };

        Ok(Self {
            http: ctx.http.clone(),
            cache: ctx.cache.clone(),
            guild_id,
            name,
            roles,
        })
    }

    /// Permission view of a member of this guild.
    pub fn caller(&self, member: &Member) -> Caller {
        Caller::from_member(member, &self.roles)
    }

    /// The cached member list, if the cache holds every member of the guild.
    fn cached_members(&self) -> Option<Vec<MemberProfile>> {
        let guild = self.cache.guild(self.guild_id)?;

        complete_member_list(&guild.members, guild.member_count)
    }

    /// Pages through the full member list.
    async fn fetch_members(&self) -> Result<Vec<MemberProfile>, PlatformActionError> {
        let mut all_members = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let members = self
                .guild_id
                .members(&self.http, Some(MEMBERS_PER_REQUEST), after)
                .await?;

            let fetched_count = members.len();
            after = members.last().map(|member| member.user.id);
            all_members.extend(members.iter().map(MemberProfile::from));

            if fetched_count < MEMBERS_PER_REQUEST as usize {
                break;
            }
        }

        all_members.sort_by_key(|member| member.user_id);

        tracing::debug!(
            "Fetched {} members for guild {}",
            all_members.len(),
            self.guild_id
        );

        Ok(all_members)
    }
}

/// Profiles of a cached member map in user ID order, the order Discord pages members in.
///
/// Returns `None` when the cache holds fewer members than the guild has; lookups must then
/// search the full paged list.
fn complete_member_list(
    members: &HashMap<UserId, Member>,
    member_count: u64,
) -> Option<Vec<MemberProfile>> {
    if (members.len() as u64) < member_count {
        return None;
    }

    let mut profiles: Vec<MemberProfile> = members.values().map(MemberProfile::from).collect();
    profiles.sort_by_key(|member| member.user_id);

    Some(profiles)
}

#[async_trait]
impl GuildModeration for SerenityGuild {
    fn guild_name(&self) -> &str {
        &self.name
    }

    async fn find_member(
        &self,
        query: &str,
    ) -> Result<Option<MemberProfile>, PlatformActionError> {
        let members = match self.cached_members() {
            Some(members) => members,
            None => self.fetch_members().await?,
        };

        Ok(find_member_by_nick_or_name(&members, query).cloned())
    }

    async fn send_direct_message(
        &self,
        user_id: u64,
        content: &str,
    ) -> Result<(), PlatformActionError> {
        UserId::new(user_id)
            .direct_message(&self.http, CreateMessage::new().content(content))
            .await?;

        Ok(())
    }

    async fn ban(
        &self,
        user_id: u64,
        delete_message_days: u8,
        reason: &str,
    ) -> Result<(), PlatformActionError> {
        self.guild_id
            .ban_with_reason(&self.http, UserId::new(user_id), delete_message_days, reason)
            .await?;

        Ok(())
    }
}
