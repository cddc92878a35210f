//! In-memory doubles of the external platforms for workflow tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serenity::async_trait;

use crate::error::{platform::PlatformActionError, roblox::RobloxError};
use crate::model::{member::MemberProfile, restriction::RestrictionRequest};
use crate::service::{
    member_lookup::find_member_by_nick_or_name, moderation::GuildModeration, roblox::RobloxApi,
};


pub const UNIVERSE_ID: &str = "987654";

/// Records every call; resolves usernames from a fixed table.
#[derive(Default)]
pub struct FakeRoblox {
    pub users: HashMap<String, u64>,
    /// Status and body returned by the restriction endpoint instead of success
    pub restriction_failure: Option<(u16, String)>,
    pub resolved: Mutex<Vec<String>>,
    pub restrictions: Mutex<Vec<RestrictionRequest>>,
}

impl FakeRoblox {
    pub fn with_user(mut self, username: &str, user_id: u64) -> Self {
        self.users.insert(username.to_string(), user_id);
        self
    }

    pub fn failing_restrictions(mut self, status: u16, body: &str) -> Self {
        self.restriction_failure = Some((status, body.to_string()));
        self
    }

    pub fn restrictions(&self) -> Vec<RestrictionRequest> {
        self.restrictions.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.resolved.lock().unwrap().len() + self.restrictions.lock().unwrap().len()
    }
}

#[async_trait]
impl RobloxApi for FakeRoblox {
    async fn resolve_user_id(&self, username: &str) -> Result<u64, RobloxError> {
        self.resolved.lock().unwrap().push(username.to_string());

        self.users
            .get(username)
            .copied()
            .ok_or_else(|| RobloxError::Resolution {
                username: username.to_string(),
                reason: "not found".to_string(),
            })
    }

    async fn apply_game_restriction(
        &self,
        request: &RestrictionRequest,
    ) -> Result<(), RobloxError> {
        self.restrictions.lock().unwrap().push(request.clone());

        match &self.restriction_failure {
            Some((status, body)) => Err(RobloxError::Restriction {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// A guild with a fixed member list that records DMs and bans.
pub struct FakeGuild {
    pub name: String,
    pub members: Vec<MemberProfile>,
    pub deny_bans: bool,
    pub dms_closed: bool,
    pub lookups: Mutex<Vec<String>>,
    pub dms: Mutex<Vec<(u64, String)>>,
    pub bans: Mutex<Vec<(u64, u8, String)>>,
}

impl FakeGuild {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
            deny_bans: false,
            dms_closed: false,
            lookups: Mutex::new(Vec::new()),
            dms: Mutex::new(Vec::new()),
            bans: Mutex::new(Vec::new()),
        }
    }

    pub fn with_member(mut self, user_id: u64, nick: Option<&str>, name: &str) -> Self {
        self.members.push(member(user_id, nick, name));
        self
    }

    pub fn denying_bans(mut self) -> Self {
        self.deny_bans = true;
        self
    }

    pub fn with_closed_dms(mut self) -> Self {
        self.dms_closed = true;
        self
    }

    pub fn bans(&self) -> Vec<(u64, u8, String)> {
        self.bans.lock().unwrap().clone()
    }

    pub fn dms(&self) -> Vec<(u64, String)> {
        self.dms.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
            + self.dms.lock().unwrap().len()
            + self.bans.lock().unwrap().len()
    }
}

#[async_trait]
impl GuildModeration for FakeGuild {
    fn guild_name(&self) -> &str {
        &self.name
    }

    async fn find_member(
        &self,
        query: &str,
    ) -> Result<Option<MemberProfile>, PlatformActionError> {
        self.lookups.lock().unwrap().push(query.to_string());

        Ok(find_member_by_nick_or_name(&self.members, query).cloned())
    }

    async fn send_direct_message(
        &self,
        user_id: u64,
        content: &str,
    ) -> Result<(), PlatformActionError> {
        self.dms
            .lock()
            .unwrap()
            .push((user_id, content.to_string()));

        if self.dms_closed {
            return Err(PlatformActionError::MissingPermissions);
        }

        Ok(())
    }

    async fn ban(
        &self,
        user_id: u64,
        delete_message_days: u8,
        reason: &str,
    ) -> Result<(), PlatformActionError> {
        if self.deny_bans {
            return Err(PlatformActionError::MissingPermissions);
        }

        self.bans
            .lock()
            .unwrap()
            .push((user_id, delete_message_days, reason.to_string()));

        Ok(())
    }
}

pub fn member(user_id: u64, nick: Option<&str>, name: &str) -> MemberProfile {
    MemberProfile {
        user_id,
        display_name: None,
        nick: nick.map(str::to_string),
        name: name.to_string(),
    }
}
