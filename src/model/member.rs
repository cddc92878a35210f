use serenity::all::{Member, PartialMember, User};

/// Searchable names of a guild member.
///
/// Decouples member lookup from Serenity so the lookup rules can be exercised on plain
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    /// Discord user ID
    pub user_id: u64,
    /// Profile display name (`global_name`), if the user set one
    pub display_name: Option<String>,
    /// Guild-specific nickname
    pub nick: Option<String>,
    /// Account name
    pub name: String,
}

impl MemberProfile {
    /// Builds a profile for a resolved command option user.
    pub fn from_user(user: &User, member: Option<&PartialMember>) -> Self {
        Self {
            user_id: user.id.get(),
            display_name: user.global_name.clone(),
            nick: member.and_then(|member| member.nick.clone()),
            name: user.name.clone(),
        }
    }

    /// Discord mention markup for replies.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.user_id)
    }
}

impl From<&Member> for MemberProfile {
    fn from(member: &Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            display_name: member.user.global_name.clone(),
            nick: member.nick.clone(),
            name: member.user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_utils::serenity::{create_test_member, create_test_user};

    use super::*;

    /// Tests conversion from a guild member.
    ///
    /// Expected: display name, nickname and account name kept in separate fields
    #[test]
    fn converts_guild_member() {
        let member = create_test_member(
            42,
            "example_player",
            Some("ExamplePlayer"),
            Some("Example"),
            &[],
        );

        let profile = MemberProfile::from(&member);

        assert_eq!(profile.user_id, 42);
        assert_eq!(profile.display_name.as_deref(), Some("Example"));
        assert_eq!(profile.nick.as_deref(), Some("ExamplePlayer"));
        assert_eq!(profile.name, "example_player");
        assert_eq!(profile.mention(), "<@42>");
    }

    /// Tests conversion from a bare command option user.
    ///
    /// Expected: no nickname without partial member data
    #[test]
    fn converts_option_user_without_member() {
        let user = create_test_user(7, "target", None);

        let profile = MemberProfile::from_user(&user, None);

        assert_eq!(profile.user_id, 7);
        assert_eq!(profile.name, "target");
        assert!(profile.nick.is_none());
        assert!(profile.display_name.is_none());
    }
}
