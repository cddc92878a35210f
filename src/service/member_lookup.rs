//! Guild member search by nickname or name.

use crate::model::member::MemberProfile;

/// Finds the member whose name matches `query`.
///
/// Fields are tried in priority order: profile display name, guild nickname, account
/// name. For each field an exact match is preferred over a case-insensitive one, and
/// within a pass the first member in list order wins.
///
/// # Arguments
/// - `members` - Members to search
/// - `query` - Name to look for
///
/// # Returns
/// - `Some(&MemberProfile)` - First match in priority order
/// - `None` - No member matches
pub fn find_member_by_nick_or_name<'a>(
    members: &'a [MemberProfile],
    query: &str,
) -> Option<&'a MemberProfile> {
    let fields: [fn(&MemberProfile) -> Option<&str>; 3] = [display_name, nick, account_name];
    let lowered = query.to_lowercase();

    for field in fields {
        let exact = members.iter().find(|member| field(member) == Some(query));
        if exact.is_some() {
            return exact;
        }

        let loose = members.iter().find(|member| {
            field(member).is_some_and(|value| value.to_lowercase() == lowered)
        });
        if loose.is_some() {
            return loose;
        }
    }

    None
}

fn display_name(member: &MemberProfile) -> Option<&str> {
    member.display_name.as_deref()
}

fn nick(member: &MemberProfile) -> Option<&str> {
    member.nick.as_deref()
}

fn account_name(member: &MemberProfile) -> Option<&str> {
    Some(&member.name)
}
