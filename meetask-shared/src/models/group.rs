/// Group model and request payloads
///
/// A group is the unit of collaboration: tasks, members, and invitations
/// are all scoped to one. The caller's own role is embedded in the list
/// payload so screens can distinguish owned groups from joined ones.
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The caller's role within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    /// Created the group, can invite members
    Owner,

    /// Joined via invitation
    Member,
}

impl GroupRole {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Owner => "owner",
            GroupRole::Member => "member",
        }
    }
}

/// A group as served by `GET /groups`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Server-assigned unique id
    pub id: i64,

    /// Group name
    pub name: String,

    /// The caller's role in this group
    pub role: GroupRole,

    /// Number of members
    #[serde(default)]
    pub member_length: u32,

    /// Avatar URLs of a few members, for the group card
    #[serde(default)]
    pub member_pictures: Vec<String>,
}

/// Payload for `POST /groups`
///
/// Groups are created from a name alone; the creator becomes the owner.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroup {
    /// Group name
    #[validate(length(min = 1, max = 100, message = "group name must not be empty"))]
    pub name: String,
}

/// Payload for `POST /groups/:groupId/invite`
///
/// Fire-and-forget: no accept/decline state is modeled client-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteMember {
    /// Address to send the invitation to
    #[validate(email(message = "invalid email address"))]
    pub email: String,
}
