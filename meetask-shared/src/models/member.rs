/// Group member model
///
/// Members are always fetched relative to a group and feed the assignment
/// pickers and the assignee filter on the board.
use serde::{Deserialize, Serialize};

/// A member of a group, as served by `GET /groups/:groupId/members`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Server-assigned unique id
    pub id: i64,

    /// Display name
    pub user_name: String,

    /// Avatar URL
    #[serde(default)]
    pub picture: String,
}
