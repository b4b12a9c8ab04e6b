/// Current-user model
///
/// The session identity as served by `GET /me`. Passed down the screen
/// tree explicitly (the header takes it as data, not as an ambient
/// singleton).
use serde::{Deserialize, Serialize};

/// The authenticated user behind the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Display name
    pub user_name: String,

    /// Avatar URL
    #[serde(default)]
    pub picture: String,
}
