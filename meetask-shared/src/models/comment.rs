/// Comment model and request payload
///
/// Comments are appended to a task; the thread is refetched after each
/// post rather than inserted optimistically.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::member::Member;

/// A comment on a task, as served by `GET /tasks/:taskId/comments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned unique id
    pub id: i64,

    /// Body text
    pub contents: String,

    /// Creation timestamp (naive, backend-local)
    pub created_at: NaiveDateTime,

    /// Who wrote it
    pub user: Member,
}

/// Payload for `POST /tasks/:taskId/comments`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateComment {
    /// Body text
    #[validate(length(min = 1, message = "comment must not be empty"))]
    pub contents: String,
}
