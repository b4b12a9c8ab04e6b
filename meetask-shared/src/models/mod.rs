/// Data model for the MeeTask client
///
/// This module contains the domain types exchanged with the backend and
/// the validated request payloads.
///
/// # Models
///
/// - `task`: tasks, extraction drafts, priorities, statuses
/// - `group`: groups, roles, creation and invitation payloads
/// - `member`: group members (assignment pickers, filters)
/// - `comment`: task comment threads
/// - `user`: the authenticated session user
///
/// # Example
///
/// ```
/// use meetask_shared::models::task::{CreateTask, Priority, Status};
/// use validator::Validate;
///
/// let payload = CreateTask {
///     title: "Report".to_string(),
///     description: String::new(),
///     deadline: None,
///     status: Status::NotStartedYet,
///     priority: Priority::High,
///     assign: None,
/// };
/// assert!(payload.validate().is_ok());
/// ```
pub mod comment;
pub mod group;
pub mod member;
pub mod task;
pub mod user;
