/// Headless screen controllers
///
/// One controller per screen. Each owns its local form state, declares
/// which cache-backed reads it needs, exposes a renderable view state,
/// and handles user actions. Rendering is somebody else's job; these
/// types are what a view layer binds to.
///
/// # Screens
///
/// - `landing`: login entry
/// - `header`: layout chrome (current user, navigation)
/// - `groups_list`: the caller's groups
/// - `new_group`: group creation form
/// - `group_board`: kanban board with filter/sort sidebar
/// - `extraction`: minutes upload → review → save flow
/// - `task_detail`: single-task editor with comment thread
///
/// # Loading convention
///
/// Mount-time reads land in a `ScreenState<T>`: `Loading` until the
/// fetch resolves, then `Ready` or `Failed`. A failed read is scoped to
/// its screen; `load()` can be called again to retry.
use crate::error::ClientError;

pub mod extraction;
pub mod group_board;
pub mod groups_list;
pub mod header;
pub mod landing;
pub mod new_group;
pub mod task_detail;

/// Lifecycle of one cache-backed read on a screen
#[derive(Debug, Clone)]
pub enum ScreenState<T> {
    /// Fetch not resolved yet; render a spinner
    Loading,

    /// Fetch failed; render the error in place of the data
    Failed(ClientError),

    /// Data available
    Ready(T),
}

impl<T> ScreenState<T> {
    /// The data, when available
    pub fn ready(&self) -> Option<&T> {
        match self {
            ScreenState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error, when the fetch failed
    pub fn error(&self) -> Option<&ClientError> {
        match self {
            ScreenState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the fetch is still outstanding
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }
}

impl<T> From<Result<T, ClientError>> for ScreenState<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => ScreenState::Ready(value),
            Err(err) => ScreenState::Failed(err),
        }
    }
}
