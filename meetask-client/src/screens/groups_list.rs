/// Groups list screen
///
/// Shows every group the caller belongs to, with an empty state nudging
/// toward group creation when there are none.
use std::sync::Arc;

use meetask_shared::models::group::Group;

use crate::routes::Route;
use crate::store::Store;

use super::ScreenState;

/// Controller for the "my groups" screen
pub struct GroupsListScreen {
    store: Store,
    groups: ScreenState<Arc<Vec<Group>>>,
}

impl GroupsListScreen {
    pub fn new(store: Store) -> Self {
        GroupsListScreen {
            store,
            groups: ScreenState::Loading,
        }
    }

    /// Fetches the group list (cache-backed)
    pub async fn load(&mut self) {
        self.groups = self.store.groups().await.into();
    }

    /// The fetched groups
    pub fn groups(&self) -> &ScreenState<Arc<Vec<Group>>> {
        &self.groups
    }

    /// Whether to render the "no groups yet" empty state
    pub fn is_empty(&self) -> bool {
        self.groups
            .ready()
            .map(|groups| groups.is_empty())
            .unwrap_or(false)
    }

    /// Board route for one group card
    pub fn route_for(&self, group: &Group) -> Route {
        Route::Group(group.id)
    }

    /// Where the "create group" button navigates
    pub fn create_route(&self) -> Route {
        Route::NewGroup
    }
}
