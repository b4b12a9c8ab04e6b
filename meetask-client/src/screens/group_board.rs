/// Group board screen: the kanban view
///
/// Fetches the group's tasks and members once, then derives the board
/// purely from local filter/sort/search state — toggling a checkbox or
/// changing the sort never refetches. A cache invalidation (after any
/// task mutation) is the signal to call `load()` again.
use std::sync::Arc;

use meetask_shared::board::{BoardView, PriorityCounts, SortKey, TaskFilter};
use meetask_shared::models::group::InviteMember;
use meetask_shared::models::member::Member;
use meetask_shared::models::task::{CreateTask, Priority, Task};

use crate::api::TaskListQuery;
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;
use crate::store::Store;

use super::ScreenState;

/// Controller for one group's kanban board
pub struct GroupBoardScreen {
    store: Store,
    group_id: i64,
    tasks: ScreenState<Arc<Vec<Task>>>,
    members: ScreenState<Arc<Vec<Member>>>,
    filter: TaskFilter,
    sort: SortKey,
    adding: bool,
    inviting: bool,
}

impl GroupBoardScreen {
    pub fn new(store: Store, group_id: i64) -> Self {
        GroupBoardScreen {
            store,
            group_id,
            tasks: ScreenState::Loading,
            members: ScreenState::Loading,
            filter: TaskFilter::default(),
            sort: SortKey::default(),
            adding: false,
            inviting: false,
        }
    }

    /// The group this board belongs to
    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    /// Fetches tasks and members (both cache-backed)
    ///
    /// Also the refetch entry point after a mutation invalidated the
    /// group's task lists.
    pub async fn load(&mut self) {
        self.tasks = self
            .store
            .group_tasks(self.group_id, TaskListQuery::default())
            .await
            .into();
        self.members = self.store.group_members(self.group_id).await.into();
    }

    /// Raw task fetch state (for loading/error rendering)
    pub fn tasks(&self) -> &ScreenState<Arc<Vec<Task>>> {
        &self.tasks
    }

    /// Members for the assignee filter and assignment pickers
    pub fn members(&self) -> &ScreenState<Arc<Vec<Member>>> {
        &self.members
    }

    /// Current filter selection
    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Current sort key
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Changes the sort order (pure re-derivation, no refetch)
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Toggles a priority in the filter sidebar
    pub fn toggle_priority(&mut self, priority: Priority) {
        self.filter.toggle_priority(priority);
    }

    /// Toggles an assignee in the filter sidebar
    pub fn toggle_assignee(&mut self, member_id: i64) {
        self.filter.toggle_assignee(member_id);
    }

    /// Updates the title search box
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.title = text.into();
    }

    /// The three columns, derived from the fetched tasks and the current
    /// filter/sort selection
    pub fn board(&self) -> Option<BoardView> {
        self.tasks
            .ready()
            .map(|tasks| BoardView::build(tasks, &self.filter, self.sort))
    }

    /// Unfiltered per-priority totals for the sidebar labels
    pub fn priority_counts(&self) -> PriorityCounts {
        match self.tasks.ready() {
            Some(tasks) => PriorityCounts::tally(tasks.iter().map(|t| t.priority)),
            None => PriorityCounts::default(),
        }
    }

    /// Whether the manual-add action is enabled
    pub fn can_add(&self) -> bool {
        !self.adding
    }

    /// Creates a task manually and refetches the list
    pub async fn add_task(&mut self, payload: &CreateTask) -> ClientResult<Task> {
        if self.adding {
            return Err(ClientError::Busy);
        }
        self.adding = true;

        let result = self.store.create_task(self.group_id, payload).await;
        self.adding = false;

        let task = result?;
        self.load().await;
        Ok(task)
    }

    /// Whether the invitation form accepts a submit
    pub fn can_invite(&self) -> bool {
        !self.inviting
    }

    /// Invites a member by email and refetches the member list
    ///
    /// The address is validated before anything is sent; the invitation
    /// itself is fire-and-forget.
    pub async fn invite(&mut self, email: impl Into<String>) -> ClientResult<()> {
        if self.inviting {
            return Err(ClientError::Busy);
        }
        self.inviting = true;

        let payload = InviteMember {
            email: email.into(),
        };
        let result = self.store.invite_member(self.group_id, &payload).await;
        self.inviting = false;

        result?;
        self.members = self.store.group_members(self.group_id).await.into();
        Ok(())
    }

    /// Detail route for one task card
    pub fn route_for(&self, task: &Task) -> Route {
        Route::Task(task.id)
    }

    /// Where the "extract from minutes" button navigates
    pub fn extraction_route(&self) -> Route {
        Route::Extraction(self.group_id)
    }
}
