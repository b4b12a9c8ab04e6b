/// Remote synchronization store
///
/// Binds the API client to the query cache: every screen read goes
/// through here and maps to exactly one cache key and one idempotent GET;
/// every mutation calls the backend and, on success, invalidates the keys
/// that could now be stale. Mutation failure touches nothing — cached
/// data stays visible and the caller keeps its form state.
///
/// # Invalidation map
///
/// | mutation         | invalidated keys                                |
/// |------------------|-------------------------------------------------|
/// | `create_group`   | `Groups`                                        |
/// | `invite_member`  | `GroupMembers(group)`                           |
/// | `create_task`    | every `GroupTasks` for the group                |
/// | `save_extracted` | every `GroupTasks` for the group                |
/// | `update_task`    | `Task(id)` + every `GroupTasks` for its group   |
/// | `post_comment`   | `TaskComments(task)`                            |
///
/// # Example
///
/// ```no_run
/// use meetask_client::api::{ApiClient, TaskListQuery};
/// use meetask_client::cache::QueryCache;
/// use meetask_client::config::Config;
/// use meetask_client::store::Store;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::new("http://localhost:8000", 30, true);
/// let store = Store::new(ApiClient::new(&config)?, QueryCache::new(config.retry_reads));
///
/// let tasks = store.group_tasks(7, TaskListQuery::default()).await?;
/// println!("{} tasks", tasks.len());
/// # Ok(())
/// # }
/// ```
use std::sync::Arc;

use tokio::sync::broadcast;

use meetask_shared::models::comment::{Comment, CreateComment};
use meetask_shared::models::group::{CreateGroup, Group, InviteMember};
use meetask_shared::models::member::Member;
use meetask_shared::models::task::{CreateTask, DraftTask, Task, UpdateTask};
use meetask_shared::models::user::CurrentUser;

use crate::api::{ApiClient, TaskListQuery};
use crate::cache::{CacheEvent, QueryCache, QueryKey};
use crate::error::ClientResult;

/// The single data access point for every screen
#[derive(Clone)]
pub struct Store {
    api: Arc<ApiClient>,
    cache: QueryCache,
}

impl Store {
    /// Wires an API client to a cache
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Store {
            api: Arc::new(api),
            cache,
        }
    }

    /// Subscribes to cache change notifications (screens refetch on these)
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.cache.subscribe()
    }

    /// The cache behind this store (tests, diagnostics)
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Browser navigation entry for login
    pub fn login_url(&self) -> String {
        self.api.login_url()
    }

    /// Browser navigation entry for logout
    pub fn logout_url(&self) -> String {
        self.api.logout_url()
    }

    // --- reads ----------------------------------------------------------

    /// The caller's groups
    pub async fn groups(&self) -> ClientResult<Arc<Vec<Group>>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Groups, move || {
                let api = api.clone();
                async move { api.groups().await }
            })
            .await
    }

    /// Members of a group
    pub async fn group_members(&self, group_id: i64) -> ClientResult<Arc<Vec<Member>>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::GroupMembers(group_id), move || {
                let api = api.clone();
                async move { api.group_members(group_id).await }
            })
            .await
    }

    /// Tasks of a group, optionally narrowed server-side
    pub async fn group_tasks(
        &self,
        group_id: i64,
        query: TaskListQuery,
    ) -> ClientResult<Arc<Vec<Task>>> {
        let api = self.api.clone();
        let fetch_query = query.clone();
        self.cache
            .fetch(QueryKey::GroupTasks { group_id, query }, move || {
                let api = api.clone();
                let query = fetch_query.clone();
                async move { api.group_tasks(group_id, &query).await }
            })
            .await
    }

    /// A single task with its assignee expanded
    pub async fn task(&self, task_id: i64) -> ClientResult<Arc<Task>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Task(task_id), move || {
                let api = api.clone();
                async move { api.task(task_id).await }
            })
            .await
    }

    /// Comment thread of a task
    pub async fn task_comments(&self, task_id: i64) -> ClientResult<Arc<Vec<Comment>>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::TaskComments(task_id), move || {
                let api = api.clone();
                async move { api.task_comments(task_id).await }
            })
            .await
    }

    /// The authenticated user
    pub async fn me(&self) -> ClientResult<Arc<CurrentUser>> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Me, move || {
                let api = api.clone();
                async move { api.me().await }
            })
            .await
    }

    // --- mutations ------------------------------------------------------

    /// Creates a group and refreshes the group list
    pub async fn create_group(&self, payload: &CreateGroup) -> ClientResult<Group> {
        let group = self.api.create_group(payload).await?;
        tracing::info!(group_id = group.id, "group created");
        self.cache.invalidate(&QueryKey::Groups);
        Ok(group)
    }

    /// Sends a membership invitation (fire-and-forget)
    pub async fn invite_member(&self, group_id: i64, payload: &InviteMember) -> ClientResult<()> {
        self.api.invite_member(group_id, payload).await?;
        tracing::info!(group_id, "invitation sent");
        self.cache.invalidate(&QueryKey::GroupMembers(group_id));
        Ok(())
    }

    /// Creates one task manually and refreshes the group's task lists
    pub async fn create_task(&self, group_id: i64, payload: &CreateTask) -> ClientResult<Task> {
        let task = self.api.create_task(group_id, payload).await?;
        tracing::info!(group_id, task_id = task.id, "task created");
        self.cache.invalidate_group_tasks(group_id);
        Ok(task)
    }

    /// Runs extraction over minutes text
    ///
    /// The returned drafts are an ephemeral batch, deliberately not
    /// cached: they exist only in review-screen state.
    pub async fn extract_tasks(&self, group_id: i64, text: &str) -> ClientResult<Vec<DraftTask>> {
        let drafts = self.api.extract_tasks(group_id, text).await?;
        tracing::info!(group_id, count = drafts.len(), "minutes extracted");
        Ok(drafts)
    }

    /// Persists reviewed drafts and refreshes the group's task lists
    pub async fn save_extracted(&self, group_id: i64, drafts: &[DraftTask]) -> ClientResult<()> {
        self.api.save_extracted(group_id, drafts).await?;
        tracing::info!(group_id, count = drafts.len(), "extracted tasks saved");
        self.cache.invalidate_group_tasks(group_id);
        Ok(())
    }

    /// Applies a field-level patch to a task
    ///
    /// Invalidates the task's own key and, via the `group_id` on the
    /// response, every task-list key of the owning group.
    pub async fn update_task(&self, task_id: i64, patch: &UpdateTask) -> ClientResult<Task> {
        let task = self.api.update_task(task_id, patch).await?;
        tracing::info!(task_id, "task updated");

        self.cache.invalidate(&QueryKey::Task(task_id));
        if let Some(group_id) = task.group_id {
            self.cache.invalidate_group_tasks(group_id);
        }
        Ok(task)
    }

    /// Appends a comment and refreshes the thread
    ///
    /// No optimistic insert: the thread is refetched after the post.
    pub async fn post_comment(
        &self,
        task_id: i64,
        payload: &CreateComment,
    ) -> ClientResult<Comment> {
        let comment = self.api.create_comment(task_id, payload).await?;
        tracing::info!(task_id, comment_id = comment.id, "comment posted");
        self.cache.invalidate(&QueryKey::TaskComments(task_id));
        Ok(comment)
    }
}
