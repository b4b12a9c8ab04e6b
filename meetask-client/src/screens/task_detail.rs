/// Task detail screen
///
/// One task, fully expanded, plus its comment thread. Every field edit
/// commits individually: pick a new status and it patches immediately,
/// no save button. After a successful patch the screen refetches the
/// (just invalidated) task so the view always renders server truth.
use std::sync::Arc;

use meetask_shared::models::comment::{Comment, CreateComment};
use meetask_shared::models::task::{Task, UpdateTask};
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::store::Store;

use super::ScreenState;

/// Controller for a single task's detail view
pub struct TaskDetailScreen {
    store: Store,
    task_id: i64,
    task: ScreenState<Arc<Task>>,
    comments: ScreenState<Arc<Vec<Comment>>>,
    comment_draft: String,
    saving_field: bool,
    posting: bool,
}

impl TaskDetailScreen {
    pub fn new(store: Store, task_id: i64) -> Self {
        TaskDetailScreen {
            store,
            task_id,
            task: ScreenState::Loading,
            comments: ScreenState::Loading,
            comment_draft: String::new(),
            saving_field: false,
            posting: false,
        }
    }

    /// The task being viewed
    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    /// Fetches the task and its comment thread (both cache-backed)
    pub async fn load(&mut self) {
        self.task = self.store.task(self.task_id).await.into();
        self.comments = self.store.task_comments(self.task_id).await.into();
    }

    /// The task, once loaded
    pub fn task(&self) -> &ScreenState<Arc<Task>> {
        &self.task
    }

    /// The comment thread, once loaded
    pub fn comments(&self) -> &ScreenState<Arc<Vec<Comment>>> {
        &self.comments
    }

    /// Whether field editors accept a new commit
    pub fn can_edit(&self) -> bool {
        !self.saving_field
    }

    /// Commits one field-level patch
    ///
    /// On success the task key is already invalidated by the store, so
    /// the refetch here lands fresh data. On failure the previously
    /// fetched task stays on screen untouched.
    pub async fn commit(&mut self, patch: &UpdateTask) -> ClientResult<Task> {
        if self.saving_field {
            return Err(ClientError::Busy);
        }
        self.saving_field = true;

        let result = self.store.update_task(self.task_id, patch).await;
        self.saving_field = false;

        let task = result?;
        self.task = self.store.task(self.task_id).await.into();
        Ok(task)
    }

    /// Current comment form value
    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    /// Updates the comment form value
    pub fn set_comment_draft(&mut self, text: impl Into<String>) {
        self.comment_draft = text.into();
    }

    /// Whether the comment form accepts a submit
    pub fn can_post(&self) -> bool {
        !self.posting
    }

    /// Posts the drafted comment and refetches the thread
    ///
    /// An empty draft is rejected before any request goes out. The draft
    /// is kept on failure and cleared only once the post succeeds.
    pub async fn post_comment(&mut self) -> ClientResult<Comment> {
        if self.posting {
            return Err(ClientError::Busy);
        }

        let payload = CreateComment {
            contents: self.comment_draft.clone(),
        };
        payload.validate()?;

        self.posting = true;
        let result = self.store.post_comment(self.task_id, &payload).await;
        self.posting = false;

        let comment = result?;
        self.comment_draft.clear();
        self.comments = self.store.task_comments(self.task_id).await.into();
        Ok(comment)
    }
}
