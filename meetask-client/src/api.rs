/// HTTP adapter for the MeeTask backend
///
/// One method per REST endpoint. Requests carry the session cookie (the
/// backend uses redirect-based OAuth, so credentials live in the cookie
/// jar); responses are parsed JSON. Payloads are validated client-side
/// before anything is sent.
///
/// # Status mapping
///
/// - 2xx → decoded body
/// - 401 → `ClientError::Unauthenticated` (caller navigates to login)
/// - other 4xx/5xx → `ClientError::Api` carrying the server's `detail`
///   or `message` field when the body has one
///
/// # Example
///
/// ```no_run
/// use meetask_client::api::ApiClient;
/// use meetask_client::config::Config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::new("http://localhost:8000", 30, true);
/// let api = ApiClient::new(&config)?;
///
/// let me = api.me().await?;
/// println!("logged in as {}", me.user_name);
/// # Ok(())
/// # }
/// ```
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use meetask_shared::models::comment::{Comment, CreateComment};
use meetask_shared::models::group::{CreateGroup, Group, InviteMember};
use meetask_shared::models::member::Member;
use meetask_shared::models::task::{CreateTask, DraftTask, Priority, Task, UpdateTask};
use meetask_shared::models::user::CurrentUser;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};

/// Server-side narrowing for `GET /groups/:groupId/tasks`
///
/// Both parameters are optional; the board normally fetches the full list
/// and filters client-side, but the query is part of the cache key so a
/// narrowed list is never confused with the full one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskListQuery {
    /// Narrow to one priority
    pub priority: Option<Priority>,

    /// Narrow to one assignee member id
    pub assign: Option<i64>,
}

impl TaskListQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(priority) = self.priority {
            params.push(("priority", priority.as_str().to_string()));
        }
        if let Some(assign) = self.assign {
            params.push(("assign", assign.to_string()));
        }
        params
    }
}

#[derive(Debug, Serialize, Validate)]
struct ExtractMinutes {
    #[validate(length(min = 1, message = "minutes text must not be empty"))]
    text: String,
}

/// HTTP client for the MeeTask REST surface
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
}

impl ApiClient {
    /// Builds a client with the configured timeout and a cookie store for
    /// the session
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(ApiClient {
            http,
            config: config.clone(),
        })
    }

    /// Browser navigation entry for login (not an API call)
    pub fn login_url(&self) -> String {
        self.config.login_url()
    }

    /// Browser navigation entry for logout (not an API call)
    pub fn logout_url(&self) -> String {
        self.config.logout_url()
    }

    /// `GET /groups`
    pub async fn groups(&self) -> ClientResult<Vec<Group>> {
        self.get_json("/groups").await
    }

    /// `POST /groups`
    pub async fn create_group(&self, payload: &CreateGroup) -> ClientResult<Group> {
        payload.validate()?;
        self.post_json("/groups", payload).await
    }

    /// `GET /groups/:groupId/members`
    pub async fn group_members(&self, group_id: i64) -> ClientResult<Vec<Member>> {
        self.get_json(&format!("/groups/{group_id}/members")).await
    }

    /// `POST /groups/:groupId/invite`
    ///
    /// Fire-and-forget: the invitation result body is not modeled.
    pub async fn invite_member(&self, group_id: i64, payload: &InviteMember) -> ClientResult<()> {
        payload.validate()?;
        let _: serde_json::Value = self
            .post_json(&format!("/groups/{group_id}/invite"), payload)
            .await?;
        Ok(())
    }

    /// `GET /groups/:groupId/tasks`
    pub async fn group_tasks(
        &self,
        group_id: i64,
        query: &TaskListQuery,
    ) -> ClientResult<Vec<Task>> {
        let url = self.config.api_url(&format!("/groups/{group_id}/tasks"));
        let response = self.http.get(url).query(&query.params()).send().await?;
        Self::decode(response).await
    }

    /// `POST /groups/:groupId/tasks`
    pub async fn create_task(&self, group_id: i64, payload: &CreateTask) -> ClientResult<Task> {
        payload.validate()?;
        self.post_json(&format!("/groups/{group_id}/tasks"), payload)
            .await
    }

    /// `POST /groups/:groupId/minutes/tasks`
    ///
    /// Runs extraction over the pasted minutes; the returned drafts are
    /// unpersisted and live only in review state.
    pub async fn extract_tasks(&self, group_id: i64, text: &str) -> ClientResult<Vec<DraftTask>> {
        let payload = ExtractMinutes {
            text: text.to_string(),
        };
        payload.validate()?;
        self.post_json(&format!("/groups/{group_id}/minutes/tasks"), &payload)
            .await
    }

    /// `POST /groups/:groupId/tasks/save`
    ///
    /// Persists the reviewed drafts in one batch.
    pub async fn save_extracted(&self, group_id: i64, drafts: &[DraftTask]) -> ClientResult<()> {
        let _: serde_json::Value = self
            .post_json(&format!("/groups/{group_id}/tasks/save"), &drafts)
            .await?;
        Ok(())
    }

    /// `GET /tasks/:taskId`
    pub async fn task(&self, task_id: i64) -> ClientResult<Task> {
        self.get_json(&format!("/tasks/{task_id}")).await
    }

    /// `PUT /tasks/:taskId`
    pub async fn update_task(&self, task_id: i64, patch: &UpdateTask) -> ClientResult<Task> {
        patch.validate()?;
        let url = self.config.api_url(&format!("/tasks/{task_id}"));
        let response = self.http.put(url).json(patch).send().await?;
        Self::decode(response).await
    }

    /// `GET /tasks/:taskId/comments`
    pub async fn task_comments(&self, task_id: i64) -> ClientResult<Vec<Comment>> {
        self.get_json(&format!("/tasks/{task_id}/comments")).await
    }

    /// `POST /tasks/:taskId/comments`
    pub async fn create_comment(
        &self,
        task_id: i64,
        payload: &CreateComment,
    ) -> ClientResult<Comment> {
        payload.validate()?;
        self.post_json(&format!("/tasks/{task_id}/comments"), payload)
            .await
    }

    /// `GET /me`
    pub async fn me(&self) -> ClientResult<CurrentUser> {
        self.get_json("/me").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.http.get(self.config.api_url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .http
            .post(self.config.api_url(path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthenticated);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

/// Pulls a human-readable message out of an error body
///
/// FastAPI-style backends use `detail`; others use `message`. Falls back
/// to the raw body.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["detail", "message"] {
            if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    body.to_string()
}
