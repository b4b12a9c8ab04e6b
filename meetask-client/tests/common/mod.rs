/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An in-process mock of the MeeTask backend (axum, ephemeral port)
/// - Seed data: one group with two members
/// - A real `Store` (reqwest + query cache) wired against the mock
/// - Failure injection and request counters for mutation-path tests
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use meetask_client::api::ApiClient;
use meetask_client::cache::QueryCache;
use meetask_client::config::Config;
use meetask_client::store::Store;
use meetask_shared::models::comment::{Comment, CreateComment};
use meetask_shared::models::group::{CreateGroup, Group, GroupRole, InviteMember};
use meetask_shared::models::member::Member;
use meetask_shared::models::task::{
    AssignedUser, CreateTask, DraftTask, Priority, Status, Task, UpdateTask,
};
use meetask_shared::models::user::CurrentUser;

/// The seeded group every test starts from
pub const GROUP_ID: i64 = 7;

/// Seeded member ids
pub const MEMBER_ALICE: i64 = 101;
pub const MEMBER_BOB: i64 = 102;

/// In-memory backend state shared by all mock handlers
pub struct MockState {
    groups: Mutex<Vec<Group>>,
    members: Mutex<Vec<Member>>,
    tasks: Mutex<Vec<Task>>,
    comments: Mutex<HashMap<i64, Vec<Comment>>>,
    next_id: AtomicI64,

    /// When set, the next state-changing request fails with 500 and the
    /// flag clears
    fail_next: AtomicBool,

    /// When cleared, `GET /me` answers 401
    authenticated: AtomicBool,

    /// How many comment posts actually reached the backend
    comment_posts: AtomicUsize,
}

impl MockState {
    fn seeded() -> Self {
        MockState {
            groups: Mutex::new(vec![Group {
                id: GROUP_ID,
                name: "Dev team".to_string(),
                role: GroupRole::Owner,
                member_length: 2,
                member_pictures: Vec::new(),
            }]),
            members: Mutex::new(vec![
                Member {
                    id: MEMBER_ALICE,
                    user_name: "alice".to_string(),
                    picture: String::new(),
                },
                Member {
                    id: MEMBER_BOB,
                    user_name: "bob".to_string(),
                    picture: String::new(),
                },
            ]),
            tasks: Mutex::new(Vec::new()),
            comments: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1000),
            fail_next: AtomicBool::new(false),
            authenticated: AtomicBool::new(true),
            comment_posts: AtomicUsize::new(0),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        self.fail_next.swap(false, Ordering::SeqCst)
    }

    fn find_member(&self, id: i64) -> Option<AssignedUser> {
        self.members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .map(|m| AssignedUser {
                id: m.id,
                user_name: m.user_name.clone(),
                picture: m.picture.clone(),
            })
    }

    fn insert_task(&self, group_id: i64, payload: &CreateTask) -> Task {
        let task = Task {
            id: self.next_id(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            deadline: payload.deadline,
            priority: payload.priority,
            status: payload.status,
            assigned_user: payload.assign.and_then(|id| self.find_member(id)),
            group_id: Some(group_id),
            created_at: None,
        };
        self.tasks.lock().unwrap().push(task.clone());
        task
    }
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "induced failure" })),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "no such resource" })),
    )
        .into_response()
}

async fn list_groups(State(state): State<Arc<MockState>>) -> Json<Vec<Group>> {
    Json(state.groups.lock().unwrap().clone())
}

async fn create_group(
    State(state): State<Arc<MockState>>,
    Json(payload): Json<CreateGroup>,
) -> Response {
    if state.take_failure() {
        return failure();
    }
    let group = Group {
        id: state.next_id(),
        name: payload.name,
        role: GroupRole::Owner,
        member_length: 1,
        member_pictures: Vec::new(),
    };
    state.groups.lock().unwrap().push(group.clone());
    (StatusCode::CREATED, Json(group)).into_response()
}

async fn list_members(
    State(state): State<Arc<MockState>>,
    Path(_group_id): Path<i64>,
) -> Json<Vec<Member>> {
    Json(state.members.lock().unwrap().clone())
}

async fn invite_member(
    State(state): State<Arc<MockState>>,
    Path(_group_id): Path<i64>,
    Json(_payload): Json<InviteMember>,
) -> Response {
    if state.take_failure() {
        return failure();
    }
    Json(json!({ "ok": true })).into_response()
}

#[derive(Deserialize)]
struct TaskListParams {
    priority: Option<Priority>,
    assign: Option<i64>,
}

async fn list_tasks(
    State(state): State<Arc<MockState>>,
    Path(group_id): Path<i64>,
    Query(params): Query<TaskListParams>,
) -> Json<Vec<Task>> {
    let tasks = state
        .tasks
        .lock()
        .unwrap()
        .iter()
        .filter(|t| t.group_id == Some(group_id))
        .filter(|t| params.priority.map_or(true, |p| t.priority == p))
        .filter(|t| params.assign.map_or(true, |a| t.assignee_id() == Some(a)))
        .cloned()
        .collect();
    Json(tasks)
}

async fn create_task(
    State(state): State<Arc<MockState>>,
    Path(group_id): Path<i64>,
    Json(payload): Json<CreateTask>,
) -> Response {
    if state.take_failure() {
        return failure();
    }
    let task = state.insert_task(group_id, &payload);
    (StatusCode::CREATED, Json(task)).into_response()
}

#[derive(Deserialize)]
struct ExtractRequest {
    text: String,
}

/// One draft per non-empty minutes line; a trailing `!` marks it high
/// priority so extraction output is not entirely uniform
async fn extract_tasks(
    State(state): State<Arc<MockState>>,
    Path(_group_id): Path<i64>,
    Json(payload): Json<ExtractRequest>,
) -> Response {
    if state.take_failure() {
        return failure();
    }
    let drafts: Vec<DraftTask> = payload
        .text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (title, priority) = match line.strip_suffix('!') {
                Some(rest) => (rest.trim().to_string(), Priority::High),
                None => (line.to_string(), Priority::NotSet),
            };
            DraftTask {
                title,
                description: String::new(),
                deadline: None,
                priority,
                status: Status::NotStartedYet,
                assign: None,
            }
        })
        .collect();
    Json(drafts).into_response()
}

async fn save_tasks(
    State(state): State<Arc<MockState>>,
    Path(group_id): Path<i64>,
    Json(drafts): Json<Vec<DraftTask>>,
) -> Response {
    if state.take_failure() {
        return failure();
    }
    for draft in &drafts {
        let payload = CreateTask {
            title: draft.title.clone(),
            description: draft.description.clone(),
            deadline: draft.deadline,
            status: draft.status,
            priority: draft.priority,
            assign: draft.assign,
        };
        state.insert_task(group_id, &payload);
    }
    Json(json!({ "saved": drafts.len() })).into_response()
}

async fn get_task(State(state): State<Arc<MockState>>, Path(task_id): Path<i64>) -> Response {
    let tasks = state.tasks.lock().unwrap();
    match tasks.iter().find(|t| t.id == task_id) {
        Some(task) => Json(task.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_task(
    State(state): State<Arc<MockState>>,
    Path(task_id): Path<i64>,
    Json(patch): Json<UpdateTask>,
) -> Response {
    if state.take_failure() {
        return failure();
    }
    let assigned = patch.assign.and_then(|id| state.find_member(id));
    let mut tasks = state.tasks.lock().unwrap();
    let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) else {
        return not_found();
    };

    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(deadline) = patch.deadline {
        task.deadline = Some(deadline);
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if patch.assign.is_some() {
        task.assigned_user = assigned;
    }
    Json(task.clone()).into_response()
}

async fn list_comments(
    State(state): State<Arc<MockState>>,
    Path(task_id): Path<i64>,
) -> Json<Vec<Comment>> {
    let comments = state.comments.lock().unwrap();
    Json(comments.get(&task_id).cloned().unwrap_or_default())
}

async fn create_comment(
    State(state): State<Arc<MockState>>,
    Path(task_id): Path<i64>,
    Json(payload): Json<CreateComment>,
) -> Response {
    state.comment_posts.fetch_add(1, Ordering::SeqCst);
    if state.take_failure() {
        return failure();
    }
    let comment = Comment {
        id: state.next_id(),
        contents: payload.contents,
        created_at: NaiveDate::from_ymd_opt(2026, 8, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        user: Member {
            id: MEMBER_ALICE,
            user_name: "alice".to_string(),
            picture: String::new(),
        },
    };
    state
        .comments
        .lock()
        .unwrap()
        .entry(task_id)
        .or_default()
        .push(comment.clone());
    (StatusCode::CREATED, Json(comment)).into_response()
}

async fn me(State(state): State<Arc<MockState>>) -> Response {
    if !state.authenticated.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "not authenticated" })),
        )
            .into_response();
    }
    Json(CurrentUser {
        user_name: "alice".to_string(),
        picture: String::new(),
    })
    .into_response()
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/:group_id/members", get(list_members))
        .route("/groups/:group_id/invite", post(invite_member))
        .route("/groups/:group_id/tasks", get(list_tasks).post(create_task))
        .route("/groups/:group_id/minutes/tasks", post(extract_tasks))
        .route("/groups/:group_id/tasks/save", post(save_tasks))
        .route("/tasks/:task_id", get(get_task).put(update_task))
        .route("/tasks/:task_id/comments", get(list_comments).post(create_comment))
        .route("/me", get(me))
        .with_state(state)
}

/// Test context containing the mock backend and a real store against it
pub struct TestContext {
    pub store: Store,
    pub state: Arc<MockState>,
    pub base_url: String,
}

impl TestContext {
    /// Spins up a fresh mock backend and connects a store to it
    pub async fn new() -> anyhow::Result<Self> {
        let state = Arc::new(MockState::seeded());
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend exited");
        });

        let base_url = format!("http://{addr}");
        let config = Config::new(base_url.clone(), 5, true);
        let store = Store::new(
            ApiClient::new(&config)?,
            QueryCache::new(config.retry_reads),
        );

        Ok(TestContext {
            store,
            state,
            base_url,
        })
    }

    /// Makes the next state-changing request fail with a 500
    pub fn fail_next_request(&self) {
        self.state.fail_next.store(true, Ordering::SeqCst);
    }

    /// Toggles whether `GET /me` answers 401
    pub fn set_authenticated(&self, authenticated: bool) {
        self.state
            .authenticated
            .store(authenticated, Ordering::SeqCst);
    }

    /// How many comment posts reached the backend
    pub fn comment_posts(&self) -> usize {
        self.state.comment_posts.load(Ordering::SeqCst)
    }

    /// Seeds one task directly into backend state, bypassing the API
    pub fn seed_task(&self, payload: CreateTask) -> Task {
        self.state.insert_task(GROUP_ID, &payload)
    }
}
