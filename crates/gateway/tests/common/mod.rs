//! In-process stub of the dashboard backend.
//!
//! Serves the endpoints the gateway consumes from shared, inspectable
//! state on an ephemeral `127.0.0.1` port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ambience_core::models::{MyTasksGroup, Notification, Project, Task, User};
use ambience_core::task_status::TaskStatus;
use ambience_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};

#[derive(Default)]
pub struct StubState {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
    pub notifications: Vec<Notification>,
    pub my_tasks: Vec<MyTasksGroup>,
    /// Raw JSON bodies received on `/projects/full-create`.
    pub full_create_bodies: Vec<serde_json::Value>,
    /// Raw `status` query values received on `/tasks/{id}/status`.
    pub status_updates: Vec<(DbId, String)>,
    /// `Authorization` header of the most recent request, if any.
    pub last_authorization: Option<String>,
    /// When set, every endpoint answers with this status.
    pub fail_with: Option<StatusCode>,
    /// When set, `GET /projects/` returns this raw JSON instead.
    pub raw_projects: Option<serde_json::Value>,
}

pub type SharedState = Arc<Mutex<StubState>>;

pub fn task(id: DbId, name: &str, role: &str, status: TaskStatus) -> Task {
    Task {
        id,
        name: name.to_string(),
        role: role.to_string(),
        status,
        who: None,
        what: None,
        when: None,
        how: None,
    }
}

pub fn project(id: DbId, name: &str, tasks: Vec<Task>) -> Project {
    Project {
        id,
        name: name.to_string(),
        client_name: None,
        client_email: None,
        client_phone: None,
        address: None,
        drawing_number: None,
        drawing_version: None,
        tasks,
        role_assignments: Vec::new(),
    }
}

/// Start the stub and return its base URL.
pub async fn spawn_backend(state: SharedState) -> String {
    let app = Router::new()
        .route("/projects/", get(list_projects).post(quick_create))
        .route("/projects/full-create", post(full_create))
        .route("/projects/{id}", get(get_project))
        .route("/projects/{id}/drawing-version", patch(update_drawing_version))
        .route("/tasks/{id}/status", patch(update_task_status))
        .route("/users", get(list_users))
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}", delete(delete_notification))
        .route("/my-tasks", get(list_my_tasks))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn not_found(detail: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "detail": detail })),
    )
        .into_response()
}

/// Record the auth header and short-circuit when a failure is scripted.
fn enter(state: &SharedState, headers: &HeaderMap) -> Option<Response> {
    let mut s = state.lock().unwrap();
    s.last_authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    s.fail_with
        .map(|code| (code, "scripted failure").into_response())
}

async fn list_projects(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    let s = state.lock().unwrap();
    match &s.raw_projects {
        Some(raw) => Json(raw.clone()).into_response(),
        None => Json(s.projects.clone()).into_response(),
    }
}

async fn quick_create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    let mut s = state.lock().unwrap();
    let id = s.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let name = params.get("name").cloned().unwrap_or_default();
    s.projects.push(project(id, &name, Vec::new()));
    Json(serde_json::json!({ "id": id, "name": name })).into_response()
}

async fn full_create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    state.lock().unwrap().full_create_bodies.push(body);
    StatusCode::CREATED.into_response()
}

async fn get_project(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    let s = state.lock().unwrap();
    match s.projects.iter().find(|p| p.id == id) {
        Some(p) => Json(p.clone()).into_response(),
        None => not_found("Project not found"),
    }
}

async fn update_drawing_version(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    let mut s = state.lock().unwrap();
    match s.projects.iter_mut().find(|p| p.id == id) {
        Some(p) => {
            p.drawing_version = params.get("version").cloned();
            StatusCode::OK.into_response()
        }
        None => not_found("Project not found"),
    }
}

async fn update_task_status(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    let raw = params.get("status").cloned().unwrap_or_default();
    let mut s = state.lock().unwrap();
    s.status_updates.push((id, raw.clone()));

    let Ok(status) = TaskStatus::from_str_value(&raw) else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "bad status").into_response();
    };
    let task = s
        .projects
        .iter_mut()
        .flat_map(|p| p.tasks.iter_mut())
        .find(|t| t.id == id);
    match task {
        Some(t) => {
            t.status = status;
            Json(t.clone()).into_response()
        }
        None => not_found("Task not found"),
    }
}

async fn list_users(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    Json(state.lock().unwrap().users.clone()).into_response()
}

async fn list_notifications(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    Json(state.lock().unwrap().notifications.clone()).into_response()
}

async fn delete_notification(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    let mut s = state.lock().unwrap();
    let before = s.notifications.len();
    s.notifications.retain(|n| n.id != id);
    if s.notifications.len() == before {
        return not_found("Notification not found");
    }
    StatusCode::OK.into_response()
}

async fn list_my_tasks(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if let Some(r) = enter(&state, &headers) {
        return r;
    }
    Json(state.lock().unwrap().my_tasks.clone()).into_response()
}
