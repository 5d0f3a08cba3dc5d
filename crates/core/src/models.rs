//! Wire models for backend payloads.
//!
//! The client only ever holds transient copies of these; the backend owns
//! them. Optional fields default to `None` because the list and detail
//! endpoints send a reduced shape.

use serde::{Deserialize, Serialize};

use crate::task_status::TaskStatus;
use crate::types::DbId;

/// A project with its ordered task list.
///
/// Task order is significant and must never be changed client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub drawing_number: Option<String>,
    #[serde(default)]
    pub drawing_version: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub role_assignments: Vec<RoleAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub who: Option<String>,
    #[serde(default)]
    pub what: Option<String>,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub how: Option<String>,
}

/// One organizational role label mapped to an optional user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role: String,
    pub user_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    pub message: String,
}

/// Tasks assigned to the caller, grouped under their project
/// (`GET /my-tasks`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyTasksGroup {
    pub project_id: DbId,
    pub project_name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}
