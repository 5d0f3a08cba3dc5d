//! In-memory gateway used by the workflow tests.
//!
//! Behaves like the backend for the operations the workflows use, records
//! every call, and can be scripted to fail specific operations or to
//! delay `get_project` responses.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ambience_core::creation::ProjectCreationRequest;
use ambience_core::models::{MyTasksGroup, Notification, Project, Task, User};
use ambience_core::task_status::TaskStatus;
use ambience_core::types::DbId;
use ambience_gateway::{GatewayError, ProjectGateway, Session};
use ambience_workflows::Confirm;
use async_trait::async_trait;

#[derive(Default)]
pub struct FakeState {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
    pub notifications: Vec<Notification>,
    pub my_tasks: Vec<MyTasksGroup>,
    pub created: Vec<ProjectCreationRequest>,
    /// One entry per call, e.g. `"update_task_status:7:Completed"`.
    pub calls: Vec<String>,
    /// Operation names that answer with a 500.
    pub failing: HashSet<&'static str>,
    /// Delays applied to successive `get_project` calls after the
    /// backend state has been read.
    pub get_project_delays: VecDeque<Duration>,
}

#[derive(Default)]
pub struct FakeGateway {
    pub state: Mutex<FakeState>,
}

impl FakeGateway {
    pub fn with_projects(projects: Vec<Project>) -> Arc<Self> {
        let gateway = Self::default();
        gateway.state.lock().unwrap().projects = projects;
        Arc::new(gateway)
    }

    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.state.lock().unwrap().failing.remove(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Record the call and return a scripted failure if one is set.
    fn enter(&self, call: String, op: &'static str) -> Result<(), GatewayError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(call);
        if s.failing.contains(op) {
            return Err(GatewayError::Rejected {
                status: 500,
                body: format!("{op} failed"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectGateway for FakeGateway {
    async fn list_projects(&self, _session: &Session) -> Result<Vec<Project>, GatewayError> {
        self.enter("list_projects".into(), "list_projects")?;
        Ok(self.state.lock().unwrap().projects.clone())
    }

    async fn get_project(
        &self,
        _session: &Session,
        project_id: DbId,
    ) -> Result<Project, GatewayError> {
        self.enter(format!("get_project:{project_id}"), "get_project")?;
        let (project, delay) = {
            let mut s = self.state.lock().unwrap();
            let project = s.projects.iter().find(|p| p.id == project_id).cloned();
            (project, s.get_project_delays.pop_front())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        project.ok_or(GatewayError::Rejected {
            status: 404,
            body: "Project not found".into(),
        })
    }

    async fn create_project(&self, _session: &Session, name: &str) -> Result<(), GatewayError> {
        self.enter(format!("create_project:{name}"), "create_project")?;
        let mut s = self.state.lock().unwrap();
        let id = s.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        s.projects.push(project(id, name, Vec::new()));
        Ok(())
    }

    async fn create_project_full(
        &self,
        _session: &Session,
        request: &ProjectCreationRequest,
    ) -> Result<(), GatewayError> {
        self.enter(
            format!("create_project_full:{}", request.name),
            "create_project_full",
        )?;
        let mut s = self.state.lock().unwrap();
        let id = s.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        s.projects.push(project(id, &request.name, Vec::new()));
        s.created.push(request.clone());
        Ok(())
    }

    async fn update_task_status(
        &self,
        _session: &Session,
        task_id: DbId,
        status: TaskStatus,
    ) -> Result<(), GatewayError> {
        self.enter(
            format!("update_task_status:{task_id}:{status}"),
            "update_task_status",
        )?;
        let mut s = self.state.lock().unwrap();
        let task = s
            .projects
            .iter_mut()
            .flat_map(|p| p.tasks.iter_mut())
            .find(|t| t.id == task_id);
        match task {
            Some(t) => {
                t.status = status;
                Ok(())
            }
            None => Err(GatewayError::Rejected {
                status: 404,
                body: "Task not found".into(),
            }),
        }
    }

    async fn update_drawing_version(
        &self,
        _session: &Session,
        project_id: DbId,
        version: &str,
    ) -> Result<(), GatewayError> {
        self.enter(
            format!("update_drawing_version:{project_id}:{version}"),
            "update_drawing_version",
        )?;
        let mut s = self.state.lock().unwrap();
        if let Some(p) = s.projects.iter_mut().find(|p| p.id == project_id) {
            p.drawing_version = Some(version.to_string());
        }
        Ok(())
    }

    async fn list_users(&self, _session: &Session) -> Result<Vec<User>, GatewayError> {
        self.enter("list_users".into(), "list_users")?;
        Ok(self.state.lock().unwrap().users.clone())
    }

    async fn list_notifications(
        &self,
        _session: &Session,
    ) -> Result<Vec<Notification>, GatewayError> {
        self.enter("list_notifications".into(), "list_notifications")?;
        Ok(self.state.lock().unwrap().notifications.clone())
    }

    async fn delete_notification(
        &self,
        _session: &Session,
        notification_id: DbId,
    ) -> Result<(), GatewayError> {
        self.enter(
            format!("delete_notification:{notification_id}"),
            "delete_notification",
        )?;
        self.state
            .lock()
            .unwrap()
            .notifications
            .retain(|n| n.id != notification_id);
        Ok(())
    }

    async fn list_my_tasks(&self, _session: &Session) -> Result<Vec<MyTasksGroup>, GatewayError> {
        self.enter("list_my_tasks".into(), "list_my_tasks")?;
        Ok(self.state.lock().unwrap().my_tasks.clone())
    }
}

/// Records confirmation messages together with how many project reloads
/// had happened when each was shown.
pub struct RecordingConfirm {
    gateway: Arc<FakeGateway>,
    pub shown: Mutex<Vec<(String, usize)>>,
}

impl RecordingConfirm {
    pub fn new(gateway: Arc<FakeGateway>) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            shown: Mutex::new(Vec::new()),
        })
    }

    pub fn shown(&self) -> Vec<(String, usize)> {
        self.shown.lock().unwrap().clone()
    }
}

impl Confirm for RecordingConfirm {
    fn confirm(&self, message: &str) {
        let reloads = self.gateway.count_calls("get_project");
        self.shown.lock().unwrap().push((message.to_string(), reloads));
    }
}

pub fn session() -> Session {
    Session::with_token("test-token").with_user("priya", "Project Engineer")
}

pub fn task(id: DbId, name: &str, status: TaskStatus) -> Task {
    Task {
        id,
        name: name.to_string(),
        role: "Project Engineer".to_string(),
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
