//! Single-project view: task status changes and drawing revisions.
//!
//! Both workflows write through the gateway and then reload the whole
//! project. The write response is never used to patch local tasks, so
//! derived values always come from the reloaded task list.
//!
//! The `spawn_*` variants run the same workflow as a detached task. The
//! request is never cancelled if the view is dropped meanwhile; its
//! response is simply discarded.

use std::sync::Arc;

use ambience_core::aggregation;
use ambience_core::models::{Project, Task};
use ambience_core::task_status::TaskStatus;
use ambience_core::types::DbId;
use ambience_gateway::{ProjectGateway, Session};
use tokio::task::JoinHandle;

use crate::error::WorkflowError;
use crate::state::{Applied, ViewCell, WeakCell};

/// Blocking acknowledgment shown to the user after a drawing revision
/// has been accepted.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str);
}

/// A loaded project. Derived values are computed on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: Project,
}

impl ProjectDetail {
    pub fn current_task(&self) -> Option<&Task> {
        aggregation::current_task(&self.project.tasks)
    }

    pub fn current_task_label(&self) -> &str {
        aggregation::current_task_label(&self.project.tasks)
    }

    pub fn completion_pct(&self) -> u8 {
        aggregation::completion_pct(&self.project.tasks)
    }
}

pub struct ProjectDetailView<G> {
    gateway: Arc<G>,
    project_id: DbId,
    detail: ViewCell<ProjectDetail>,
    confirm: Arc<dyn Confirm>,
}

impl<G: ProjectGateway + 'static> ProjectDetailView<G> {
    pub fn new(gateway: Arc<G>, project_id: DbId, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            gateway,
            project_id,
            detail: ViewCell::new(),
            confirm,
        }
    }

    pub fn project_id(&self) -> DbId {
        self.project_id
    }

    /// The held project, `None` until the first successful load.
    pub async fn detail(&self) -> Option<ProjectDetail> {
        self.detail.snapshot().await
    }

    pub async fn load(&self, session: &Session) -> Result<(), WorkflowError> {
        reload(self.gateway.as_ref(), &self.detail.weak(), self.project_id, session).await
    }

    /// Set a task's status, then reload the project.
    ///
    /// `status` must be one of the five wire strings; anything else is
    /// rejected before a request is sent. Any status may follow any other.
    pub async fn set_task_status(
        &self,
        session: &Session,
        task_id: DbId,
        status: &str,
    ) -> Result<(), WorkflowError> {
        change_status(
            self.gateway.as_ref(),
            &self.detail.weak(),
            self.project_id,
            session,
            task_id,
            status,
        )
        .await
    }

    /// Replace the project's drawing version, confirm, then reload.
    ///
    /// The held copy only changes through the reload after a successful
    /// write. A failed write leaves it as it was.
    pub async fn update_drawing_version(
        &self,
        session: &Session,
        version: &str,
    ) -> Result<(), WorkflowError> {
        revise_drawing(
            self.gateway.as_ref(),
            &self.detail.weak(),
            self.confirm.as_ref(),
            self.project_id,
            session,
            version,
        )
        .await
    }

    pub fn spawn_load(&self, session: Session) -> JoinHandle<Result<(), WorkflowError>> {
        let gateway = Arc::clone(&self.gateway);
        let cell = self.detail.weak();
        let project_id = self.project_id;
        tokio::spawn(async move { reload(gateway.as_ref(), &cell, project_id, &session).await })
    }

    pub fn spawn_set_task_status(
        &self,
        session: Session,
        task_id: DbId,
        status: impl Into<String>,
    ) -> JoinHandle<Result<(), WorkflowError>> {
        let gateway = Arc::clone(&self.gateway);
        let cell = self.detail.weak();
        let project_id = self.project_id;
        let status = status.into();
        tokio::spawn(async move {
            change_status(gateway.as_ref(), &cell, project_id, &session, task_id, &status).await
        })
    }

    pub fn spawn_update_drawing_version(
        &self,
        session: Session,
        version: impl Into<String>,
    ) -> JoinHandle<Result<(), WorkflowError>> {
        let gateway = Arc::clone(&self.gateway);
        let cell = self.detail.weak();
        let confirm = Arc::clone(&self.confirm);
        let project_id = self.project_id;
        let version = version.into();
        tokio::spawn(async move {
            revise_drawing(
                gateway.as_ref(),
                &cell,
                confirm.as_ref(),
                project_id,
                &session,
                &version,
            )
            .await
        })
    }
}

// ---------------------------------------------------------------------------
// Workflow bodies
// ---------------------------------------------------------------------------

async fn reload<G: ProjectGateway + ?Sized>(
    gateway: &G,
    cell: &WeakCell<ProjectDetail>,
    project_id: DbId,
    session: &Session,
) -> Result<(), WorkflowError> {
    let Some(generation) = cell.begin_reload().await else {
        tracing::debug!(project_id, "Project view dropped, skipping reload");
        return Ok(());
    };

    let project = match gateway.get_project(session, project_id).await {
        Ok(project) => project,
        Err(e) => {
            tracing::warn!(error = %e, project_id, "Failed to load project");
            return Err(e.into());
        }
    };

    match cell.apply(generation, ProjectDetail { project }).await {
        Applied::Applied => tracing::debug!(project_id, generation, "Project loaded"),
        Applied::Stale => {
            tracing::debug!(project_id, generation, "Discarded out-of-date project reload")
        }
        Applied::ViewGone => {
            tracing::debug!(project_id, "Project view dropped, discarding response")
        }
    }
    Ok(())
}

async fn change_status<G: ProjectGateway + ?Sized>(
    gateway: &G,
    cell: &WeakCell<ProjectDetail>,
    project_id: DbId,
    session: &Session,
    task_id: DbId,
    status: &str,
) -> Result<(), WorkflowError> {
    let status = match TaskStatus::from_str_value(status) {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(error = %e, task_id, "Rejected task status");
            return Err(e.into());
        }
    };

    if let Err(e) = gateway.update_task_status(session, task_id, status).await {
        tracing::warn!(
            error = %e,
            project_id,
            task_id,
            status = %status,
            "Failed to update task status"
        );
        return Err(e.into());
    }
    tracing::info!(project_id, task_id, status = %status, "Task status updated");

    reload(gateway, cell, project_id, session).await
}

async fn revise_drawing<G: ProjectGateway + ?Sized>(
    gateway: &G,
    cell: &WeakCell<ProjectDetail>,
    confirm: &dyn Confirm,
    project_id: DbId,
    session: &Session,
    version: &str,
) -> Result<(), WorkflowError> {
    if let Err(e) = gateway
        .update_drawing_version(session, project_id, version)
        .await
    {
        tracing::warn!(error = %e, project_id, version, "Failed to update drawing version");
        return Err(e.into());
    }
    tracing::info!(project_id, version, "Drawing version updated");

    confirm.confirm(&format!("Drawing version updated to {version}"));

    reload(gateway, cell, project_id, session).await
}
