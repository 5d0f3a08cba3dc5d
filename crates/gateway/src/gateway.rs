use ambience_core::creation::ProjectCreationRequest;
use ambience_core::models::{MyTasksGroup, Notification, Project, User};
use ambience_core::task_status::TaskStatus;
use ambience_core::types::DbId;
use async_trait::async_trait;

use crate::api::GatewayError;
use crate::session::Session;

/// The backend operations the workflows depend on.
///
/// [`ProjectApi`](crate::api::ProjectApi) is the HTTP implementation.
/// Workflows are generic over this trait so they can run against any
/// authority that honours the same contract.
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// `GET /projects/`
    async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, GatewayError>;

    /// `GET /projects/{id}`
    async fn get_project(&self, session: &Session, project_id: DbId)
        -> Result<Project, GatewayError>;

    /// `POST /projects/?name=`
    async fn create_project(&self, session: &Session, name: &str) -> Result<(), GatewayError>;

    /// `POST /projects/full-create`
    async fn create_project_full(
        &self,
        session: &Session,
        request: &ProjectCreationRequest,
    ) -> Result<(), GatewayError>;

    /// `PATCH /tasks/{id}/status?status=`
    async fn update_task_status(
        &self,
        session: &Session,
        task_id: DbId,
        status: TaskStatus,
    ) -> Result<(), GatewayError>;

    /// `PATCH /projects/{id}/drawing-version?version=`
    async fn update_drawing_version(
        &self,
        session: &Session,
        project_id: DbId,
        version: &str,
    ) -> Result<(), GatewayError>;

    /// `GET /users`
    async fn list_users(&self, session: &Session) -> Result<Vec<User>, GatewayError>;

    /// `GET /notifications`
    async fn list_notifications(&self, session: &Session)
        -> Result<Vec<Notification>, GatewayError>;

    /// `DELETE /notifications/{id}`
    async fn delete_notification(
        &self,
        session: &Session,
        notification_id: DbId,
    ) -> Result<(), GatewayError>;

    /// `GET /my-tasks`
    async fn list_my_tasks(&self, session: &Session) -> Result<Vec<MyTasksGroup>, GatewayError>;
}
