//! Full project creation form.
//!
//! Submits whatever the form holds. Required fields, e-mail and phone
//! formats, and duplicate user-to-role assignments are all left to the
//! backend to judge.

use std::sync::Arc;

use ambience_core::creation::ProjectCreationRequest;
use ambience_core::models::User;
use ambience_core::types::DbId;
use ambience_gateway::{ProjectGateway, Session};

use crate::error::WorkflowError;
use crate::project_list::ProjectListView;

pub struct ProjectCreationForm<G> {
    gateway: Arc<G>,
    request: ProjectCreationRequest,
    users: Vec<User>,
}

impl<G: ProjectGateway + 'static> ProjectCreationForm<G> {
    /// An empty form, pre-seeded with every organizational role label.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            request: ProjectCreationRequest::default(),
            users: Vec::new(),
        }
    }

    pub fn request(&self) -> &ProjectCreationRequest {
        &self.request
    }

    /// Mutable access for the free-text fields. Role labels stay fixed;
    /// use [`assign`](Self::assign) for users.
    pub fn request_mut(&mut self) -> &mut ProjectCreationRequest {
        &mut self.request
    }

    pub fn assign(&mut self, role: &str, user_id: Option<DbId>) -> Result<(), WorkflowError> {
        self.request.assign(role, user_id)?;
        Ok(())
    }

    /// Users available for role pickers, empty until loaded.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub async fn load_users(&mut self, session: &Session) -> Result<(), WorkflowError> {
        match self.gateway.list_users(session).await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "Users loaded");
                self.users = users;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load users");
                Err(e.into())
            }
        }
    }

    /// Submit the form, then reload `projects` so the new project shows.
    ///
    /// On success the form is reset to a fresh, seeded request. On failure
    /// it keeps everything the user entered.
    pub async fn submit(
        &mut self,
        session: &Session,
        projects: &ProjectListView<G>,
    ) -> Result<(), WorkflowError> {
        if let Err(e) = self
            .gateway
            .create_project_full(session, &self.request)
            .await
        {
            tracing::warn!(error = %e, name = %self.request.name, "Failed to create project");
            return Err(e.into());
        }
        tracing::info!(name = %self.request.name, "Project created with role assignments");

        self.request = ProjectCreationRequest::default();

        // The project exists at this point; the list view has already logged the failure.
        if let Err(e) = projects.load(session).await {
            tracing::debug!(error = %e, "Project list not refreshed after create");
        }
        Ok(())
    }
}
