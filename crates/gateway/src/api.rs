//! REST API client for the dashboard backend.
//!
//! Implements [`ProjectGateway`] over HTTP using [`reqwest`]. Query
//! parameters are URL-encoded by `reqwest`, so status strings such as
//! `"Waiting for Approval"` reach the backend verbatim.

use std::time::Duration;

use ambience_core::creation::ProjectCreationRequest;
use ambience_core::models::{MyTasksGroup, Notification, Project, User};
use ambience_core::task_status::TaskStatus;
use ambience_core::types::DbId;
use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::gateway::ProjectGateway;
use crate::session::Session;

/// HTTP client for one dashboard backend.
#[derive(Clone)]
pub struct ProjectApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request itself failed (network, DNS, TLS, timeout) or the body
    /// could not be decoded.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status code.
    #[error("Backend rejected request ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ProjectApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client with the configured base URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Attach the session's bearer token, if any.
    fn authorize(builder: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
        match session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GatewayError::Rejected`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), GatewayError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectGateway for ProjectApi {
    async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, GatewayError> {
        tracing::debug!("GET /projects/");
        let response = Self::authorize(self.client.get(self.url("/projects/")), session)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_project(
        &self,
        session: &Session,
        project_id: DbId,
    ) -> Result<Project, GatewayError> {
        tracing::debug!(project_id, "GET /projects/{{id}}");
        let response = Self::authorize(
            self.client.get(self.url(&format!("/projects/{project_id}"))),
            session,
        )
        .send()
        .await?;
        Self::parse_response(response).await
    }

    async fn create_project(&self, session: &Session, name: &str) -> Result<(), GatewayError> {
        tracing::debug!(name, "POST /projects/");
        let response = Self::authorize(
            self.client.post(self.url("/projects/")).query(&[("name", name)]),
            session,
        )
        .send()
        .await?;
        Self::check_status(response).await
    }

    async fn create_project_full(
        &self,
        session: &Session,
        request: &ProjectCreationRequest,
    ) -> Result<(), GatewayError> {
        tracing::debug!(name = %request.name, "POST /projects/full-create");
        let response = Self::authorize(
            self.client
                .post(self.url("/projects/full-create"))
                .json(request),
            session,
        )
        .send()
        .await?;
        Self::check_status(response).await
    }

    async fn update_task_status(
        &self,
        session: &Session,
        task_id: DbId,
        status: TaskStatus,
    ) -> Result<(), GatewayError> {
        tracing::debug!(task_id, status = %status, "PATCH /tasks/{{id}}/status");
        let response = Self::authorize(
            self.client
                .patch(self.url(&format!("/tasks/{task_id}/status")))
                .query(&[("status", status.as_str())]),
            session,
        )
        .send()
        .await?;
        Self::check_status(response).await
    }

    async fn update_drawing_version(
        &self,
        session: &Session,
        project_id: DbId,
        version: &str,
    ) -> Result<(), GatewayError> {
        tracing::debug!(project_id, version, "PATCH /projects/{{id}}/drawing-version");
        let response = Self::authorize(
            self.client
                .patch(self.url(&format!("/projects/{project_id}/drawing-version")))
                .query(&[("version", version)]),
            session,
        )
        .send()
        .await?;
        Self::check_status(response).await
    }

    async fn list_users(&self, session: &Session) -> Result<Vec<User>, GatewayError> {
        tracing::debug!("GET /users");
        let response = Self::authorize(self.client.get(self.url("/users")), session)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_notifications(
        &self,
        session: &Session,
    ) -> Result<Vec<Notification>, GatewayError> {
        tracing::debug!("GET /notifications");
        let response = Self::authorize(self.client.get(self.url("/notifications")), session)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_notification(
        &self,
        session: &Session,
        notification_id: DbId,
    ) -> Result<(), GatewayError> {
        tracing::debug!(notification_id, "DELETE /notifications/{{id}}");
        let response = Self::authorize(
            self.client
                .delete(self.url(&format!("/notifications/{notification_id}"))),
            session,
        )
        .send()
        .await?;
        Self::check_status(response).await
    }

    async fn list_my_tasks(&self, session: &Session) -> Result<Vec<MyTasksGroup>, GatewayError> {
        tracing::debug!("GET /my-tasks");
        let response = Self::authorize(self.client.get(self.url("/my-tasks")), session)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
