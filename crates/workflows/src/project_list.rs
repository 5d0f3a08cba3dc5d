//! Project list: the cards page and the analytics page.

use std::sync::Arc;

use ambience_core::aggregation::{FleetSummary, ProjectSummary};
use ambience_core::models::Project;
use ambience_gateway::{ProjectGateway, Session};

use crate::error::WorkflowError;
use crate::state::{Applied, ViewCell, WeakCell};

pub struct ProjectListView<G> {
    gateway: Arc<G>,
    projects: ViewCell<Vec<Project>>,
}

impl<G: ProjectGateway + 'static> ProjectListView<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            projects: ViewCell::new(),
        }
    }

    /// Fetch the full project list, replacing the held copy wholesale.
    ///
    /// On failure the previous list stays in place.
    pub async fn load(&self, session: &Session) -> Result<(), WorkflowError> {
        reload(self.gateway.as_ref(), &self.projects.weak(), session).await
    }

    /// Quick-create a project by name, then reload the list.
    ///
    /// A blank name is ignored without contacting the backend and
    /// returns `Ok(false)`. Once the create succeeds the result is
    /// `Ok(true)` even if the reload fails; the list then keeps its
    /// previous contents.
    pub async fn quick_create(&self, session: &Session, name: &str) -> Result<bool, WorkflowError> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("Blank project name, skipping quick-create");
            return Ok(false);
        }

        if let Err(e) = self.gateway.create_project(session, name).await {
            tracing::warn!(error = %e, name, "Failed to create project");
            return Err(e.into());
        }
        tracing::info!(name, "Project created");

        // The project exists at this point; `load` has already logged the failure.
        if let Err(e) = self.load(session).await {
            tracing::debug!(error = %e, name, "Project list not refreshed after quick-create");
        }
        Ok(true)
    }

    /// The held projects, empty before the first successful load.
    pub async fn projects(&self) -> Vec<Project> {
        self.projects.snapshot().await.unwrap_or_default()
    }

    pub async fn summaries(&self) -> Vec<ProjectSummary> {
        self.projects
            .read(|projects| {
                projects
                    .map(|list| list.iter().map(ProjectSummary::from_project).collect())
                    .unwrap_or_default()
            })
            .await
    }

    pub async fn fleet_summary(&self) -> FleetSummary {
        self.projects
            .read(|projects| FleetSummary::from_projects(projects.map(Vec::as_slice).unwrap_or(&[])))
            .await
    }
}

async fn reload<G: ProjectGateway + ?Sized>(
    gateway: &G,
    cell: &WeakCell<Vec<Project>>,
    session: &Session,
) -> Result<(), WorkflowError> {
    let Some(generation) = cell.begin_reload().await else {
        return Ok(());
    };

    let projects = match gateway.list_projects(session).await {
        Ok(projects) => projects,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load projects");
            return Err(e.into());
        }
    };

    let count = projects.len();
    match cell.apply(generation, projects).await {
        Applied::Applied => tracing::debug!(count, "Project list loaded"),
        Applied::Stale => tracing::debug!(generation, "Discarded out-of-date project list"),
        Applied::ViewGone => tracing::debug!("Project list view dropped, discarding response"),
    }
    Ok(())
}
