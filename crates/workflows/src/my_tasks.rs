//! "My tasks" page: the caller's assigned tasks, grouped per project.

use std::sync::Arc;

use ambience_core::aggregation::FocusGroup;
use ambience_core::models::MyTasksGroup;
use ambience_gateway::{ProjectGateway, Session};

use crate::error::WorkflowError;
use crate::state::{Applied, ViewCell};

pub struct MyTasksView<G> {
    gateway: Arc<G>,
    groups: ViewCell<Vec<MyTasksGroup>>,
}

impl<G: ProjectGateway + 'static> MyTasksView<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            groups: ViewCell::new(),
        }
    }

    pub async fn load(&self, session: &Session) -> Result<(), WorkflowError> {
        let cell = self.groups.weak();
        let Some(generation) = cell.begin_reload().await else {
            return Ok(());
        };

        match self.gateway.list_my_tasks(session).await {
            Ok(groups) => {
                let count = groups.len();
                if cell.apply(generation, groups).await == Applied::Applied {
                    tracing::debug!(count, "Assigned tasks loaded");
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load assigned tasks");
                Err(e.into())
            }
        }
    }

    /// Projects with something to act on, each with its in-progress and
    /// current tasks. Projects with nothing to focus on are left out.
    pub async fn groups(&self) -> Vec<FocusGroup> {
        self.groups
            .read(|groups| {
                groups
                    .map(|list| list.iter().filter_map(FocusGroup::from_group).collect())
                    .unwrap_or_default()
            })
            .await
    }
}
