//! Client-side views and workflows for the Ambience project dashboard.
//!
//! Each view holds a private, transient copy of backend state and exposes
//! pull-based queries over it. Nothing here subscribes to changes: the
//! caller issues an explicit `load` whenever it wants fresh data.
//!
//! | View | Refresh policy after a write |
//! |------|------------------------------|
//! | [`ProjectDetailView`] | reload the project from the backend |
//! | [`ProjectListView`] | reload the list from the backend |
//! | [`NotificationFeed`] | drop the item locally, no refetch |
//! | [`ProjectCreationForm`] | reload the project list it was given |

pub mod creation;
pub mod error;
pub mod my_tasks;
pub mod notifications;
pub mod project_detail;
pub mod project_list;
mod state;

pub use creation::ProjectCreationForm;
pub use error::WorkflowError;
pub use my_tasks::MyTasksView;
pub use notifications::NotificationFeed;
pub use project_detail::{Confirm, ProjectDetail, ProjectDetailView};
pub use project_list::ProjectListView;
