//! Derived views over fetched projects and tasks.
//!
//! Everything here is recomputed from the current task list on every
//! call. Nothing is cached or patched incrementally, so a reloaded
//! payload always produces fresh numbers.

use serde::Serialize;

use crate::models::{MyTasksGroup, Project, Task};
use crate::task_status::TaskStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Display text shown in place of a task name when every task is done.
///
/// This is a presentation convention, not a task name. Use
/// [`current_task`] to test for the "no current task" case.
pub const ALL_TASKS_COMPLETED_LABEL: &str = "All tasks completed!";

// ---------------------------------------------------------------------------
// Single-project derivations
// ---------------------------------------------------------------------------

/// The first task in sequence order that is not completed.
pub fn current_task(tasks: &[Task]) -> Option<&Task> {
    tasks.iter().find(|t| !t.status.is_completed())
}

/// The current task name, or [`ALL_TASKS_COMPLETED_LABEL`].
pub fn current_task_label(tasks: &[Task]) -> &str {
    current_task(tasks)
        .map(|t| t.name.as_str())
        .unwrap_or(ALL_TASKS_COMPLETED_LABEL)
}

/// Compute a rounded percentage from total and completed counts.
///
/// Returns 0 if `total` is 0.
pub fn compute_completion_pct(total: usize, completed: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed as f64 / total as f64 * 100.0).round() as u8;
    pct.min(100)
}

/// Percentage of tasks with status `Completed`, in `[0, 100]`.
pub fn completion_pct(tasks: &[Task]) -> u8 {
    let completed = tasks.iter().filter(|t| t.status.is_completed()).count();
    compute_completion_pct(tasks.len(), completed)
}

/// Number of tasks not yet completed.
pub fn pending_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.status.is_completed()).count()
}

/// Tasks worth surfacing on the "my tasks" page: everything in progress
/// plus the current task, in sequence order.
pub fn focus_tasks(tasks: &[Task]) -> Vec<&Task> {
    let current_id = current_task(tasks).map(|t| t.id);
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress || Some(t.id) == current_id)
        .collect()
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleCount {
    pub role: String,
    pub count: usize,
}

/// Count tasks per status. All five statuses are always present, in
/// [`TaskStatus::ALL`] order, even when their count is zero.
pub fn status_counts<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = TaskStatus::ALL
        .iter()
        .map(|&status| StatusCount { status, count: 0 })
        .collect();

    for task in tasks {
        if let Some(entry) = counts.iter_mut().find(|c| c.status == task.status) {
            entry.count += 1;
        }
    }
    counts
}

/// Count tasks per role label, in the order each role is first seen.
pub fn role_counts<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<RoleCount> {
    let mut counts: Vec<RoleCount> = Vec::new();
    for task in tasks {
        match counts.iter_mut().find(|c| c.role == task.role) {
            Some(entry) => entry.count += 1,
            None => counts.push(RoleCount {
                role: task.role.clone(),
                count: 1,
            }),
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Card-level view of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub current_task_label: String,
    pub completion_pct: u8,
}

impl ProjectSummary {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            current_task_label: current_task_label(&project.tasks).to_string(),
            completion_pct: completion_pct(&project.tasks),
        }
    }
}

/// Analytics totals over the flattened task set of many projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetSummary {
    pub total_projects: usize,
    pub total_tasks: usize,
    pub pending_tasks: usize,
    pub by_status: Vec<StatusCount>,
    pub by_role: Vec<RoleCount>,
    pub projects: Vec<ProjectSummary>,
}

impl FleetSummary {
    pub fn from_projects(projects: &[Project]) -> Self {
        let all_tasks = || projects.iter().flat_map(|p| p.tasks.iter());

        Self {
            total_projects: projects.len(),
            total_tasks: all_tasks().count(),
            pending_tasks: all_tasks().filter(|t| !t.status.is_completed()).count(),
            by_status: status_counts(all_tasks()),
            by_role: role_counts(all_tasks()),
            projects: projects.iter().map(ProjectSummary::from_project).collect(),
        }
    }
}

/// One project's entry on the "my tasks" page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusGroup {
    pub project_id: DbId,
    pub project_name: String,
    pub pending_count: usize,
    pub total: usize,
    pub focus_tasks: Vec<Task>,
}

impl FocusGroup {
    /// Build the entry for a group, or `None` when it has nothing to focus
    /// on (the page hides such projects).
    pub fn from_group(group: &MyTasksGroup) -> Option<Self> {
        let focus: Vec<Task> = focus_tasks(&group.tasks).into_iter().cloned().collect();
        if focus.is_empty() {
            return None;
        }
        Some(Self {
            project_id: group.project_id,
            project_name: group.project_name.clone(),
            pending_count: pending_count(&group.tasks),
            total: group.tasks.len(),
            focus_tasks: focus,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
