//! `ambience` -- command-line client for the Ambience project dashboard.
//!
//! Talks to the project backend over HTTP and prints plain-text views of
//! projects, tasks, notifications and analytics.
//!
//! # Environment variables
//!
//! | Variable                        | Required | Default                 | Description                 |
//! |---------------------------------|----------|-------------------------|-----------------------------|
//! | `AMBIENCE_API_URL`              | no       | `http://localhost:8000` | Backend base URL            |
//! | `AMBIENCE_REQUEST_TIMEOUT_SECS` | no       | `30`                    | Per-request timeout         |
//! | `AMBIENCE_TOKEN`                | yes      | --                      | Bearer token from login     |
//! | `AMBIENCE_USERNAME`             | no       | --                      | Shown in the session banner |
//! | `AMBIENCE_ROLE`                 | no       | --                      | Caller's organizational role |

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ambience_core::aggregation::FleetSummary;
use ambience_core::types::DbId;
use ambience_gateway::{ClientConfig, ProjectApi, Session};
use ambience_workflows::{
    Confirm, MyTasksView, NotificationFeed, ProjectCreationForm, ProjectDetail, ProjectDetailView,
    ProjectListView,
};

#[derive(Debug, Parser)]
#[command(name = "ambience", version, about = "Ambience project dashboard client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List projects with their current task and completion.
    Projects,
    /// Show one project and its tasks.
    Project { project_id: DbId },
    /// Set a task's status, e.g. "In Progress".
    SetStatus {
        project_id: DbId,
        task_id: DbId,
        status: String,
    },
    /// Replace a project's drawing version.
    Drawing { project_id: DbId, version: String },
    /// Create a project. Any detail flag switches to the full form.
    Create {
        name: String,
        #[arg(long)]
        client_name: Option<String>,
        #[arg(long)]
        client_email: Option<String>,
        #[arg(long)]
        client_phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Assign a user to a role, as `ROLE=USER_ID`. Repeatable.
        #[arg(long = "assign", value_name = "ROLE=USER_ID")]
        assignments: Vec<String>,
    },
    /// List notifications.
    Notifications,
    /// Dismiss a notification.
    Dismiss { notification_id: DbId },
    /// Task counts by status and role, and progress per project.
    Analytics,
    /// Tasks assigned to the caller that need attention.
    MyTasks,
}

/// Prints the acknowledgment and carries on.
struct StdoutConfirm;

impl Confirm for StdoutConfirm {
    fn confirm(&self, message: &str) {
        println!("{message}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ambience_cli=info,ambience_workflows=info,ambience_gateway=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    let session = config.session();
    if !session.is_authenticated() {
        bail!("AMBIENCE_TOKEN is not set; log in and export the access token first");
    }

    let api = Arc::new(ProjectApi::from_config(&config).context("Failed to build HTTP client")?);
    tracing::debug!(api_url = %api.api_url(), ?session, "Client ready");

    run(cli.command, api, &session).await
}

async fn run(command: Command, api: Arc<ProjectApi>, session: &Session) -> anyhow::Result<()> {
    match command {
        Command::Projects => {
            let view = ProjectListView::new(api);
            view.load(session).await?;
            for summary in view.summaries().await {
                println!(
                    "{:>5}  {:<32} {:>3}%  {}",
                    summary.id, summary.name, summary.completion_pct, summary.current_task_label
                );
            }
        }
        Command::Project { project_id } => {
            let view = ProjectDetailView::new(api, project_id, Arc::new(StdoutConfirm));
            view.load(session).await?;
            print_detail(&view).await;
        }
        Command::SetStatus {
            project_id,
            task_id,
            status,
        } => {
            let view = ProjectDetailView::new(api, project_id, Arc::new(StdoutConfirm));
            view.set_task_status(session, task_id, &status).await?;
            print_detail(&view).await;
        }
        Command::Drawing {
            project_id,
            version,
        } => {
            let view = ProjectDetailView::new(api, project_id, Arc::new(StdoutConfirm));
            view.update_drawing_version(session, &version).await?;
            print_detail(&view).await;
        }
        Command::Create {
            name,
            client_name,
            client_email,
            client_phone,
            address,
            assignments,
        } => {
            let list = ProjectListView::new(Arc::clone(&api));
            let full = client_name.is_some()
                || client_email.is_some()
                || client_phone.is_some()
                || address.is_some()
                || !assignments.is_empty();

            if !full {
                if !list.quick_create(session, &name).await? {
                    bail!("Project name must not be blank");
                }
            } else {
                let mut form = ProjectCreationForm::new(api);
                let request = form.request_mut();
                request.name = name;
                request.client_name = client_name.unwrap_or_default();
                request.client_email = client_email.unwrap_or_default();
                request.client_phone = client_phone.unwrap_or_default();
                request.address = address.unwrap_or_default();
                for assignment in &assignments {
                    let (role, user_id) = parse_assignment(assignment)?;
                    form.assign(role, Some(user_id))?;
                }
                form.submit(session, &list).await?;
            }
            println!("Created. {} project(s) now listed.", list.projects().await.len());
        }
        Command::Notifications => {
            let feed = NotificationFeed::new(api);
            feed.load(session).await?;
            println!("{} unread", feed.unread_count().await);
            for n in feed.items().await {
                println!("{:>5}  {}", n.id, n.message);
            }
        }
        Command::Dismiss { notification_id } => {
            let feed = NotificationFeed::new(api);
            feed.load(session).await?;
            feed.remove(session, notification_id).await?;
            println!("{} unread", feed.unread_count().await);
        }
        Command::Analytics => {
            let view = ProjectListView::new(api);
            view.load(session).await?;
            print_fleet(&view.fleet_summary().await);
        }
        Command::MyTasks => {
            let view = MyTasksView::new(api);
            view.load(session).await?;
            let groups = view.groups().await;
            if groups.is_empty() {
                println!("Nothing needs your attention.");
            }
            for group in groups {
                println!(
                    "{} ({} of {} pending)",
                    group.project_name, group.pending_count, group.total
                );
                for task in &group.focus_tasks {
                    println!("  {:>5}  {:<40} {}", task.id, task.name, task.status);
                }
            }
        }
    }
    Ok(())
}

/// Split `ROLE=USER_ID` on the last `=`.
fn parse_assignment(raw: &str) -> anyhow::Result<(&str, DbId)> {
    let (role, user_id) = raw
        .rsplit_once('=')
        .with_context(|| format!("Expected ROLE=USER_ID, got '{raw}'"))?;
    let user_id = user_id
        .trim()
        .parse::<DbId>()
        .with_context(|| format!("Invalid user id in '{raw}'"))?;
    Ok((role.trim(), user_id))
}

async fn print_detail(view: &ProjectDetailView<ProjectApi>) {
    let Some(detail) = view.detail().await else {
        return;
    };
    let ProjectDetail { project } = &detail;

    println!("{} (#{})", project.name, project.id);
    if let Some(client) = &project.client_name {
        println!("Client:   {client}");
    }
    if let Some(address) = &project.address {
        println!("Address:  {address}");
    }
    println!(
        "Drawing:  {} rev {}",
        project.drawing_number.as_deref().unwrap_or("-"),
        project.drawing_version.as_deref().unwrap_or("-")
    );
    println!("Current:  {}", detail.current_task_label());
    println!("Progress: {}%", detail.completion_pct());
    println!();
    for task in &project.tasks {
        println!(
            "{:>5}  {:<40} {:<22} {}",
            task.id, task.name, task.status, task.role
        );
    }
}

fn print_fleet(fleet: &FleetSummary) {
    println!(
        "{} projects, {} tasks, {} pending",
        fleet.total_projects, fleet.total_tasks, fleet.pending_tasks
    );
    println!();
    println!("By status:");
    for entry in &fleet.by_status {
        println!("  {:<22} {}", entry.status, entry.count);
    }
    println!("By role:");
    for entry in &fleet.by_role {
        println!("  {:<22} {}", entry.role, entry.count);
    }
    println!("Progress:");
    for project in &fleet.projects {
        println!("  {:<32} {:>3}%", project.name, project.completion_pct);
    }
}
