//! Project pages: create from a brief, list, and the task board.

use uuid::Uuid;

use crate::errors::ClientError;
use crate::projects::{self, models::TaskStatus};
use crate::state::AppContext;
use crate::ui;

pub async fn run_create(
    context: &AppContext,
    brief: &str,
    client_name: Option<&str>,
) -> Result<(), ClientError> {
    let created =
        projects::create_project(&context.api, context.organization_id, brief, client_name)
            .await?;

    ui::success_line(&format!(
        "Project \"{}\" created ({} / {} priority)",
        created.project.project_name, created.project.status, created.project.priority
    ));
    if let Some(description) = &created.project.description {
        ui::meta_line(description);
    }

    if !created.tasks.is_empty() {
        ui::section("Planned tasks");
        render_tasks_table(&created.tasks);
    }
    Ok(())
}

pub async fn run_list(context: &AppContext) -> Result<(), ClientError> {
    let projects = projects::fetch_projects(&context.api, context.organization_id).await?;
    let mut table = ui::table(&["Id", "Project", "Client", "Status", "Priority"]);
    for project in &projects {
        table.add_row(vec![
            project.id.to_string(),
            project.project_name.clone(),
            project.client_name.clone().unwrap_or_default(),
            project.status.clone(),
            project.priority.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn run_tasks(context: &AppContext, project_id: Uuid) -> Result<(), ClientError> {
    let tasks = projects::fetch_tasks(&context.api, project_id).await?;
    render_tasks_table(&tasks);
    Ok(())
}

/// Updates one task. With a project id at hand the local list is
/// reconciled from the envelope and re-rendered; no second fetch happens.
pub async fn run_task_update(
    context: &AppContext,
    task_id: Uuid,
    status: TaskStatus,
    project_id: Option<Uuid>,
) -> Result<(), ClientError> {
    let mut tasks = match project_id {
        Some(project_id) => projects::fetch_tasks(&context.api, project_id).await?,
        None => Vec::new(),
    };

    projects::update_task_status(&context.api, task_id, status).await?;
    ui::success_line(&format!("Task {task_id} is now {status}"));

    if !tasks.is_empty() {
        if projects::apply_status(&mut tasks, task_id, status) {
            render_tasks_table(&tasks);
        } else {
            ui::meta_line("task is not part of the given project");
        }
    }
    Ok(())
}

fn render_tasks_table(tasks: &[crate::projects::models::Task]) {
    let mut table = ui::table(&["Id", "Task", "Status", "Est. hours"]);
    for task in tasks {
        table.add_row(vec![
            task.id.to_string(),
            task.task_title.clone(),
            task.status.to_string(),
            task.estimated_hours
                .map(|hours| format!("{hours}h"))
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");
}
