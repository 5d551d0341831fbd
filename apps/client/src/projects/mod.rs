//! Projects — AI-planned project creation and task tracking.

pub mod models;
pub mod page;

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ClientError;

use models::{CreatedProject, Project, Task, TaskStatus};

#[derive(Debug, Deserialize)]
struct ProjectList {
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct TaskList {
    tasks: Vec<Task>,
}

/// Envelope with no payload beyond the success flag.
#[derive(Debug, Deserialize)]
struct Acknowledged {}

pub async fn fetch_projects(
    api: &ApiClient,
    organization_id: Uuid,
) -> Result<Vec<Project>, ClientError> {
    let list: ProjectList = api
        .get(
            "/api/projects",
            &[("organization_id", organization_id.to_string())],
        )
        .await?;
    Ok(list.projects)
}

/// Creates a project from a natural-language brief; the backend plans the
/// task breakdown.
pub async fn create_project(
    api: &ApiClient,
    organization_id: Uuid,
    brief: &str,
    client_name: Option<&str>,
) -> Result<CreatedProject, ClientError> {
    api.post(
        "/api/project/create",
        &json!({
            "brief": brief,
            "client_name": client_name,
            "organization_id": organization_id,
        }),
    )
    .await
}

pub async fn fetch_tasks(api: &ApiClient, project_id: Uuid) -> Result<Vec<Task>, ClientError> {
    let list: TaskList = api
        .get(&format!("/api/project/{project_id}/tasks"), &[])
        .await?;
    Ok(list.tasks)
}

pub async fn update_task_status(
    api: &ApiClient,
    task_id: Uuid,
    status: TaskStatus,
) -> Result<(), ClientError> {
    let _: Acknowledged = api
        .post(
            "/api/task/update",
            &json!({
                "task_id": task_id,
                "status": status,
            }),
        )
        .await?;
    Ok(())
}

/// Reconciles the local view after a successful update instead of
/// re-fetching the whole list. Returns false when the task is not present.
pub fn apply_status(tasks: &mut [Task], task_id: Uuid, status: TaskStatus) -> bool {
    match tasks.iter_mut().find(|task| task.id == task_id) {
        Some(task) => {
            task.status = status;
            true
        }
        None => false,
    }
}
