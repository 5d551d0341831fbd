//! Dashboard page — cross-module summary.
//!
//! Three independent fetches run concurrently and write disjoint slices; a
//! failed fetch logs and leaves its slice empty without touching the others.

use tracing::error;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::finance::{self, models::ExpenseSummary};
use crate::interview::{self, models::InterviewSummary, models::STATUS_COMPLETED};
use crate::projects::{self, models::Project};
use crate::state::AppContext;
use crate::ui;

/// How many rows each quick-view section shows.
pub const RECENT_LIMIT: usize = 5;

#[derive(Default)]
pub struct DashboardData {
    pub interviews: Option<Vec<InterviewSummary>>,
    pub projects: Option<Vec<Project>>,
    pub expenses: Option<ExpenseSummary>,
}

pub async fn load(api: &ApiClient, organization_id: Uuid) -> DashboardData {
    let (interviews, projects, expenses) = tokio::join!(
        interview::list(api, organization_id),
        projects::fetch_projects(api, organization_id),
        finance::fetch_summary(api, organization_id),
    );

    DashboardData {
        interviews: keep("interviews", interviews).map(|list| {
            list.into_iter()
                .filter(|interview| interview.status == STATUS_COMPLETED)
                .take(RECENT_LIMIT)
                .collect()
        }),
        projects: keep("projects", projects)
            .map(|list| list.into_iter().take(RECENT_LIMIT).collect()),
        expenses: keep("expense summary", expenses),
    }
}

fn keep<T>(label: &str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!("failed to load {label}: {err}");
            None
        }
    }
}

pub async fn run(context: &AppContext) -> Result<(), ClientError> {
    let data = load(&context.api, context.organization_id).await;

    ui::banner(
        "Project Lightning",
        &format!("signed in as {}", context.session.email),
    );

    ui::section("Recent interviews");
    match &data.interviews {
        Some(interviews) if !interviews.is_empty() => {
            for interview in interviews {
                println!(
                    "  {} — {} ({})",
                    interview.candidate_name, interview.position, interview.status
                );
            }
        }
        Some(_) => println!("  No interviews yet"),
        None => println!("  (unavailable)"),
    }

    ui::section("Active projects");
    match &data.projects {
        Some(projects) if !projects.is_empty() => {
            for project in projects {
                println!(
                    "  {} — {} / {}",
                    project.project_name, project.status, project.priority
                );
            }
        }
        Some(_) => println!("  No projects yet"),
        None => println!("  (unavailable)"),
    }

    ui::section("Finance summary");
    match &data.expenses {
        Some(summary) if summary.total > 0.0 => {
            println!("  Total spending: ${:.2}", summary.total);
            for (category, amount) in finance::top_categories(summary, 3) {
                println!("  {category:<24} ${amount:.2}");
            }
        }
        Some(_) => println!("  No expenses yet"),
        None => println!("  (unavailable)"),
    }

    Ok(())
}
