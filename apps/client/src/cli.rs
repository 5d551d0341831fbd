//! Command tree — each subcommand is one page of the client — and the
//! dispatch that wires a page to an established [`AppContext`].

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::auth::Credentials;
use crate::chat;
use crate::config::Config;
use crate::dashboard;
use crate::errors::ClientError;
use crate::finance;
use crate::interview::{self, models::StartForm};
use crate::migration;
use crate::projects::{self, models::TaskStatus};
use crate::state::{self, AppContext};
use crate::ui;

#[derive(Parser)]
#[command(
    name = "lightning",
    version,
    about = "Terminal client for the Project Lightning ERP backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in (or sign up) and verify your organization is provisioned
    Login {
        /// Create the account first
        #[arg(long)]
        signup: bool,
    },
    /// Cross-module summary: recent interviews, projects, and spending
    Dashboard,
    /// Talk to the unified AI assistant
    Chat {
        /// Show what the assistant can do instead of chatting
        #[arg(long)]
        capabilities: bool,
        /// Send a single message and print the reply
        #[arg(long, value_name = "MESSAGE")]
        oneshot: Option<String>,
    },
    /// AI interview conductor
    Interview {
        #[command(subcommand)]
        command: InterviewCommand,
    },
    /// Projects and AI-generated task plans
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Task operations
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Expense tracking with AI categorization
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },
    /// Magic import: analyze a CSV, then import the expenses
    Import {
        file: PathBuf,
        /// Stop after showing the analysis
        #[arg(long)]
        analyze_only: bool,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Backend liveness probe
    Ping,
}

#[derive(Subcommand)]
pub enum InterviewCommand {
    /// Start a new AI interview and enter the conduct loop
    Start {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        position: String,
    },
    /// Resume an interview in progress
    Conduct { id: Uuid },
    /// Show the analysis for a finished interview
    Results { id: Uuid },
    /// List interviews for the organization
    List,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Create a project from a natural-language brief
    Create {
        #[arg(long)]
        brief: String,
        #[arg(long)]
        client: Option<String>,
    },
    /// List projects for the organization
    List,
    /// Show the task board for a project
    Tasks { id: Uuid },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Move a task to a new status
    Update {
        id: Uuid,
        #[arg(long, value_enum)]
        status: TaskStatus,
        /// Re-render this project's board after the update
        #[arg(long)]
        project: Option<Uuid>,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommand {
    /// Add an expense; the AI picks the category
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        vendor: Option<String>,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List expenses with the category summary
    List,
}

pub async fn run(cli: Cli, config: Config) -> Result<(), ClientError> {
    match cli.command {
        Command::Ping => ping(&config).await,
        Command::Login { signup } => login(&config, signup).await,
        command => {
            let context = establish(&config, false).await?;
            dispatch(command, &context).await
        }
    }
}

async fn dispatch(command: Command, context: &AppContext) -> Result<(), ClientError> {
    match command {
        Command::Dashboard => dashboard::run(context).await,
        Command::Chat {
            capabilities,
            oneshot,
        } => {
            if capabilities {
                chat::page::show_capabilities(context).await
            } else if let Some(message) = oneshot {
                chat::page::run_oneshot(context, &message).await
            } else {
                chat::page::run(context).await
            }
        }
        Command::Interview { command } => match command {
            InterviewCommand::Start {
                name,
                email,
                position,
            } => {
                interview::page::run_start(
                    context,
                    StartForm {
                        candidate_name: name,
                        candidate_email: email,
                        position,
                    },
                )
                .await
            }
            InterviewCommand::Conduct { id } => interview::page::run_conduct(context, id).await,
            InterviewCommand::Results { id } => interview::page::run_results(context, id).await,
            InterviewCommand::List => interview::page::run_list(context).await,
        },
        Command::Project { command } => match command {
            ProjectCommand::Create { brief, client } => {
                projects::page::run_create(context, &brief, client.as_deref()).await
            }
            ProjectCommand::List => projects::page::run_list(context).await,
            ProjectCommand::Tasks { id } => projects::page::run_tasks(context, id).await,
        },
        Command::Task { command } => match command {
            TaskCommand::Update {
                id,
                status,
                project,
            } => projects::page::run_task_update(context, id, status, project).await,
        },
        Command::Expense { command } => match command {
            ExpenseCommand::Add {
                description,
                amount,
                vendor,
                date,
            } => finance::page::run_add(context, description, amount, vendor, date).await,
            ExpenseCommand::List => finance::page::run_list(context).await,
        },
        Command::Import {
            file,
            analyze_only,
            yes,
        } => migration::page::run(context, &file, analyze_only, yes).await,
        // Handled before dispatch.
        Command::Login { .. } | Command::Ping => Ok(()),
    }
}

async fn ping(config: &Config) -> Result<(), ClientError> {
    let api = ApiClient::new(&config.api_url, config.timeout(), CancellationToken::new());
    let health = api.get_raw("/health").await?;
    ui::success_line(&format!("backend is up: {health}"));
    Ok(())
}

async fn login(config: &Config, signup: bool) -> Result<(), ClientError> {
    let credentials = gather_credentials(config)?;
    let context = AppContext::establish(config, &credentials, signup).await?;
    ui::success_line(&format!(
        "signed in as {} (organization {})",
        context.session.email, context.organization_id
    ));
    Ok(())
}

async fn establish(config: &Config, signup: bool) -> Result<AppContext, ClientError> {
    let credentials = gather_credentials(config)?;
    AppContext::establish(config, &credentials, signup).await
}

/// Environment credentials when present, otherwise an interactive prompt.
fn gather_credentials(config: &Config) -> Result<Credentials, ClientError> {
    if let Ok(credentials) = state::credentials_from(config) {
        return Ok(credentials);
    }

    ui::meta_line("set LIGHTNING_EMAIL / LIGHTNING_PASSWORD to skip this prompt");
    let mut editor = ui::editor()?;
    let email = ui::read_line(&mut editor, "email: ").ok_or(ClientError::MissingSession)?;
    let password = ui::read_line(&mut editor, "password: ").ok_or(ClientError::MissingSession)?;
    if email.trim().is_empty() || password.is_empty() {
        return Err(ClientError::MissingSession);
    }
    Ok(Credentials {
        email: email.trim().to_string(),
        password,
    })
}
