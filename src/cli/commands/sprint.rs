//! Sprint CLI commands.

use std::collections::HashSet;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::Sprint;
use crate::services::BacklogController;

use super::finish;

/// Arguments of `sprintboard sprint`.
#[derive(Args, Debug)]
pub struct SprintArgs {
    /// Sprint subcommand to run.
    #[command(subcommand)]
    pub command: SprintCommands,
}

/// Sprint subcommands.
#[derive(Subcommand, Debug)]
pub enum SprintCommands {
    /// List sprints of the project's board
    List,
    /// Create a sprint
    Create {
        /// Sprint name
        name: String,
        /// Sprint goal
        #[arg(short, long)]
        goal: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
    /// Update a sprint's name, goal or dates
    Update {
        /// Sprint ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New goal
        #[arg(short, long)]
        goal: Option<String>,
        /// New start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// New end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Start a sprint
    Start {
        /// Sprint ID
        id: String,
    },
    /// Complete a sprint
    Complete {
        /// Sprint ID
        id: String,
    },
    /// Delete a sprint; its issues return to the backlog
    Delete {
        /// Sprint ID
        id: String,
    },
}

/// Sprints of the board.
#[derive(Debug, Serialize)]
pub struct SprintListOutput {
    /// The sprints, with their issues.
    pub sprints: Vec<Sprint>,
    /// Number of sprints.
    pub total: usize,
}

impl CommandOutput for SprintListOutput {
    fn to_human(&self) -> String {
        if self.sprints.is_empty() {
            return "No sprints found.".to_string();
        }
        format!(
            "Found {} sprint(s):\n{}",
            self.total,
            TableFormatter::new().format_sprints(&self.sprints)
        )
    }
}

/// Result of a mutating sprint command.
#[derive(Debug, Serialize)]
pub struct SprintActionOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// Message for the user.
    pub message: String,
    /// The sprint after the change, when it still exists.
    pub sprint: Option<Sprint>,
}

impl CommandOutput for SprintActionOutput {
    fn to_human(&self) -> String {
        match &self.sprint {
            Some(sprint) => format!("{}: {} [{}]", self.message, sprint.name, sprint.status),
            None => self.message.clone(),
        }
    }
}

fn action(message: &str, sprint: Option<Sprint>) -> SprintActionOutput {
    SprintActionOutput {
        success: true,
        message: message.to_string(),
        sprint,
    }
}

fn find(controller: &BacklogController, id: &str) -> Option<Sprint> {
    controller.state().sprints.iter().find(|s| s.id == id).cloned()
}

/// Run a sprint subcommand.
pub async fn execute(args: SprintArgs, ctx: &AppContext) -> Result<()> {
    let mut controller = ctx.open_backlog().await?;

    match args.command {
        SprintCommands::List => {
            let sprints = controller.state().sprints.clone();
            let out = SprintListOutput {
                total: sprints.len(),
                sprints,
            };
            output(&out, ctx.json);
        }

        SprintCommands::Create { name, goal, start, end } => {
            let before: HashSet<String> =
                controller.state().sprints.iter().map(|s| s.id.clone()).collect();
            let form = &mut controller.state_mut().new_sprint;
            form.name = name;
            form.goal = goal.unwrap_or_default();
            form.start_date = Some(start);
            form.end_date = Some(end);

            finish(controller.create_sprint().await)?;

            let created = controller
                .state()
                .sprints
                .iter()
                .find(|s| !before.contains(&s.id))
                .cloned();
            output(&action("Sprint created", created), ctx.json);
        }

        SprintCommands::Update { id, name, goal, start, end } => {
            finish(controller.edit_sprint(&id))?;
            let form = &mut controller.state_mut().new_sprint;
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(goal) = goal {
                form.goal = goal;
            }
            if start.is_some() {
                form.start_date = start;
            }
            if end.is_some() {
                form.end_date = end;
            }

            finish(controller.update_sprint().await)?;
            output(&action("Sprint updated", find(&controller, &id)), ctx.json);
        }

        SprintCommands::Start { id } => {
            find(&controller, &id).ok_or_else(|| anyhow!("Sprint not found: {id}"))?;
            finish(controller.start_sprint(&id).await)?;
            output(&action("Sprint started", find(&controller, &id)), ctx.json);
        }

        SprintCommands::Complete { id } => {
            find(&controller, &id).ok_or_else(|| anyhow!("Sprint not found: {id}"))?;
            finish(controller.complete_sprint(&id).await)?;
            output(&action("Sprint completed", find(&controller, &id)), ctx.json);
        }

        SprintCommands::Delete { id } => {
            let sprint = find(&controller, &id).ok_or_else(|| anyhow!("Sprint not found: {id}"))?;
            finish(controller.delete_sprint(&id).await)?;
            output(&action("Sprint deleted", Some(sprint)), ctx.json);
        }
    }

    Ok(())
}
