//! Backlog CLI commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Issue, Sprint};
use crate::services::backlog::{
    BacklogViewState, IssueFilters, SortKey, SortOrder, TypeToggles, ViewMode,
};

use super::{parse_filter, parse_priority, parse_status, parse_type};

/// Arguments of `sprintboard backlog`.
#[derive(Args, Debug)]
pub struct BacklogArgs {
    /// Backlog subcommand to run.
    #[command(subcommand)]
    pub command: BacklogCommands,
}

/// Backlog subcommands.
#[derive(Subcommand, Debug)]
pub enum BacklogCommands {
    /// Show sprints and backlog issues
    Show {
        /// Search title or key
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by priority (Highest..Lowest, or All)
        #[arg(long)]
        priority: Option<String>,
        /// Filter by type (Epic, Story, Task, Bug, Sub-task, or All)
        #[arg(long = "type")]
        issue_type: Option<String>,
        /// Filter by status (To Do, In Progress, Review, Done, or All)
        #[arg(long)]
        status: Option<String>,
        /// Only issues of this sprint
        #[arg(long)]
        sprint: Option<String>,
        /// Only issues of this epic
        #[arg(long)]
        epic: Option<String>,
        /// Only epics
        #[arg(long)]
        epics_only: bool,
        /// Only stories
        #[arg(long)]
        stories_only: bool,
        /// Only tasks
        #[arg(long)]
        tasks_only: bool,
        /// Only bugs
        #[arg(long)]
        bugs_only: bool,
        /// Sort key (priority, created, updated, key)
        #[arg(long, default_value = "priority")]
        sort: String,
        /// Sort order (asc, desc)
        #[arg(long, default_value = "desc")]
        order: String,
        /// Show each list as a board with one column per status
        #[arg(long)]
        board: bool,
    },
}

/// A sprint with its completion share.
#[derive(Debug, Serialize)]
pub struct SprintView {
    /// The sprint, with its visible issues.
    #[serde(flatten)]
    pub sprint: Sprint,
    /// Completed points as a rounded percentage.
    pub completion_percentage: u32,
}

/// The backlog view as printed by `backlog show`.
#[derive(Debug, Serialize)]
pub struct BacklogOutput {
    /// Project id.
    pub project_id: String,
    /// Project name.
    pub project_name: String,
    /// Board the sprints belong to.
    pub board_id: Option<String>,
    /// List or board layout.
    pub view_mode: ViewMode,
    /// Whether any filter narrowed the lists.
    pub filtered: bool,
    /// Sprints in board order.
    pub sprints: Vec<SprintView>,
    /// Visible unsprinted issues.
    pub backlog: Vec<Issue>,
    /// Points of all unsprinted issues.
    pub backlog_total_points: u32,
    /// Done points of all unsprinted issues.
    pub backlog_completed_points: u32,
}

impl BacklogOutput {
    /// Snapshot of the state with filters and sorting applied to every list.
    pub fn from_state(state: &BacklogViewState) -> Self {
        let sprints = state
            .sprints
            .iter()
            .map(|sprint| {
                let mut sprint = sprint.clone();
                sprint.issues = state.visible_issues(&sprint.issues);
                SprintView {
                    completion_percentage: sprint.completion_percentage(),
                    sprint,
                }
            })
            .collect();

        Self {
            project_id: state.project_id.clone(),
            project_name: state.project_name.clone(),
            board_id: state.board_id.clone(),
            view_mode: state.view_mode,
            filtered: !state.filters.is_default(),
            sprints,
            backlog: state.visible_issues(&state.backlog_issues),
            backlog_total_points: state.backlog_total_points(),
            backlog_completed_points: state.backlog_completed_points(),
        }
    }
}

impl BacklogOutput {
    fn format_list(&self, formatter: &TableFormatter, issues: &[Issue]) -> String {
        match self.view_mode {
            ViewMode::List => formatter.format_issues(issues),
            ViewMode::Board => formatter.format_board(issues),
        }
    }
}

impl CommandOutput for BacklogOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let mut lines = vec![console::style(&self.project_name).bold().to_string()];
        if self.filtered {
            lines.push(console::style("Filters applied").dim().to_string());
        }

        for view in &self.sprints {
            let sprint = &view.sprint;
            lines.push(String::new());
            lines.push(format!(
                "{} [{}] {}% complete ({}/{} points)",
                console::style(&sprint.name).cyan().bold(),
                sprint.status,
                view.completion_percentage,
                sprint.completed_story_points,
                sprint.total_story_points,
            ));
            if !sprint.goal.is_empty() {
                lines.push(format!("Goal: {}", sprint.goal));
            }
            if sprint.issues.is_empty() {
                lines.push("No issues in this sprint.".to_string());
            } else {
                lines.push(self.format_list(&formatter, &sprint.issues));
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "{} ({} issues, {}/{} points done)",
            console::style("Backlog").bold(),
            self.backlog.len(),
            self.backlog_completed_points,
            self.backlog_total_points,
        ));
        if self.backlog.is_empty() {
            lines.push("Your backlog is empty.".to_string());
        } else {
            lines.push(self.format_list(&formatter, &self.backlog));
        }

        lines.join("\n")
    }
}

/// Run a backlog subcommand.
pub async fn execute(args: BacklogArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        BacklogCommands::Show {
            search,
            priority,
            issue_type,
            status,
            sprint,
            epic,
            epics_only,
            stories_only,
            tasks_only,
            bugs_only,
            sort,
            order,
            board,
        } => {
            let filters = IssueFilters {
                search: search.unwrap_or_default(),
                priority: parse_filter(priority.as_deref(), parse_priority)?,
                issue_type: parse_filter(issue_type.as_deref(), parse_type)?,
                status: parse_filter(status.as_deref(), parse_status)?,
                sprint_id: sprint,
                epic_id: epic,
                toggles: TypeToggles {
                    epics_only,
                    stories_only,
                    tasks_only,
                    bugs_only,
                },
            };
            let sort_key = SortKey::from_str(&sort)
                .ok_or_else(|| anyhow!("Invalid sort key: {sort}. Must be one of: priority, created, updated, key"))?;
            let sort_order = SortOrder::from_str(&order)
                .ok_or_else(|| anyhow!("Invalid sort order: {order}. Must be one of: asc, desc"))?;

            let mut controller = ctx.open_backlog().await?;
            let state = controller.state_mut();
            state.filters = filters;
            state.set_sort(sort_key, sort_order);
            if board {
                state.set_view_mode(ViewMode::Board);
            }

            output(&BacklogOutput::from_state(controller.state()), ctx.json);
            Ok(())
        }
    }
}
