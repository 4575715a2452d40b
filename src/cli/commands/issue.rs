//! Issue CLI commands.

use std::collections::HashSet;

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Comment, Issue};
use crate::services::backlog::{BacklogController, DropEvent, DropListId};

use super::{finish, parse_priority, parse_status, parse_type};

/// Arguments of `sprintboard issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Issue subcommand to run.
    #[command(subcommand)]
    pub command: IssueCommands,
}

/// Issue subcommands.
#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// Create a new issue
    Create {
        /// Issue title
        title: String,
        /// Issue description
        #[arg(short, long)]
        description: Option<String>,
        /// Priority (Highest, High, Medium, Low, Lowest)
        #[arg(long, default_value = "Medium")]
        priority: String,
        /// Type (Epic, Story, Task, Bug, Sub-task)
        #[arg(short = 't', long = "type", default_value = "Task")]
        issue_type: String,
        /// Initial status
        #[arg(short, long, default_value = "To Do")]
        status: String,
        /// Story points
        #[arg(long, default_value_t = 0)]
        points: u32,
        /// Sprint to add the issue to
        #[arg(long)]
        sprint: Option<String>,
    },
    /// Show issue details and comments
    Show {
        /// Issue ID
        id: String,
    },
    /// Update issue fields
    Update {
        /// Issue ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New priority (Highest, High, Medium, Low, Lowest)
        #[arg(long)]
        priority: Option<String>,
        /// New type (Epic, Story, Task, Bug, Sub-task)
        #[arg(short = 't', long = "type")]
        issue_type: Option<String>,
        /// New status (To Do, In Progress, Review, Done)
        #[arg(short, long)]
        status: Option<String>,
        /// New story points
        #[arg(long)]
        points: Option<u32>,
        /// Parent epic ID
        #[arg(long)]
        epic: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Labels, replacing the current set
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,
        /// Components, replacing the current set
        #[arg(long, value_delimiter = ',')]
        components: Option<Vec<String>>,
    },
    /// Change issue status
    Status {
        /// Issue ID
        id: String,
        /// New status (To Do, In Progress, Review, Done)
        status: String,
    },
    /// Assign an issue
    Assign {
        /// Issue ID
        id: String,
        /// Assign to this user ID
        #[arg(long, conflicts_with_all = ["me", "auto"])]
        user: Option<String>,
        /// Assign to the signed-in user
        #[arg(long, conflicts_with = "auto")]
        me: bool,
        /// Assign to a random teammate
        #[arg(long)]
        auto: bool,
    },
    /// Remove the assignee
    Unassign {
        /// Issue ID
        id: String,
    },
    /// Move an issue between the backlog and sprints, or within a list
    Move {
        /// Issue ID
        id: String,
        /// Target list: "backlog" or a sprint ID
        #[arg(long)]
        to: String,
        /// Position in the target list (defaults to the end)
        #[arg(long)]
        position: Option<usize>,
    },
    /// Delete an issue
    Delete {
        /// Issue ID
        id: String,
    },
}

/// An issue with its comments.
#[derive(Debug, Serialize)]
pub struct IssueDetailOutput {
    /// The issue.
    pub issue: Issue,
    /// Its comments, newest first.
    pub comments: Vec<Comment>,
}

impl CommandOutput for IssueDetailOutput {
    fn to_human(&self) -> String {
        let issue = &self.issue;
        let mut lines = vec![
            format!("{}: {}", console::style(&issue.key).bold(), issue.title),
            format!("ID: {}", issue.id),
            format!("Type: {}", issue.issue_type),
            format!("Status: {}", issue.status),
            format!("Priority: {}", issue.priority),
            format!("Story points: {}", issue.points()),
            format!(
                "Assignee: {}",
                issue.assignee.as_ref().map_or("Unassigned", |a| a.name.as_str())
            ),
            format!(
                "Sprint: {}",
                issue.sprint_id.as_deref().unwrap_or("Backlog")
            ),
        ];
        if let Some(reporter) = &issue.reporter {
            lines.push(format!("Reporter: {}", reporter.name));
        }
        if let Some(epic) = &issue.epic_id {
            lines.push(format!("Epic: {epic}"));
        }
        if let Some(due) = issue.due_date {
            lines.push(format!("Due: {}", due.format("%Y-%m-%d")));
        }
        if !issue.labels.is_empty() {
            lines.push(format!("Labels: {}", issue.labels.join(", ")));
        }
        if !issue.components.is_empty() {
            lines.push(format!("Components: {}", issue.components.join(", ")));
        }
        if !issue.description.is_empty() {
            lines.push(String::new());
            lines.push(issue.description.clone());
        }

        lines.push(String::new());
        if self.comments.is_empty() {
            lines.push("No comments yet.".to_string());
        } else {
            lines.push(format!("Comments ({}):", self.comments.len()));
            lines.push(TableFormatter::new().format_comments(&self.comments));
        }
        lines.join("\n")
    }
}

/// Result of a mutating issue command.
#[derive(Debug, Serialize)]
pub struct IssueActionOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// Message for the user.
    pub message: String,
    /// The issue after the change, when it still exists.
    pub issue: Option<Issue>,
}

impl CommandOutput for IssueActionOutput {
    fn to_human(&self) -> String {
        match &self.issue {
            Some(issue) => format!("{} ({} {})", self.message, issue.key, issue.title),
            None => self.message.clone(),
        }
    }
}

fn action(message: impl Into<String>, issue: Option<Issue>) -> IssueActionOutput {
    IssueActionOutput {
        success: true,
        message: message.into(),
        issue,
    }
}

fn due_at_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

/// List and index currently holding `issue_id`.
fn locate(controller: &BacklogController, issue_id: &str) -> Option<(DropListId, usize)> {
    let state = controller.state();
    if let Some(index) = state.backlog_issues.iter().position(|i| i.id == issue_id) {
        return Some((DropListId::Backlog, index));
    }
    state.sprints.iter().find_map(|sprint| {
        sprint
            .issues
            .iter()
            .position(|i| i.id == issue_id)
            .map(|index| (DropListId::sprint(&sprint.id), index))
    })
}

fn target_list(raw: &str) -> DropListId {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("backlog") {
        DropListId::Backlog
    } else {
        DropListId::parse(raw).unwrap_or_else(|| DropListId::sprint(raw))
    }
}

fn selected(controller: &BacklogController) -> Option<Issue> {
    controller.state().selected_issue.clone()
}

async fn open(controller: &mut BacklogController, id: &str) -> Result<()> {
    finish(controller.open_issue_detail(id).await)
}

/// Run an issue subcommand.
pub async fn execute(args: IssueArgs, ctx: &AppContext) -> Result<()> {
    let mut controller = ctx.open_backlog().await?;

    match args.command {
        IssueCommands::Create {
            title,
            description,
            priority,
            issue_type,
            status,
            points,
            sprint,
        } => {
            let before: HashSet<String> = all_issue_ids(&controller);
            let form = &mut controller.state_mut().new_issue;
            form.title = title;
            form.description = description.unwrap_or_default();
            form.priority = parse_priority(&priority)?;
            form.issue_type = parse_type(&issue_type)?;
            form.status = parse_status(&status)?;
            form.story_points = Some(points);
            form.sprint_id = sprint;

            finish(controller.create_issue().await)?;

            let created = controller
                .state()
                .backlog_issues
                .iter()
                .chain(controller.state().sprints.iter().flat_map(|s| s.issues.iter()))
                .find(|issue| !before.contains(&issue.id))
                .cloned();
            output(&action("Issue created", created), ctx.json);
        }

        IssueCommands::Show { id } => {
            open(&mut controller, &id).await?;
            let issue = selected(&controller).ok_or_else(|| anyhow!("Issue not found: {id}"))?;
            let out = IssueDetailOutput {
                issue,
                comments: controller.state().comments.items.clone(),
            };
            output(&out, ctx.json);
        }

        IssueCommands::Update {
            id,
            title,
            description,
            priority,
            issue_type,
            status,
            points,
            epic,
            due,
            labels,
            components,
        } => {
            let priority = priority.as_deref().map(parse_priority).transpose()?;
            let issue_type = issue_type.as_deref().map(parse_type).transpose()?;
            let status = status.as_deref().map(parse_status).transpose()?;

            open(&mut controller, &id).await?;
            let editing = controller
                .editing_issue_mut()
                .ok_or_else(|| anyhow!("Issue not found: {id}"))?;
            if let Some(title) = title {
                editing.title = title;
            }
            if let Some(description) = description {
                editing.description = description;
            }
            if let Some(priority) = priority {
                editing.priority = priority;
            }
            if let Some(issue_type) = issue_type {
                editing.issue_type = issue_type;
            }
            if let Some(status) = status {
                editing.status = status;
            }
            if points.is_some() {
                editing.story_points = points;
            }
            if let Some(epic) = epic {
                editing.epic_id = Some(epic).filter(|e| !e.is_empty());
            }
            if let Some(due) = due {
                editing.due_date = due_at_midnight(due);
            }
            if let Some(labels) = labels {
                editing.labels = labels;
            }
            if let Some(components) = components {
                editing.components = components;
            }

            let outcome = controller.save_issue_changes().await;
            let message = if outcome.is_applied() {
                "Issue updated"
            } else {
                "No changes to save"
            };
            finish(outcome)?;
            output(&action(message, selected(&controller)), ctx.json);
        }

        IssueCommands::Status { id, status } => {
            let status = parse_status(&status)?;
            finish(controller.quick_update_status(&id, status).await)?;
            let issue = controller.state().find_issue(&id).cloned();
            output(&action(format!("Status: {status}"), issue), ctx.json);
        }

        IssueCommands::Assign { id, user, me, auto } => {
            open(&mut controller, &id).await?;
            let outcome = match (user, me, auto) {
                (Some(user), _, _) => controller.assign_to_user(&id, &user).await,
                (None, true, _) => controller.assign_to_me().await,
                (None, false, true) => controller.assign_automatic().await,
                (None, false, false) => bail!("Specify one of --user, --me or --auto"),
            };
            finish(outcome)?;
            let issue = controller.state().find_issue(&id).cloned();
            output(&action("Issue assigned", issue), ctx.json);
        }

        IssueCommands::Unassign { id } => {
            open(&mut controller, &id).await?;
            finish(controller.unassign_issue().await)?;
            let issue = controller.state().find_issue(&id).cloned();
            output(&action("Issue unassigned", issue), ctx.json);
        }

        IssueCommands::Move { id, to, position } => {
            let (from_list, from_index) =
                locate(&controller, &id).ok_or_else(|| anyhow!("Issue not found: {id}"))?;
            let to_list = target_list(&to);
            let target_len = controller
                .state()
                .list(&to_list)
                .map(Vec::len)
                .ok_or_else(|| anyhow!("Unknown sprint: {to}"))?;

            let event = DropEvent {
                current_index: position.unwrap_or(if from_list == to_list {
                    target_len.saturating_sub(1)
                } else {
                    target_len
                }),
                previous_container: from_list,
                container: to_list,
                previous_index: from_index,
            };
            finish(controller.drop_issue(&event).await)?;

            let issue = controller.state().find_issue(&id).cloned();
            output(&action(format!("Issue moved to {}", event.container), issue), ctx.json);
        }

        IssueCommands::Delete { id } => {
            open(&mut controller, &id).await?;
            let issue = selected(&controller);
            finish(controller.delete_issue().await)?;
            output(&action("Issue deleted", issue), ctx.json);
        }
    }

    Ok(())
}

fn all_issue_ids(controller: &BacklogController) -> HashSet<String> {
    let state = controller.state();
    state
        .backlog_issues
        .iter()
        .chain(state.sprints.iter().flat_map(|s| s.issues.iter()))
        .map(|issue| issue.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_list_accepts_plain_and_prefixed_ids() {
        assert_eq!(target_list("backlog"), DropListId::Backlog);
        assert_eq!(target_list("Backlog"), DropListId::Backlog);
        assert_eq!(target_list("s1"), DropListId::sprint("s1"));
        assert_eq!(target_list("sprint-s1"), DropListId::sprint("s1"));
    }

    #[test]
    fn test_due_at_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let due = due_at_midnight(date).unwrap();
        assert_eq!(due.to_rfc3339(), "2024-03-09T00:00:00+00:00");
    }
}
