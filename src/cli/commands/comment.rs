//! Comment CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Comment, CommentSortOrder};
use crate::services::BacklogController;

use super::finish;

/// Arguments of `sprintboard comment`.
#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Comment subcommand to run.
    #[command(subcommand)]
    pub command: CommentCommands,
}

/// Comment subcommands.
#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// List comments on an issue, newest first
    List {
        /// Issue ID
        issue: String,
        /// Show oldest first
        #[arg(long)]
        oldest: bool,
    },
    /// Add a comment to an issue
    Add {
        /// Issue ID
        issue: String,
        /// Comment text
        content: String,
    },
    /// Replace the text of a comment
    Edit {
        /// Issue ID
        issue: String,
        /// Comment ID
        id: String,
        /// New comment text
        content: String,
    },
    /// Delete a comment
    Delete {
        /// Issue ID
        issue: String,
        /// Comment ID
        id: String,
    },
}

/// Comments of one issue.
#[derive(Debug, Serialize)]
pub struct CommentListOutput {
    /// The issue commented on.
    pub issue_id: String,
    /// Order of `comments`.
    pub order: CommentSortOrder,
    /// The comments.
    pub comments: Vec<Comment>,
}

impl CommandOutput for CommentListOutput {
    fn to_human(&self) -> String {
        if self.comments.is_empty() {
            return "No comments yet.".to_string();
        }
        TableFormatter::new().format_comments(&self.comments)
    }
}

/// Result of a mutating comment command.
#[derive(Debug, Serialize)]
pub struct CommentActionOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// Message for the user.
    pub message: String,
    /// The comment after the change, when it still exists.
    pub comment: Option<Comment>,
}

impl CommandOutput for CommentActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

fn find(controller: &BacklogController, id: &str) -> Option<Comment> {
    controller.state().comments.items.iter().find(|c| c.id == id).cloned()
}

/// Run a comment subcommand.
pub async fn execute(args: CommentArgs, ctx: &AppContext) -> Result<()> {
    let mut controller = ctx.open_backlog().await?;

    match args.command {
        CommentCommands::List { issue, oldest } => {
            finish(controller.open_issue_detail(&issue).await)?;
            if oldest {
                controller.toggle_comment_sort_order();
            }
            let comments = &controller.state().comments;
            let out = CommentListOutput {
                issue_id: issue,
                order: comments.sort_order,
                comments: comments.items.clone(),
            };
            output(&out, ctx.json);
        }

        CommentCommands::Add { issue, content } => {
            finish(controller.open_issue_detail(&issue).await)?;
            controller.state_mut().comments.new_content = content;
            finish(controller.add_comment().await)?;
            let out = CommentActionOutput {
                success: true,
                message: "Comment added".to_string(),
                comment: controller.state().comments.items.first().cloned(),
            };
            output(&out, ctx.json);
        }

        CommentCommands::Edit { issue, id, content } => {
            finish(controller.open_issue_detail(&issue).await)?;
            finish(controller.start_editing_comment(&id))?;
            controller.state_mut().comments.editing_content = content;
            finish(controller.save_comment(&id).await)?;
            let out = CommentActionOutput {
                success: true,
                message: "Comment updated".to_string(),
                comment: find(&controller, &id),
            };
            output(&out, ctx.json);
        }

        CommentCommands::Delete { issue, id } => {
            finish(controller.open_issue_detail(&issue).await)?;
            let comment = find(&controller, &id);
            finish(controller.delete_comment(&id).await)?;
            let out = CommentActionOutput {
                success: true,
                message: "Comment deleted".to_string(),
                comment,
            };
            output(&out, ctx.json);
        }
    }

    Ok(())
}
