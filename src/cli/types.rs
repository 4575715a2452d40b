//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{
    backlog::BacklogArgs, comment::CommentArgs, issue::IssueArgs, sprint::SprintArgs,
};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "sprintboard")]
#[command(about = "Sprintboard - backlog and sprint board client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Project to open (overrides `project_id` from configuration)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Read configuration from this file instead of `.sprintboard/`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the backlog and its sprints
    Backlog(BacklogArgs),

    /// Issue management commands
    Issue(IssueArgs),

    /// Sprint management commands
    Sprint(SprintArgs),

    /// Comments on an issue
    Comment(CommentArgs),
}
