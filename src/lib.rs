//! Sprintboard - backlog and sprint board client
//!
//! Drives the backlog of a Jira-style tracker over its REST API: sprints and
//! unsprinted issues, filters and sorting, drag-and-drop moves with
//! optimistic updates, the issue detail view, assignment, sprint lifecycle
//! and comments.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): UI-facing models, gateway ports and errors
//! - **Adapters** (`adapters`): REST/JSON implementations of the ports
//! - **Service Layer** (`services`): the backlog view-controller
//! - **Infrastructure Layer** (`infrastructure`): config, credentials, logging, notifications
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use sprintboard::cli::AppContext;
//! use sprintboard::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let ctx = AppContext::from_config(&config, false, None);
//!     let controller = ctx.open_backlog().await?;
//!     println!("{} sprints", controller.state().sprints.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Comment, Config, Issue, IssuePatch, IssuePriority, IssueStatus, IssueType, LoggingConfig,
    NewIssue, Sprint, SprintDraft, SprintStatus,
};
pub use domain::ports::{
    CommentGateway, CredentialProvider, IssueGateway, Notifier, ProjectGateway, SprintGateway,
    UserDirectory,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ActionOutcome, BacklogController, BacklogDeps, BacklogViewState};
