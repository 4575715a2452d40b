//! Domain models for the backlog client.

pub mod comment;
pub mod config;
pub mod issue;
pub mod project;
pub mod sprint;

pub use comment::{sort_comments, Comment, CommentSortOrder};
pub use config::{ApiConfig, Config, LoggingConfig, SessionConfig};
pub use issue::{issue_key, total_points, Issue, IssuePatch, IssuePriority, IssueStatus, IssueType, NewIssue, Person};
pub use project::{initials, Board, CurrentUser, Project, TeamMember};
pub use sprint::{Sprint, SprintDraft, SprintStatus};
