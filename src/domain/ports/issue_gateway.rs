//! Issue access port.
//!
//! The backlog controller talks to the issue backend exclusively through
//! this trait. Every method performs exactly one remote call and returns the
//! server's canonical issue.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Issue, IssuePatch, IssueStatus, NewIssue};

/// Issue CRUD, assignment, sprint moves and status updates.
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// All issues of a project, sprinted or not.
    async fn list_by_project(&self, project_id: &str) -> DomainResult<Vec<Issue>>;

    /// A single issue by id.
    async fn get(&self, issue_id: &str) -> DomainResult<Issue>;

    /// Create an issue in a project. The reporter is the current user.
    async fn create(&self, project_id: &str, issue: &NewIssue) -> DomainResult<Issue>;

    /// Send only the fields present in `patch`.
    async fn update(&self, issue_id: &str, patch: &IssuePatch) -> DomainResult<Issue>;

    /// Remove an issue.
    async fn delete(&self, issue_id: &str) -> DomainResult<()>;

    /// Assign to `user_id`. An empty id unassigns.
    async fn assign(&self, issue_id: &str, user_id: &str) -> DomainResult<Issue>;

    /// Move into a sprint, or back to the backlog when `sprint_id` is `None`.
    async fn move_to_sprint(&self, issue_id: &str, sprint_id: Option<&str>) -> DomainResult<Issue>;

    /// Change the workflow status only.
    async fn update_status(&self, issue_id: &str, status: IssueStatus) -> DomainResult<Issue>;
}
