//! Issue gateway over the `/tasks` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Issue, IssuePatch, IssueStatus, NewIssue};
use crate::domain::ports::{IssueGateway, UserDirectory};

use super::client::RestClient;
use super::mapping::{new_issue_to_task, patch_to_task, task_to_issue, STATUS_SCHEMA};
use super::models::{AssignRequest, MoveToSprintRequest, TaskDto, TaskWriteDto};

const LOAD_ISSUES_FAILED: &str = "Failed to load issues. Please try again.";
const LOAD_ISSUE_FAILED: &str = "Failed to load issue details.";

/// [`IssueGateway`] backed by the tracker REST API.
#[derive(Clone)]
pub struct HttpIssueGateway {
    client: Arc<RestClient>,
    /// Supplies the reporter id for new issues.
    users: Arc<dyn UserDirectory>,
}

impl HttpIssueGateway {
    /// Gateway over a shared client and the session's user directory.
    pub fn new(client: Arc<RestClient>, users: Arc<dyn UserDirectory>) -> Self {
        Self { client, users }
    }

    async fn put_task<B: serde::Serialize + Sync>(
        &self,
        operation: &str,
        path: &str,
        body: &B,
    ) -> DomainResult<Issue> {
        let req = self.client.request(Method::PUT, path).json(body);
        let task: TaskDto = self.client.send_json(operation, req).await?;
        Ok(task_to_issue(task))
    }
}

#[async_trait]
impl IssueGateway for HttpIssueGateway {
    async fn list_by_project(&self, project_id: &str) -> DomainResult<Vec<Issue>> {
        let req = self
            .client
            .request(Method::GET, &format!("/tasks/project/{project_id}"));
        let tasks: Vec<TaskDto> = self
            .client
            .send_json("list_issues", req)
            .await
            .map_err(|_| DomainError::LoadFailed(LOAD_ISSUES_FAILED.to_string()))?;

        let issues: Vec<Issue> = tasks.into_iter().map(task_to_issue).collect();
        tracing::info!(project_id, count = issues.len(), "fetched project issues");
        Ok(issues)
    }

    async fn get(&self, issue_id: &str) -> DomainResult<Issue> {
        let req = self.client.request(Method::GET, &format!("/tasks/{issue_id}"));
        let task: TaskDto = self
            .client
            .send_json("get_issue", req)
            .await
            .map_err(|_| DomainError::LoadFailed(LOAD_ISSUE_FAILED.to_string()))?;
        Ok(task_to_issue(task))
    }

    async fn create(&self, project_id: &str, issue: &NewIssue) -> DomainResult<Issue> {
        let reporter = self.users.current_user_id();
        let body = new_issue_to_task(issue, reporter.as_deref());
        tracing::info!(project_id, title = %issue.title, "creating issue");
        tracing::debug!(?body, "create payload");

        let req = self
            .client
            .request(Method::POST, &format!("/tasks/project/{project_id}"))
            .json(&body);
        let task: TaskDto = self.client.send_json("create_issue", req).await?;
        Ok(task_to_issue(task))
    }

    async fn update(&self, issue_id: &str, patch: &IssuePatch) -> DomainResult<Issue> {
        let body: TaskWriteDto = patch_to_task(patch);
        tracing::info!(issue_id, "updating issue");
        tracing::debug!(?body, "update payload");
        self.put_task("update_issue", &format!("/tasks/{issue_id}"), &body)
            .await
    }

    async fn delete(&self, issue_id: &str) -> DomainResult<()> {
        tracing::info!(issue_id, "deleting issue");
        let req = self
            .client
            .request(Method::DELETE, &format!("/tasks/{issue_id}"));
        self.client.send_empty("delete_issue", req).await
    }

    async fn assign(&self, issue_id: &str, user_id: &str) -> DomainResult<Issue> {
        tracing::info!(issue_id, user_id, "assigning issue");
        let body = AssignRequest {
            user_id: user_id.to_string(),
        };
        self.put_task("assign_issue", &format!("/tasks/{issue_id}/assign"), &body)
            .await
    }

    async fn move_to_sprint(&self, issue_id: &str, sprint_id: Option<&str>) -> DomainResult<Issue> {
        tracing::info!(issue_id, sprint_id = sprint_id.unwrap_or("backlog"), "moving issue");
        let body = MoveToSprintRequest {
            sprint_id: sprint_id.map(str::to_string),
        };
        self.put_task("move_issue", &format!("/tasks/{issue_id}/sprint"), &body)
            .await
    }

    async fn update_status(&self, issue_id: &str, status: IssueStatus) -> DomainResult<Issue> {
        let code = STATUS_SCHEMA.to_backend(status);
        tracing::info!(issue_id, status = %status, api_status = code, "updating issue status");
        let body = serde_json::json!({ "status": code });
        self.put_task("update_issue_status", &format!("/tasks/{issue_id}"), &body)
            .await
    }
}
