//! Project and board lookup over the `/projects` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Board, Project, TeamMember};
use crate::domain::ports::ProjectGateway;

use super::client::RestClient;

/// [`ProjectGateway`] backed by the tracker REST API.
#[derive(Debug, Clone)]
pub struct HttpProjectGateway {
    client: Arc<RestClient>,
}

impl HttpProjectGateway {
    /// Gateway over a shared client.
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProjectGateway for HttpProjectGateway {
    async fn get(&self, project_id: &str) -> DomainResult<Project> {
        let req = self
            .client
            .request(Method::GET, &format!("/projects/{project_id}"));
        let project: Project = self.client.send_json("get_project", req).await?;
        tracing::debug!(project_id, boards = project.boards.len(), "fetched project");
        Ok(project)
    }

    async fn create_default_board(&self, project_id: &str) -> DomainResult<Board> {
        tracing::warn!(project_id, "no boards found for project, creating default board");
        let req = self
            .client
            .request(
                Method::POST,
                &format!("/projects/{project_id}/create-default-board"),
            )
            .json(&serde_json::json!({}));
        self.client.send_json("create_default_board", req).await
    }

    async fn members(&self, project_id: &str) -> DomainResult<Vec<TeamMember>> {
        let req = self
            .client
            .request(Method::GET, &format!("/projects/{project_id}/members"));
        self.client.send_json("project_members", req).await
    }
}
