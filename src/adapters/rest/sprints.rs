//! Sprint gateway over the `/sprints` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Sprint, SprintDraft};
use crate::domain::ports::SprintGateway;

use super::client::RestClient;
use super::mapping::{sprint_draft_to_dto, sprint_from_dto};
use super::models::SprintDto;

/// [`SprintGateway`] backed by the tracker REST API.
#[derive(Debug, Clone)]
pub struct HttpSprintGateway {
    client: Arc<RestClient>,
}

impl HttpSprintGateway {
    /// Gateway over a shared client.
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    async fn send_sprint(&self, operation: &str, method: Method, path: &str) -> DomainResult<Sprint> {
        let req = self.client.request(method, path);
        let dto: SprintDto = self.client.send_json(operation, req).await?;
        Ok(sprint_from_dto(dto))
    }
}

#[async_trait]
impl SprintGateway for HttpSprintGateway {
    async fn list(&self, board_id: &str) -> DomainResult<Vec<Sprint>> {
        let req = self
            .client
            .request(Method::GET, &format!("/sprints/board/{board_id}"));
        let dtos: Vec<SprintDto> = self.client.send_json("list_sprints", req).await?;
        tracing::info!(board_id, count = dtos.len(), "fetched sprints");
        Ok(dtos.into_iter().map(sprint_from_dto).collect())
    }

    async fn create(&self, board_id: &str, draft: &SprintDraft) -> DomainResult<Sprint> {
        tracing::info!(board_id, name = %draft.name, "creating sprint");
        let req = self
            .client
            .request(Method::POST, &format!("/sprints/board/{board_id}"))
            .json(&sprint_draft_to_dto(draft));
        let dto: SprintDto = self.client.send_json("create_sprint", req).await?;
        Ok(sprint_from_dto(dto))
    }

    async fn update(&self, sprint_id: &str, draft: &SprintDraft) -> DomainResult<Sprint> {
        tracing::info!(sprint_id, name = %draft.name, "updating sprint");
        let req = self
            .client
            .request(Method::PUT, &format!("/sprints/{sprint_id}"))
            .json(&sprint_draft_to_dto(draft));
        let dto: SprintDto = self.client.send_json("update_sprint", req).await?;
        Ok(sprint_from_dto(dto))
    }

    async fn start(&self, sprint_id: &str) -> DomainResult<Sprint> {
        tracing::info!(sprint_id, "starting sprint");
        self.send_sprint("start_sprint", Method::PUT, &format!("/sprints/{sprint_id}/start"))
            .await
    }

    async fn complete(&self, sprint_id: &str) -> DomainResult<Sprint> {
        tracing::info!(sprint_id, "completing sprint");
        self.send_sprint(
            "complete_sprint",
            Method::PUT,
            &format!("/sprints/{sprint_id}/complete"),
        )
        .await
    }

    async fn delete(&self, sprint_id: &str) -> DomainResult<()> {
        tracing::info!(sprint_id, "deleting sprint");
        let req = self
            .client
            .request(Method::DELETE, &format!("/sprints/{sprint_id}"));
        self.client.send_empty("delete_sprint", req).await
    }
}
