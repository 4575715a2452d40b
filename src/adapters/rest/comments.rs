//! Comment gateway over the `/comments` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Comment;
use crate::domain::ports::CommentGateway;

use super::client::RestClient;
use super::mapping::comment_from_dto;
use super::models::{CommentDto, CommentWriteDto};

/// [`CommentGateway`] backed by the tracker REST API.
#[derive(Debug, Clone)]
pub struct HttpCommentGateway {
    client: Arc<RestClient>,
}

impl HttpCommentGateway {
    /// Gateway over a shared client.
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

fn decode(dto: CommentDto, issue_id: &str) -> DomainResult<Comment> {
    let id = dto.id.clone();
    comment_from_dto(dto, issue_id)
        .ok_or_else(|| DomainError::Serialization(format!("comment {id} has an unreadable createdAt")))
}

#[async_trait]
impl CommentGateway for HttpCommentGateway {
    async fn list(&self, issue_id: &str) -> DomainResult<Vec<Comment>> {
        let req = self
            .client
            .request(Method::GET, &format!("/comments/task/{issue_id}"));
        let dtos: Vec<CommentDto> = self.client.send_json("list_comments", req).await?;
        let total = dtos.len();
        let comments: Vec<Comment> = dtos
            .into_iter()
            .filter_map(|dto| match decode(dto, issue_id) {
                Ok(comment) => Some(comment),
                Err(err) => {
                    tracing::warn!(issue_id, error = %err, "skipping unreadable comment");
                    None
                }
            })
            .collect();
        tracing::debug!(issue_id, total, kept = comments.len(), "comments loaded");
        Ok(comments)
    }

    async fn create(&self, issue_id: &str, content: &str) -> DomainResult<Comment> {
        tracing::info!(issue_id, len = content.len(), "adding comment");
        let body = CommentWriteDto {
            content: content.to_string(),
            task_id: Some(issue_id.to_string()),
        };
        let req = self.client.request(Method::POST, "/comments").json(&body);
        let dto: CommentDto = self.client.send_json("create_comment", req).await?;
        decode(dto, issue_id)
    }

    async fn update(&self, comment_id: &str, content: &str) -> DomainResult<Comment> {
        tracing::info!(comment_id, len = content.len(), "updating comment");
        let body = CommentWriteDto {
            content: content.to_string(),
            task_id: None,
        };
        let req = self
            .client
            .request(Method::PUT, &format!("/comments/{comment_id}"))
            .json(&body);
        let dto: CommentDto = self.client.send_json("update_comment", req).await?;
        let issue_id = dto.task_id.clone().unwrap_or_default();
        decode(dto, &issue_id)
    }

    async fn delete(&self, comment_id: &str) -> DomainResult<()> {
        tracing::info!(comment_id, "deleting comment");
        let req = self
            .client
            .request(Method::DELETE, &format!("/comments/{comment_id}"));
        self.client.send_empty("delete_comment", req).await
    }
}
