//! Comment access port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Comment;

/// Comment CRUD for an issue.
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// Comments of an issue, in server order.
    async fn list(&self, issue_id: &str) -> DomainResult<Vec<Comment>>;

    /// Add a comment to an issue.
    async fn create(&self, issue_id: &str, content: &str) -> DomainResult<Comment>;

    /// Replace a comment's content.
    async fn update(&self, comment_id: &str, content: &str) -> DomainResult<Comment>;

    /// Remove a comment.
    async fn delete(&self, comment_id: &str) -> DomainResult<()>;
}
