//! Sprint management port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Sprint, SprintDraft};

/// Sprint CRUD and lifecycle on a board.
///
/// Returned sprints carry no issues; the controller fills them from the
/// project's issue list.
#[async_trait]
pub trait SprintGateway: Send + Sync {
    /// Sprints of a board.
    async fn list(&self, board_id: &str) -> DomainResult<Vec<Sprint>>;

    /// Create a sprint on a board.
    async fn create(&self, board_id: &str, draft: &SprintDraft) -> DomainResult<Sprint>;

    /// Replace a sprint's name, goal and dates.
    async fn update(&self, sprint_id: &str, draft: &SprintDraft) -> DomainResult<Sprint>;

    /// Mark a sprint active.
    async fn start(&self, sprint_id: &str) -> DomainResult<Sprint>;

    /// Mark a sprint completed.
    async fn complete(&self, sprint_id: &str) -> DomainResult<Sprint>;

    /// Remove a sprint.
    async fn delete(&self, sprint_id: &str) -> DomainResult<()>;
}
