//! Project and board access port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Board, Project, TeamMember};

/// Project and board lookup.
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// Project detail including its boards.
    async fn get(&self, project_id: &str) -> DomainResult<Project>;

    /// Create a board for a project that has none.
    async fn create_default_board(&self, project_id: &str) -> DomainResult<Board>;

    /// Team members of a project.
    async fn members(&self, project_id: &str) -> DomainResult<Vec<TeamMember>>;
}
