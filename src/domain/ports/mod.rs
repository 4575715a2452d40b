//! Port trait definitions (Hexagonal Architecture)
//!
//! The backlog controller depends only on these traits:
//! - IssueGateway: issue CRUD, assignment, sprint moves, status updates
//! - SprintGateway: sprint CRUD and lifecycle
//! - CommentGateway: comment CRUD
//! - ProjectGateway: project, board and team lookup
//! - CredentialProvider / UserDirectory: session token and identity
//! - Notifier: transient user feedback

pub mod comment_gateway;
pub mod identity;
pub mod issue_gateway;
pub mod notifier;
pub mod project_gateway;
pub mod sprint_gateway;

pub use comment_gateway::CommentGateway;
pub use identity::{CredentialProvider, UserDirectory};
pub use issue_gateway::IssueGateway;
pub use notifier::Notifier;
pub use project_gateway::ProjectGateway;
pub use sprint_gateway::SprintGateway;
