//! Tracker REST adapter.
//!
//! Implements the domain gateway ports over HTTP/JSON. `mapping` holds the
//! single schema table translating backend task fields and enum codes to the
//! UI issue model.

pub mod client;
pub mod comments;
pub mod issues;
pub mod mapping;
pub mod models;
pub mod projects;
pub mod sprints;

pub use client::RestClient;
pub use comments::HttpCommentGateway;
pub use issues::HttpIssueGateway;
pub use projects::HttpProjectGateway;
pub use sprints::HttpSprintGateway;
