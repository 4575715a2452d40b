//! Service layer
//!
//! Coordinates domain ports into user-facing workflows.

pub mod backlog;

pub use backlog::{ActionOutcome, BacklogController, BacklogDeps, BacklogViewState};
