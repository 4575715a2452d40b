//! Backlog view-controller.
//!
//! - `state`: the serializable view state
//! - `filter`: conjunctive issue filters and sorting
//! - `drag_drop`: drop-list ids and array moves
//! - `reducer`: invertible optimistic transitions
//! - `controller`: user actions mapped to gateway calls

pub mod controller;
pub mod drag_drop;
pub mod filter;
pub mod reducer;
pub mod state;

pub use controller::{ActionOutcome, BacklogController, BacklogDeps};
pub use drag_drop::{move_item_in_array, transfer_array_item, DropEvent, DropListId};
pub use filter::{sort_issues, IssueFilters, SortKey, SortOrder, TypeToggles};
pub use reducer::Transition;
pub use state::{BacklogViewState, CommentsState, ViewMode};
