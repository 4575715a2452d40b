//! Optimistic updates as invertible transitions.
//!
//! A transition is applied to the view state before the remote call is sent.
//! Applying returns the inverse; the controller applies that inverse if the
//! call fails.

use serde::{Deserialize, Serialize};

use crate::domain::models::IssueStatus;

use super::drag_drop::{move_item_in_array, transfer_array_item, DropListId};
use super::state::BacklogViewState;

/// A reversible change to the view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Set an issue's status in every list and in the detail view.
    SetStatus {
        /// Issue to change.
        issue_id: String,
        /// New status.
        status: IssueStatus,
    },
    /// Move an issue within one list.
    Reorder {
        /// List holding the issue.
        list: DropListId,
        /// Current position.
        from: usize,
        /// Position after the move.
        to: usize,
    },
    /// Move an issue between lists, updating its sprint membership.
    Transfer {
        /// List the issue leaves.
        from_list: DropListId,
        /// List the issue joins.
        to_list: DropListId,
        /// Position in the source list.
        from: usize,
        /// Position in the target list.
        to: usize,
    },
}

impl Transition {
    /// Apply to `state` and return the transition that undoes it.
    ///
    /// Returns `None` and leaves `state` untouched when the transition does
    /// not apply: unknown issue or list, or an empty source list.
    pub fn apply(&self, state: &mut BacklogViewState) -> Option<Transition> {
        match self {
            Self::SetStatus { issue_id, status } => set_status(state, issue_id, *status),
            Self::Reorder { list, from, to } => {
                let items = state.list_mut(list)?;
                let (from, to) = move_item_in_array(items, *from, *to)?;
                Some(Self::Reorder {
                    list: list.clone(),
                    from: to,
                    to: from,
                })
            }
            Self::Transfer {
                from_list,
                to_list,
                from,
                to,
            } => {
                let (source, target) = state.list_pair_mut(from_list, to_list)?;
                let (from, to) = transfer_array_item(source, target, *from, *to)?;
                if let Some(moved) = target.get_mut(to) {
                    moved.sprint_id = to_list.sprint_id().map(str::to_string);
                }
                state.recompute_totals();
                Some(Self::Transfer {
                    from_list: to_list.clone(),
                    to_list: from_list.clone(),
                    from: to,
                    to: from,
                })
            }
        }
    }
}

fn set_status(
    state: &mut BacklogViewState,
    issue_id: &str,
    status: IssueStatus,
) -> Option<Transition> {
    let previous = state.find_issue(issue_id).map(|issue| issue.status).or_else(|| {
        state
            .selected_issue
            .as_ref()
            .filter(|issue| issue.id == issue_id)
            .map(|issue| issue.status)
    })?;

    for slot in [&mut state.selected_issue, &mut state.editing_issue] {
        if let Some(issue) = slot.as_mut().filter(|issue| issue.id == issue_id) {
            issue.status = status;
        }
    }
    if let Some(issue) = state.find_issue_mut(issue_id) {
        issue.status = status;
    }
    state.recompute_totals();

    Some(Transition::SetStatus {
        issue_id: issue_id.to_string(),
        status: previous,
    })
}
