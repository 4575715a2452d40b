//! Drop-list identifiers and array moves for drag-and-drop.

use serde::{Deserialize, Serialize};
use std::fmt;

const BACKLOG_LIST: &str = "backlog";
const SPRINT_LIST_PREFIX: &str = "sprint-";

/// A list issues can be dragged between.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DropListId {
    /// The unsprinted backlog.
    Backlog,
    /// The issue list of a sprint.
    Sprint(String),
}

impl DropListId {
    /// List of the sprint with `id`.
    pub fn sprint(id: impl Into<String>) -> Self {
        Self::Sprint(id.into())
    }

    /// Sprint id this list belongs to, `None` for the backlog.
    pub fn sprint_id(&self) -> Option<&str> {
        match self {
            Self::Backlog => None,
            Self::Sprint(id) => Some(id),
        }
    }

    /// Parse `backlog` or `sprint-{id}`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw == BACKLOG_LIST {
            return Some(Self::Backlog);
        }
        raw.strip_prefix(SPRINT_LIST_PREFIX)
            .filter(|id| !id.is_empty())
            .map(Self::sprint)
    }
}

impl fmt::Display for DropListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backlog => f.write_str(BACKLOG_LIST),
            Self::Sprint(id) => write!(f, "{SPRINT_LIST_PREFIX}{id}"),
        }
    }
}

impl From<DropListId> for String {
    fn from(id: DropListId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for DropListId {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| format!("unknown drop list: {raw}"))
    }
}

/// A completed drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEvent {
    /// List the issue was dragged from.
    pub previous_container: DropListId,
    /// List the issue was dropped on.
    pub container: DropListId,
    /// Index in the source list.
    pub previous_index: usize,
    /// Index in the target list.
    pub current_index: usize,
}

impl DropEvent {
    /// Whether the drop stays within one list.
    pub fn is_reorder(&self) -> bool {
        self.previous_container == self.container
    }
}

/// Move an element within one list. Indices are clamped to the list bounds.
///
/// Returns the clamped `(from, to)` pair actually used, or `None` when the
/// list is empty.
pub fn move_item_in_array<T>(items: &mut Vec<T>, from: usize, to: usize) -> Option<(usize, usize)> {
    let last = items.len().checked_sub(1)?;
    let from = from.min(last);
    let to = to.min(last);
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Some((from, to))
}

/// Move an element from one list into another.
///
/// `from` is clamped to the source, `to` to one past the end of the target.
/// Returns the clamped `(from, to)` pair, or `None` when the source is empty.
pub fn transfer_array_item<T>(
    source: &mut Vec<T>,
    target: &mut Vec<T>,
    from: usize,
    to: usize,
) -> Option<(usize, usize)> {
    let last = source.len().checked_sub(1)?;
    let from = from.min(last);
    let to = to.min(target.len());
    let item = source.remove(from);
    target.insert(to, item);
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_list_ids() {
        assert_eq!(DropListId::Backlog.to_string(), "backlog");
        assert_eq!(DropListId::sprint("42").to_string(), "sprint-42");
        assert_eq!(DropListId::parse("sprint-42"), Some(DropListId::sprint("42")));
        assert_eq!(DropListId::parse("backlog"), Some(DropListId::Backlog));
        assert_eq!(DropListId::parse("sprint-"), None);
        assert_eq!(DropListId::parse("board"), None);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&DropListId::sprint("7")).unwrap();
        assert_eq!(json, "\"sprint-7\"");
        let id: DropListId = serde_json::from_str("\"backlog\"").unwrap();
        assert_eq!(id, DropListId::Backlog);
    }

    #[test]
    fn test_move_item_in_array() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert_eq!(move_item_in_array(&mut items, 0, 2), Some((0, 2)));
        assert_eq!(items, ['b', 'c', 'a', 'd']);

        // out of range target clamps to the end
        assert_eq!(move_item_in_array(&mut items, 1, 10), Some((1, 3)));
        assert_eq!(items, ['b', 'a', 'd', 'c']);

        let mut empty: Vec<char> = Vec::new();
        assert_eq!(move_item_in_array(&mut empty, 0, 1), None);
    }

    #[test]
    fn test_transfer_array_item() {
        let mut source = vec![1, 2, 3];
        let mut target = vec![10, 20];
        assert_eq!(transfer_array_item(&mut source, &mut target, 1, 1), Some((1, 1)));
        assert_eq!(source, [1, 3]);
        assert_eq!(target, [10, 2, 20]);

        assert_eq!(transfer_array_item(&mut source, &mut target, 9, 9), Some((1, 3)));
        assert_eq!(source, [1]);
        assert_eq!(target, [10, 2, 20, 3]);
    }
}
