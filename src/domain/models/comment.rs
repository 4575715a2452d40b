//! Comments attached to an issue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Server-assigned id.
    pub id: String,
    /// Comment text.
    pub content: String,
    /// Id of the owning issue.
    pub task_id: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
    /// Last edit, if any.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Display name of the author, when the backend includes it.
    #[serde(default)]
    pub author_name: Option<String>,
}

/// Display order of the comment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommentSortOrder {
    /// Most recent first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
}

impl CommentSortOrder {
    /// The opposite order.
    pub fn toggled(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
        }
    }
}

/// Sort comments by creation time in the given order.
pub fn sort_comments(comments: &mut [Comment], order: CommentSortOrder) {
    match order {
        CommentSortOrder::Newest => comments.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        CommentSortOrder::Oldest => comments.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn comment(id: &str, hour: u32) -> Comment {
        Comment {
            id: id.to_string(),
            content: format!("comment {id}"),
            task_id: "t1".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            updated_at: None,
            author_name: None,
        }
    }

    #[test]
    fn test_newest_first_then_toggle() {
        let mut comments = vec![comment("t2", 2), comment("t1", 1), comment("t3", 3)];

        sort_comments(&mut comments, CommentSortOrder::Newest);
        let ids: Vec<_> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["t3", "t2", "t1"]);

        sort_comments(&mut comments, CommentSortOrder::Newest.toggled());
        let ids: Vec<_> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
    }
}
