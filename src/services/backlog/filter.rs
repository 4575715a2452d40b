//! In-memory issue filtering and sorting. No I/O.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::models::{Issue, IssuePriority, IssueStatus, IssueType};

/// "Only" toggles for issue types. Each enabled toggle requires that type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeToggles {
    /// Require epics.
    pub epics_only: bool,
    /// Require stories.
    pub stories_only: bool,
    /// Require tasks.
    pub tasks_only: bool,
    /// Require bugs.
    pub bugs_only: bool,
}

impl TypeToggles {
    fn admits(&self, ty: IssueType) -> bool {
        !((self.epics_only && ty != IssueType::Epic)
            || (self.stories_only && ty != IssueType::Story)
            || (self.tasks_only && ty != IssueType::Task)
            || (self.bugs_only && ty != IssueType::Bug))
    }
}

/// Active filters. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFilters {
    /// Case-insensitive substring of title or key.
    pub search: String,
    /// Exact priority.
    pub priority: Option<IssuePriority>,
    /// Exact type.
    pub issue_type: Option<IssueType>,
    /// Exact status.
    pub status: Option<IssueStatus>,
    /// Owning sprint.
    pub sprint_id: Option<String>,
    /// Parent epic.
    pub epic_id: Option<String>,
    /// Type toggles.
    pub toggles: TypeToggles,
}

impl IssueFilters {
    /// Whether no filter is active.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `issue` satisfies every active filter.
    pub fn matches(&self, issue: &Issue) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !issue.title.to_lowercase().contains(&needle)
                && !issue.key.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        self.priority.is_none_or(|p| issue.priority == p)
            && self.issue_type.is_none_or(|t| issue.issue_type == t)
            && self.status.is_none_or(|s| issue.status == s)
            && self
                .sprint_id
                .as_ref()
                .is_none_or(|id| issue.sprint_id.as_ref() == Some(id))
            && self
                .epic_id
                .as_ref()
                .is_none_or(|id| issue.epic_id.as_ref() == Some(id))
            && self.toggles.admits(issue.issue_type)
    }

    /// Issues satisfying every active filter, in input order.
    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        issues.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

/// Field to sort issues by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Priority weight.
    #[default]
    Priority,
    /// Creation time.
    Created,
    /// Last update time.
    Updated,
    /// Issue key.
    Key,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortKey {
    /// Parse `priority`, `created`, `updated` or `key`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "priority" => Some(Self::Priority),
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "key" => Some(Self::Key),
            _ => None,
        }
    }
}

impl SortOrder {
    /// Parse `asc` or `desc`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Stable sort by `key`. Missing timestamps sort before present ones.
pub fn sort_issues(issues: &mut [Issue], key: SortKey, order: SortOrder) {
    issues.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

fn compare(a: &Issue, b: &Issue, key: SortKey) -> Ordering {
    match key {
        SortKey::Priority => a.priority.weight().cmp(&b.priority.weight()),
        SortKey::Created => a.created.cmp(&b.created),
        SortKey::Updated => a.updated.cmp(&b.updated),
        SortKey::Key => a.key.cmp(&b.key),
    }
}
