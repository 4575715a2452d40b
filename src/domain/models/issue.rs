//! Issue domain model.
//!
//! The UI-facing shape of a unit of work. Backend field names never appear
//! here; see `adapters::rest::mapping` for the translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IssueStatus {
    /// Not started.
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Awaiting review.
    Review,
    /// Finished.
    Done,
}

impl IssueStatus {
    /// All statuses in workflow order.
    pub const ALL: [IssueStatus; 4] = [Self::ToDo, Self::InProgress, Self::Review, Self::Done];

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    /// Parse a display name, case- and separator-insensitively.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "to do" | "todo" => Some(Self::ToDo),
            "in progress" => Some(Self::InProgress),
            "review" => Some(Self::Review),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Whether the issue counts as completed.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue priority, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IssuePriority {
    /// Must be done first.
    Highest,
    /// Important.
    High,
    /// Normal.
    #[default]
    Medium,
    /// Can wait.
    Low,
    /// Nice to have.
    Lowest,
}

impl IssuePriority {
    /// All priorities, highest first.
    pub const ALL: [IssuePriority; 5] =
        [Self::Highest, Self::High, Self::Medium, Self::Low, Self::Lowest];

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Highest => "Highest",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Lowest => "Lowest",
        }
    }

    /// Parse a display name, case-insensitively.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "highest" => Some(Self::Highest),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "lowest" => Some(Self::Lowest),
            _ => None,
        }
    }

    /// Numeric weight used for sorting: Highest = 5, Lowest = 1.
    pub fn weight(&self) -> u8 {
        match self {
            Self::Highest => 5,
            Self::High => 4,
            Self::Medium => 3,
            Self::Low => 2,
            Self::Lowest => 1,
        }
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IssueType {
    /// A large body of work split into stories.
    Epic,
    /// A user-facing feature.
    Story,
    /// A unit of work.
    #[default]
    Task,
    /// A defect.
    Bug,
    /// Part of a larger issue.
    #[serde(rename = "Sub-task")]
    SubTask,
}

impl IssueType {
    /// All types.
    pub const ALL: [IssueType; 5] = [Self::Epic, Self::Story, Self::Task, Self::Bug, Self::SubTask];

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Epic => "Epic",
            Self::Story => "Story",
            Self::Task => "Task",
            Self::Bug => "Bug",
            Self::SubTask => "Sub-task",
        }
    }

    /// Parse a display name, case-insensitively.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "epic" => Some(Self::Epic),
            "story" => Some(Self::Story),
            "task" => Some(Self::Task),
            "bug" => Some(Self::Bug),
            "sub-task" | "subtask" | "sub_task" => Some(Self::SubTask),
            _ => None,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person attached to an issue (assignee or reporter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
}

/// An issue as the backlog view sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Server-assigned id.
    pub id: String,
    /// Human-readable key, e.g. `SCRUM-1a2b`.
    pub key: String,
    /// Summary line.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Priority.
    pub priority: IssuePriority,
    /// Workflow status.
    pub status: IssueStatus,
    /// Issue type.
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Person working on the issue.
    pub assignee: Option<Person>,
    /// Person who reported the issue.
    pub reporter: Option<Person>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Estimate; `None` when unestimated.
    pub story_points: Option<u32>,
    /// Owning sprint. `None` means the issue lives in the backlog.
    pub sprint_id: Option<String>,
    /// Parent epic.
    pub epic_id: Option<String>,
    /// Rank within its list.
    pub order: i64,
    /// Free-form labels.
    pub labels: Vec<String>,
    /// Components touched.
    pub components: Vec<String>,
    /// Creation time.
    pub created: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated: Option<DateTime<Utc>>,
}

impl Issue {
    /// A minimal issue with defaults for everything but identity and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            key: issue_key(&id),
            id,
            title: title.into(),
            description: String::new(),
            priority: IssuePriority::default(),
            status: IssueStatus::default(),
            issue_type: IssueType::default(),
            assignee: None,
            reporter: None,
            due_date: None,
            story_points: Some(0),
            sprint_id: None,
            epic_id: None,
            order: 0,
            labels: Vec::new(),
            components: Vec::new(),
            created: None,
            updated: None,
        }
    }

    /// Story points, zero when unestimated.
    pub fn points(&self) -> u32 {
        self.story_points.unwrap_or(0)
    }
}

/// Sum of story points, saturating at `u32::MAX`.
///
/// Point values come straight from the backend, so the total is clamped
/// rather than allowed to overflow.
pub fn total_points<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> u32 {
    issues
        .into_iter()
        .map(Issue::points)
        .fold(0u32, u32::saturating_add)
}

/// Human-readable key derived from the first four characters of the id.
pub fn issue_key(id: &str) -> String {
    let prefix: String = id.chars().take(4).collect();
    format!("SCRUM-{prefix}")
}

/// A partial issue: only `Some` fields are sent to the backend.
///
/// Sprint membership and assignment have dedicated endpoints and are not
/// part of a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuePatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<IssuePriority>,
    /// New status.
    pub status: Option<IssueStatus>,
    /// New type.
    pub issue_type: Option<IssueType>,
    /// New estimate.
    pub story_points: Option<u32>,
    /// New parent epic.
    pub epic_id: Option<String>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Replacement label set.
    pub labels: Option<Vec<String>>,
    /// Replacement component set.
    pub components: Option<Vec<String>>,
}

impl IssuePatch {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fields of `edited` that differ from `original`.
    pub fn diff(original: &Issue, edited: &Issue) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }

        Self {
            title: changed(&original.title, &edited.title),
            description: changed(&original.description, &edited.description),
            priority: changed(&original.priority, &edited.priority),
            status: changed(&original.status, &edited.status),
            issue_type: changed(&original.issue_type, &edited.issue_type),
            story_points: changed(&original.story_points, &edited.story_points).flatten(),
            epic_id: changed(&original.epic_id, &edited.epic_id).flatten(),
            due_date: changed(&original.due_date, &edited.due_date).flatten(),
            labels: changed(&original.labels, &edited.labels),
            components: changed(&original.components, &edited.components),
        }
    }
}

/// Input for issue creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIssue {
    /// Title; required.
    pub title: String,
    /// Description.
    pub description: String,
    /// Priority.
    pub priority: IssuePriority,
    /// Initial status.
    pub status: IssueStatus,
    /// Issue type.
    pub issue_type: IssueType,
    /// Estimate.
    pub story_points: Option<u32>,
    /// Target sprint; `None` puts the issue in the backlog.
    pub sprint_id: Option<String>,
}

impl Default for NewIssue {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: IssuePriority::Medium,
            status: IssueStatus::ToDo,
            issue_type: IssueType::Task,
            story_points: Some(0),
            sprint_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_key_uses_first_four_chars() {
        assert_eq!(issue_key("abcdef123"), "SCRUM-abcd");
        assert_eq!(issue_key("ab"), "SCRUM-ab");
    }

    #[test]
    fn test_enum_string_forms() {
        for status in IssueStatus::ALL {
            assert_eq!(IssueStatus::from_str(status.as_str()), Some(status));
        }
        for priority in IssuePriority::ALL {
            assert_eq!(IssuePriority::from_str(priority.as_str()), Some(priority));
        }
        for ty in IssueType::ALL {
            assert_eq!(IssueType::from_str(ty.as_str()), Some(ty));
        }
        assert_eq!(IssueStatus::from_str("in_progress"), Some(IssueStatus::InProgress));
        assert_eq!(IssueStatus::from_str("blocked"), None);
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&IssueStatus::ToDo).unwrap();
        assert_eq!(json, "\"To Do\"");
        let ty: IssueType = serde_json::from_str("\"Sub-task\"").unwrap();
        assert_eq!(ty, IssueType::SubTask);
    }

    #[test]
    fn test_patch_diff_only_changed_fields() {
        let original = Issue::new("1234", "Old");
        let mut edited = original.clone();
        edited.title = "New".to_string();
        edited.priority = IssuePriority::High;

        let patch = IssuePatch::diff(&original, &edited);
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert_eq!(patch.priority, Some(IssuePriority::High));
        assert!(patch.status.is_none());
        assert!(patch.description.is_none());
        assert!(!patch.is_empty());

        assert!(IssuePatch::diff(&original, &original).is_empty());
    }
}
