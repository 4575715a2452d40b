//! Sprint domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::issue::{total_points, Issue};

/// Lifecycle of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SprintStatus {
    /// Not started yet.
    #[default]
    Planning,
    /// In progress.
    Active,
    /// Closed.
    Completed,
}

impl SprintStatus {
    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Parse a display name or backend code, case-insensitively.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "planning" | "planned" | "created" => Some(Self::Planning),
            "active" | "started" | "in_progress" => Some(Self::Active),
            "completed" | "complete" | "closed" | "finish" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time-boxed container of issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Server-assigned id.
    pub id: String,
    /// Sprint name.
    pub name: String,
    /// Sprint goal, possibly empty.
    pub goal: String,
    /// Lifecycle state.
    pub status: SprintStatus,
    /// First day.
    pub start_date: Option<NaiveDate>,
    /// Last day.
    pub end_date: Option<NaiveDate>,
    /// Story points of all owned issues.
    pub total_story_points: u32,
    /// Story points of done owned issues.
    pub completed_story_points: u32,
    /// Issues owned by this sprint. Each has `sprint_id == Some(self.id)`.
    pub issues: Vec<Issue>,
}

impl Sprint {
    /// An empty planning sprint.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            goal: String::new(),
            status: SprintStatus::Planning,
            start_date: None,
            end_date: None,
            total_story_points: 0,
            completed_story_points: 0,
            issues: Vec::new(),
        }
    }

    /// Recompute the aggregate point counters from the owned issues.
    pub fn recompute_totals(&mut self) {
        self.total_story_points = total_points(&self.issues);
        self.completed_story_points = total_points(self.issues.iter().filter(|i| i.status.is_done()));
    }

    /// Completed share of story points, rounded to a whole percent.
    pub fn completion_percentage(&self) -> u32 {
        if self.total_story_points == 0 {
            return 0;
        }
        let pct = f64::from(self.completed_story_points) / f64::from(self.total_story_points) * 100.0;
        pct.round() as u32
    }

    /// Number of done issues.
    pub fn done_count(&self) -> usize {
        self.issues.iter().filter(|i| i.status.is_done()).count()
    }

    /// Number of issues not done yet.
    pub fn todo_count(&self) -> usize {
        self.issues.len() - self.done_count()
    }
}

/// Create/edit form for a sprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintDraft {
    /// Sprint name; required.
    pub name: String,
    /// Sprint goal.
    pub goal: String,
    /// First day; required.
    pub start_date: Option<NaiveDate>,
    /// Last day; required.
    pub end_date: Option<NaiveDate>,
}

impl SprintDraft {
    /// Form pre-filled from an existing sprint.
    pub fn from_sprint(sprint: &Sprint) -> Self {
        Self {
            name: sprint.name.clone(),
            goal: sprint.goal.clone(),
            start_date: sprint.start_date,
            end_date: sprint.end_date,
        }
    }
}
