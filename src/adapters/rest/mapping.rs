//! Translation between the backend task shape and the UI issue shape.
//!
//! Enumerations go through one [`SchemaTable`] per field. Lookups in either
//! direction take the first matching row and fall back to the table default,
//! so an unknown backend code never fails a response.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::models::{
    issue_key, Comment, Issue, IssuePatch, IssuePriority, IssueStatus, IssueType, NewIssue,
    Person, Sprint, SprintDraft, SprintStatus,
};

use super::models::{CommentDto, SprintDto, SprintWriteDto, TaskDto, TaskWriteDto};

/// Reporter shown when the backend has no responsible user.
pub const UNASSIGNED_REPORTER: &str = "Unassigned";

const ASSIGNEE_AVATAR_COLOR: &str = "6554C0";
const REPORTER_AVATAR_COLOR: &str = "7747AF";

/// A fixed two-way lookup between a UI enum and backend codes.
#[derive(Debug, Clone, Copy)]
pub struct SchemaTable<T: 'static> {
    rows: &'static [(T, &'static str)],
    default_ui: T,
    default_code: &'static str,
}

impl<T: Copy + PartialEq> SchemaTable<T> {
    /// Backend code for `value`; the default code when it has no row.
    pub fn to_backend(&self, value: T) -> &'static str {
        self.rows
            .iter()
            .find(|(ui, _)| *ui == value)
            .map_or(self.default_code, |(_, code)| *code)
    }

    /// UI value for `code`; the default when the code is unknown.
    pub fn to_ui(&self, code: &str) -> T {
        self.rows
            .iter()
            .find(|(_, c)| *c == code)
            .map_or(self.default_ui, |(ui, _)| *ui)
    }

    /// Code used when a value is absent.
    pub fn default_code(&self) -> &'static str {
        self.default_code
    }

    /// Every row, in lookup order.
    pub fn rows(&self) -> &'static [(T, &'static str)] {
        self.rows
    }
}

/// Priority codes. Unknown codes read as Medium.
pub const PRIORITY_SCHEMA: SchemaTable<IssuePriority> = SchemaTable {
    rows: &[
        (IssuePriority::Highest, "HIGHEST"),
        (IssuePriority::High, "HIGH"),
        (IssuePriority::Medium, "MEDIUM"),
        (IssuePriority::Low, "LOW"),
        (IssuePriority::Lowest, "LOWEST"),
    ],
    default_ui: IssuePriority::Medium,
    default_code: "MEDIUM",
};

/// Review shares `IN_PROGRESS` with In Progress; the first row wins on the
/// way back, so Review reads back as In Progress.
pub const STATUS_SCHEMA: SchemaTable<IssueStatus> = SchemaTable {
    rows: &[
        (IssueStatus::ToDo, "CREATED"),
        (IssueStatus::InProgress, "IN_PROGRESS"),
        (IssueStatus::Review, "IN_PROGRESS"),
        (IssueStatus::Done, "FINISH"),
    ],
    default_ui: IssueStatus::ToDo,
    default_code: "CREATED",
};

/// Parse a backend timestamp: RFC 3339, or a zone-less `LocalDateTime` read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a backend date, accepting either a plain date or a full timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date_naive()))
}

fn avatar_url(initials: &str, background: &str) -> String {
    format!("https://ui-avatars.com/api/?name={initials}&background={background}&color=fff")
}

fn first_char(s: &str) -> String {
    s.chars().next().map(String::from).unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Convert a backend task into an issue, filling defaults.
pub fn task_to_issue(task: TaskDto) -> Issue {
    let assignee = task.assigned_to.map(|user| Person {
        name: format!("{} {}", user.first_name, user.last_name),
        avatar: avatar_url(
            &format!("{}{}", first_char(&user.first_name), first_char(&user.last_name)),
            ASSIGNEE_AVATAR_COLOR,
        ),
        id: user.id,
    });

    let reporter = non_empty(task.responsable_name).map(|name| {
        let initial = first_char(&name);
        Person {
            id: "unknown".to_string(),
            avatar: avatar_url(
                if initial.is_empty() { "?" } else { initial.as_str() },
                REPORTER_AVATAR_COLOR,
            ),
            name,
        }
    });

    Issue {
        key: issue_key(&task.id),
        id: task.id,
        title: non_empty(task.title).or(task.task_name).unwrap_or_default(),
        description: non_empty(task.description)
            .or(task.task_description)
            .unwrap_or_default(),
        priority: PRIORITY_SCHEMA.to_ui(task.priority.as_deref().unwrap_or(PRIORITY_SCHEMA.default_code())),
        status: STATUS_SCHEMA.to_ui(task.status.as_deref().unwrap_or(STATUS_SCHEMA.default_code())),
        issue_type: task
            .task_type
            .as_deref()
            .and_then(IssueType::from_str)
            .unwrap_or_default(),
        assignee,
        reporter,
        due_date: task.due_date.as_deref().and_then(parse_timestamp),
        story_points: Some(task.story_points.unwrap_or(0)),
        sprint_id: non_empty(task.sprint_id),
        epic_id: non_empty(task.epic_id),
        order: task.order.unwrap_or(0),
        labels: task.labels.unwrap_or_default(),
        components: task.components.unwrap_or_default(),
        created: task.created_at.as_deref().and_then(parse_timestamp),
        updated: task.updated_at.as_deref().and_then(parse_timestamp),
    }
}

/// Backend body for a partial update; only fields present in the patch.
pub fn patch_to_task(patch: &IssuePatch) -> TaskWriteDto {
    TaskWriteDto {
        task_name: patch.title.clone(),
        task_description: patch.description.clone(),
        status: patch.status.map(|s| STATUS_SCHEMA.to_backend(s).to_string()),
        priority: patch.priority.map(|p| PRIORITY_SCHEMA.to_backend(p).to_string()),
        task_type: patch.issue_type.map(|t| t.as_str().to_string()),
        story_points: patch.story_points,
        epic_id: patch.epic_id.clone(),
        due_date: patch.due_date.map(|d| d.to_rfc3339()),
        labels: patch.labels.clone(),
        components: patch.components.clone(),
        responsable_name: None,
    }
}

/// Backend body for creation. The reporter is the current user id.
pub fn new_issue_to_task(issue: &NewIssue, reporter_id: Option<&str>) -> TaskWriteDto {
    TaskWriteDto {
        task_name: Some(issue.title.clone()),
        task_description: Some(issue.description.clone()),
        status: Some(STATUS_SCHEMA.to_backend(issue.status).to_string()),
        priority: Some(PRIORITY_SCHEMA.to_backend(issue.priority).to_string()),
        task_type: Some(issue.issue_type.as_str().to_string()),
        story_points: issue.story_points,
        responsable_name: Some(
            reporter_id
                .filter(|id| !id.is_empty())
                .unwrap_or(UNASSIGNED_REPORTER)
                .to_string(),
        ),
        ..Default::default()
    }
}

/// Backend sprint to domain sprint, without issues.
pub fn sprint_from_dto(dto: SprintDto) -> Sprint {
    Sprint {
        id: dto.id,
        name: dto.name,
        goal: dto.goal.unwrap_or_default(),
        status: dto
            .status
            .as_deref()
            .and_then(SprintStatus::from_str)
            .unwrap_or_default(),
        start_date: dto.start_date.as_deref().and_then(parse_date),
        end_date: dto.end_date.as_deref().and_then(parse_date),
        total_story_points: dto.total_story_points.unwrap_or(0),
        completed_story_points: dto.completed_story_points.unwrap_or(0),
        issues: Vec::new(),
    }
}

/// Sprint form to request body. The name is trimmed.
pub fn sprint_draft_to_dto(draft: &SprintDraft) -> SprintWriteDto {
    SprintWriteDto {
        name: draft.name.trim().to_string(),
        goal: draft.goal.clone(),
        start_date: draft.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
        end_date: draft.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
    }
}

/// `None` when the creation timestamp is unreadable.
pub fn comment_from_dto(dto: CommentDto, issue_id: &str) -> Option<Comment> {
    let created_at = parse_timestamp(&dto.created_at)?;
    Some(Comment {
        id: dto.id,
        content: dto.content,
        task_id: dto.task_id.unwrap_or_else(|| issue_id.to_string()),
        created_at,
        updated_at: dto.updated_at.as_deref().and_then(parse_timestamp),
        author_name: dto
            .user
            .map(|u| format!("{} {}", u.first_name, u.last_name).trim().to_string()),
    })
}
