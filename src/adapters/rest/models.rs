//! Backend request and response models.
//!
//! These structs mirror the tracker's JSON payloads. Field names follow the
//! backend (`taskName`, `responsableName`, ...) and never leave this adapter.

use serde::{Deserialize, Serialize};

/// A task as returned by `/tasks` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    /// Server-assigned id.
    pub id: String,
    /// Display title; preferred over `task_name`.
    #[serde(default)]
    pub title: Option<String>,
    /// Display description; preferred over `task_description`.
    #[serde(default)]
    pub description: Option<String>,
    /// Backend title.
    #[serde(default)]
    pub task_name: Option<String>,
    /// Backend description.
    #[serde(default)]
    pub task_description: Option<String>,
    /// Backend priority code (`HIGHEST` .. `LOWEST`).
    #[serde(default)]
    pub priority: Option<String>,
    /// Backend status code (`CREATED`, `IN_PROGRESS`, `FINISH`).
    #[serde(default)]
    pub status: Option<String>,
    /// Issue type name (`Epic`, `Story`, ...).
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,
    /// Estimate in story points.
    #[serde(default)]
    pub story_points: Option<u32>,
    /// Owning sprint, `None` for the backlog.
    #[serde(default)]
    pub sprint_id: Option<String>,
    /// Parent epic.
    #[serde(default)]
    pub epic_id: Option<String>,
    /// Current assignee.
    #[serde(default)]
    pub assigned_to: Option<AssignedUserDto>,
    /// Free-form labels.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Components touched.
    #[serde(default)]
    pub components: Option<Vec<String>>,
    /// Rank within its list.
    #[serde(default)]
    pub order: Option<i64>,
    /// Due date, `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Free-text reporter name.
    #[serde(default)]
    pub responsable_name: Option<String>,
}

/// The user a task is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedUserDto {
    /// User id.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Body for task creation and partial update. Absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWriteDto {
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,
    /// Backend status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Backend priority code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Issue type name.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    /// Estimate in story points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    /// Parent epic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<String>,
    /// Due date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Replacement label set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Replacement component set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
    /// Reporter id, or `Unassigned`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsable_name: Option<String>,
}

/// Body for `PUT /tasks/{id}/assign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    /// User to assign; empty to unassign.
    pub user_id: String,
}

/// Body for `PUT /tasks/{id}/sprint`. `None` serializes as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToSprintRequest {
    /// Target sprint.
    pub sprint_id: Option<String>,
}

/// A sprint as returned by `/sprints` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintDto {
    /// Server-assigned id.
    pub id: String,
    /// Sprint name.
    #[serde(default)]
    pub name: String,
    /// Sprint goal.
    #[serde(default)]
    pub goal: Option<String>,
    /// Lifecycle state (`PLANNING`, `ACTIVE`, `COMPLETED`).
    #[serde(default)]
    pub status: Option<String>,
    /// First day, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Points of all issues, as reported by the server.
    #[serde(default)]
    pub total_story_points: Option<u32>,
    /// Points of done issues, as reported by the server.
    #[serde(default)]
    pub completed_story_points: Option<u32>,
}

/// Body for sprint creation and update. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintWriteDto {
    /// Sprint name.
    pub name: String,
    /// Sprint goal.
    pub goal: String,
    /// First day.
    pub start_date: Option<String>,
    /// Last day.
    pub end_date: Option<String>,
}

/// A comment as returned by `/comments` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    /// Server-assigned id.
    pub id: String,
    /// Comment text.
    pub content: String,
    /// Owning task.
    #[serde(default)]
    pub task_id: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last edit timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Author.
    #[serde(default)]
    pub user: Option<AssignedUserDto>,
}

/// Body for comment creation and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWriteDto {
    /// Comment text.
    pub content: String,
    /// Owning task; set on creation only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserialization_with_backend_names() {
        let json = r#"{
            "id": "9f3c2a10",
            "taskName": "Fix login bug",
            "taskDescription": "Users can't log in",
            "status": "IN_PROGRESS",
            "priority": "HIGH",
            "type": "Bug",
            "storyPoints": 3,
            "assignedTo": { "id": "u1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com" },
            "createdAt": "2024-01-01T10:00:00Z",
            "updatedAt": "2024-01-02T10:00:00Z",
            "responsableName": "grace"
        }"#;
        let task: TaskDto = serde_json::from_str(json).unwrap();
        assert_eq!(task.task_name.as_deref(), Some("Fix login bug"));
        assert_eq!(task.task_type.as_deref(), Some("Bug"));
        assert_eq!(task.story_points, Some(3));
        assert_eq!(task.assigned_to.unwrap().first_name, "Ada");
        assert!(task.labels.is_none());
    }

    #[test]
    fn test_minimal_task() {
        let task: TaskDto = serde_json::from_str(r#"{ "id": "1" }"#).unwrap();
        assert!(task.status.is_none());
        assert!(task.responsable_name.is_none());
    }

    #[test]
    fn test_write_body_omits_absent_fields() {
        let body = TaskWriteDto {
            task_name: Some("Title".into()),
            task_type: Some("Story".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "taskName": "Title", "type": "Story" }));
    }

    #[test]
    fn test_move_request_serializes_null() {
        let json = serde_json::to_value(MoveToSprintRequest { sprint_id: None }).unwrap();
        assert_eq!(json, serde_json::json!({ "sprintId": null }));
    }
}
