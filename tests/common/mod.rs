//! Common test utilities for integration tests
//!
//! An in-memory tracker implementing every gateway port, a fixed user
//! directory and a notifier that records what the user was told.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use sprintboard::domain::errors::{DomainError, DomainResult};
use sprintboard::domain::models::{
    Board, Comment, CurrentUser, Issue, IssuePatch, IssueStatus, NewIssue, Project, Sprint,
    SprintDraft, SprintStatus, TeamMember,
};
use sprintboard::domain::ports::{
    CommentGateway, IssueGateway, Notifier, ProjectGateway, SprintGateway, UserDirectory,
};
use sprintboard::services::{BacklogController, BacklogDeps};

pub const PROJECT_ID: &str = "p1";
pub const BOARD_ID: &str = "b1";
pub const ME: &str = "u-me";

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[derive(Default)]
struct TrackerData {
    project: Option<Project>,
    sprints: Vec<Sprint>,
    issues: Vec<Issue>,
    comments: Vec<Comment>,
    members: Vec<TeamMember>,
    failing: HashSet<&'static str>,
    calls: Vec<String>,
    next_id: u32,
}

/// In-memory tracker backend. Operations listed with [`FakeTracker::fail`]
/// return a server error instead of touching the data.
#[derive(Default)]
pub struct FakeTracker {
    data: Mutex<TrackerData>,
}

impl FakeTracker {
    pub fn new() -> Self {
        let tracker = Self::default();
        tracker.data.lock().unwrap().project = Some(Project {
            id: PROJECT_ID.to_string(),
            name: "Apollo".to_string(),
            boards: vec![Board {
                id: BOARD_ID.to_string(),
                name: Some("Apollo board".to_string()),
            }],
        });
        tracker
    }

    pub fn without_boards(self) -> Self {
        if let Some(project) = self.data.lock().unwrap().project.as_mut() {
            project.boards.clear();
        }
        self
    }

    pub fn with_sprint(self, id: &str, name: &str) -> Self {
        let mut sprint = Sprint::new(id, name);
        sprint.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        sprint.end_date = NaiveDate::from_ymd_opt(2024, 1, 14);
        self.data.lock().unwrap().sprints.push(sprint);
        self
    }

    pub fn with_issue(self, id: &str, sprint_id: Option<&str>, points: u32) -> Self {
        let mut issue = Issue::new(id, format!("Issue {id}"));
        issue.sprint_id = sprint_id.map(str::to_string);
        issue.story_points = Some(points);
        self.data.lock().unwrap().issues.push(issue);
        self
    }

    pub fn with_comment(self, comment: Comment) -> Self {
        self.data.lock().unwrap().comments.push(comment);
        self
    }

    pub fn with_member(self, id: &str, first: &str, last: &str) -> Self {
        self.data.lock().unwrap().members.push(TeamMember {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: None,
        });
        self
    }

    pub fn fail(&self, operation: &'static str) {
        self.data.lock().unwrap().failing.insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.data.lock().unwrap().failing.remove(operation);
    }

    /// Operations called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.data.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == operation).count()
    }

    pub fn issue(&self, id: &str) -> Option<Issue> {
        self.data.lock().unwrap().issues.iter().find(|i| i.id == id).cloned()
    }

    pub fn sprint(&self, id: &str) -> Option<Sprint> {
        self.data.lock().unwrap().sprints.iter().find(|s| s.id == id).cloned()
    }

    fn begin(&self, operation: &'static str) -> DomainResult<std::sync::MutexGuard<'_, TrackerData>> {
        let mut data = self.data.lock().unwrap();
        data.calls.push(operation.to_string());
        if data.failing.contains(operation) {
            return Err(DomainError::Server);
        }
        Ok(data)
    }
}

fn next_id(data: &mut TrackerData, prefix: &str) -> String {
    data.next_id += 1;
    format!("{prefix}-{}", data.next_id)
}

fn issue_mut<'a>(data: &'a mut TrackerData, id: &str) -> DomainResult<&'a mut Issue> {
    data.issues.iter_mut().find(|i| i.id == id).ok_or(DomainError::NotFound)
}

fn sprint_mut<'a>(data: &'a mut TrackerData, id: &str) -> DomainResult<&'a mut Sprint> {
    data.sprints.iter_mut().find(|s| s.id == id).ok_or(DomainError::NotFound)
}

#[async_trait]
impl IssueGateway for FakeTracker {
    async fn list_by_project(&self, _project_id: &str) -> DomainResult<Vec<Issue>> {
        let data = self.begin("list_issues")?;
        Ok(data.issues.clone())
    }

    async fn get(&self, issue_id: &str) -> DomainResult<Issue> {
        let data = self.begin("get_issue")?;
        data.issues
            .iter()
            .find(|i| i.id == issue_id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn create(&self, _project_id: &str, issue: &NewIssue) -> DomainResult<Issue> {
        let mut data = self.begin("create_issue")?;
        let id = next_id(&mut data, "new");
        let mut created = Issue::new(id, issue.title.clone());
        created.description = issue.description.clone();
        created.priority = issue.priority;
        created.status = issue.status;
        created.issue_type = issue.issue_type;
        created.story_points = issue.story_points;
        data.issues.push(created.clone());
        Ok(created)
    }

    async fn update(&self, issue_id: &str, patch: &IssuePatch) -> DomainResult<Issue> {
        let mut data = self.begin("update_issue")?;
        let issue = issue_mut(&mut data, issue_id)?;
        if let Some(title) = &patch.title {
            issue.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            issue.description.clone_from(description);
        }
        if let Some(priority) = patch.priority {
            issue.priority = priority;
        }
        if let Some(status) = patch.status {
            issue.status = status;
        }
        if let Some(issue_type) = patch.issue_type {
            issue.issue_type = issue_type;
        }
        if patch.story_points.is_some() {
            issue.story_points = patch.story_points;
        }
        if patch.epic_id.is_some() {
            issue.epic_id.clone_from(&patch.epic_id);
        }
        if patch.due_date.is_some() {
            issue.due_date = patch.due_date;
        }
        if let Some(labels) = &patch.labels {
            issue.labels.clone_from(labels);
        }
        if let Some(components) = &patch.components {
            issue.components.clone_from(components);
        }
        Ok(issue.clone())
    }

    async fn delete(&self, issue_id: &str) -> DomainResult<()> {
        let mut data = self.begin("delete_issue")?;
        data.issues.retain(|i| i.id != issue_id);
        Ok(())
    }

    async fn assign(&self, issue_id: &str, user_id: &str) -> DomainResult<Issue> {
        let mut data = self.begin("assign_issue")?;
        let person = data.members.iter().find(|m| m.id == user_id).map(|m| {
            sprintboard::domain::models::Person {
                id: m.id.clone(),
                name: m.full_name(),
                avatar: String::new(),
            }
        });
        let issue = issue_mut(&mut data, issue_id)?;
        issue.assignee = if user_id.is_empty() {
            None
        } else {
            Some(person.unwrap_or_else(|| sprintboard::domain::models::Person {
                id: user_id.to_string(),
                name: user_id.to_string(),
                avatar: String::new(),
            }))
        };
        Ok(issue.clone())
    }

    async fn move_to_sprint(&self, issue_id: &str, sprint_id: Option<&str>) -> DomainResult<Issue> {
        let mut data = self.begin("move_issue")?;
        let issue = issue_mut(&mut data, issue_id)?;
        issue.sprint_id = sprint_id.map(str::to_string);
        Ok(issue.clone())
    }

    async fn update_status(&self, issue_id: &str, status: IssueStatus) -> DomainResult<Issue> {
        let mut data = self.begin("update_status")?;
        let issue = issue_mut(&mut data, issue_id)?;
        issue.status = status;
        Ok(issue.clone())
    }
}

#[async_trait]
impl SprintGateway for FakeTracker {
    async fn list(&self, _board_id: &str) -> DomainResult<Vec<Sprint>> {
        let data = self.begin("list_sprints")?;
        Ok(data.sprints.clone())
    }

    async fn create(&self, _board_id: &str, draft: &SprintDraft) -> DomainResult<Sprint> {
        let mut data = self.begin("create_sprint")?;
        let id = next_id(&mut data, "sprint");
        let mut sprint = Sprint::new(id, draft.name.clone());
        sprint.goal.clone_from(&draft.goal);
        sprint.start_date = draft.start_date;
        sprint.end_date = draft.end_date;
        data.sprints.push(sprint.clone());
        Ok(sprint)
    }

    async fn update(&self, sprint_id: &str, draft: &SprintDraft) -> DomainResult<Sprint> {
        let mut data = self.begin("update_sprint")?;
        let sprint = sprint_mut(&mut data, sprint_id)?;
        sprint.name.clone_from(&draft.name);
        sprint.goal.clone_from(&draft.goal);
        sprint.start_date = draft.start_date;
        sprint.end_date = draft.end_date;
        Ok(sprint.clone())
    }

    async fn start(&self, sprint_id: &str) -> DomainResult<Sprint> {
        let mut data = self.begin("start_sprint")?;
        let sprint = sprint_mut(&mut data, sprint_id)?;
        sprint.status = SprintStatus::Active;
        Ok(sprint.clone())
    }

    async fn complete(&self, sprint_id: &str) -> DomainResult<Sprint> {
        let mut data = self.begin("complete_sprint")?;
        let sprint = sprint_mut(&mut data, sprint_id)?;
        sprint.status = SprintStatus::Completed;
        Ok(sprint.clone())
    }

    async fn delete(&self, sprint_id: &str) -> DomainResult<()> {
        let mut data = self.begin("delete_sprint")?;
        data.sprints.retain(|s| s.id != sprint_id);
        for issue in &mut data.issues {
            if issue.sprint_id.as_deref() == Some(sprint_id) {
                issue.sprint_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectGateway for FakeTracker {
    async fn get(&self, project_id: &str) -> DomainResult<Project> {
        let data = self.begin("get_project")?;
        data.project
            .clone()
            .filter(|p| p.id == project_id)
            .ok_or(DomainError::NotFound)
    }

    async fn create_default_board(&self, _project_id: &str) -> DomainResult<Board> {
        let mut data = self.begin("create_default_board")?;
        let board = Board {
            id: BOARD_ID.to_string(),
            name: Some("Default board".to_string()),
        };
        if let Some(project) = data.project.as_mut() {
            project.boards.push(board.clone());
        }
        Ok(board)
    }

    async fn members(&self, _project_id: &str) -> DomainResult<Vec<TeamMember>> {
        let data = self.begin("members")?;
        Ok(data.members.clone())
    }
}

#[async_trait]
impl CommentGateway for FakeTracker {
    async fn list(&self, issue_id: &str) -> DomainResult<Vec<Comment>> {
        let data = self.begin("list_comments")?;
        Ok(data
            .comments
            .iter()
            .filter(|c| c.task_id == issue_id)
            .cloned()
            .collect())
    }

    async fn create(&self, issue_id: &str, content: &str) -> DomainResult<Comment> {
        let mut data = self.begin("create_comment")?;
        let id = next_id(&mut data, "c");
        let comment = Comment {
            id,
            content: content.to_string(),
            task_id: issue_id.to_string(),
            created_at: chrono::Utc::now(),
            updated_at: None,
            author_name: Some("Me Myself".to_string()),
        };
        data.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment_id: &str, content: &str) -> DomainResult<Comment> {
        let mut data = self.begin("update_comment")?;
        let comment = data
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(DomainError::NotFound)?;
        comment.content = content.to_string();
        comment.updated_at = Some(chrono::Utc::now());
        Ok(comment.clone())
    }

    async fn delete(&self, comment_id: &str) -> DomainResult<()> {
        let mut data = self.begin("delete_comment")?;
        data.comments.retain(|c| c.id != comment_id);
        Ok(())
    }
}

/// A user directory with a fixed signed-in user, or nobody.
pub struct FixedUser(pub Option<CurrentUser>);

impl FixedUser {
    pub fn me() -> Self {
        Self(Some(CurrentUser {
            id: ME.to_string(),
            first_name: "Me".to_string(),
            last_name: "Myself".to_string(),
        }))
    }

    pub fn nobody() -> Self {
        Self(None)
    }
}

#[async_trait]
impl UserDirectory for FixedUser {
    fn current_user_id(&self) -> Option<String> {
        self.0.as_ref().map(|u| u.id.clone())
    }

    async fn current_user(&self) -> DomainResult<Option<CurrentUser>> {
        Ok(self.0.clone())
    }
}

/// Notifier that keeps every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.lock().unwrap().last().cloned()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages().iter().any(|m| m == message)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// A controller wired to one fake tracker, plus handles to inspect it.
pub struct Harness {
    pub tracker: Arc<FakeTracker>,
    pub notifier: Arc<RecordingNotifier>,
    pub controller: BacklogController,
}

impl Harness {
    pub fn new(tracker: FakeTracker) -> Self {
        Self::with_user(tracker, FixedUser::me())
    }

    pub fn with_user(tracker: FakeTracker, user: FixedUser) -> Self {
        let tracker = Arc::new(tracker);
        let notifier = Arc::new(RecordingNotifier::default());
        let deps = BacklogDeps {
            issues: tracker.clone(),
            sprints: tracker.clone(),
            projects: tracker.clone(),
            comments: tracker.clone(),
            users: Arc::new(user),
            notifier: notifier.clone(),
        };
        Self {
            tracker,
            notifier,
            controller: BacklogController::new(deps),
        }
    }

    /// Build and load the project backlog.
    pub async fn loaded(tracker: FakeTracker) -> Self {
        let mut harness = Self::new(tracker);
        let outcome = harness.controller.init(Some(PROJECT_ID)).await;
        assert!(outcome.is_applied(), "init failed: {outcome:?}");
        harness
    }
}

/// Standard fixture: one sprint holding two issues, three issues in the backlog.
pub fn standard_tracker() -> FakeTracker {
    FakeTracker::new()
        .with_sprint("s1", "Sprint 1")
        .with_issue("i1", Some("s1"), 3)
        .with_issue("i2", Some("s1"), 5)
        .with_issue("i3", None, 1)
        .with_issue("i4", None, 2)
        .with_issue("i5", None, 8)
        .with_member(ME, "Me", "Myself")
        .with_member("u-2", "Grace", "Hopper")
}
