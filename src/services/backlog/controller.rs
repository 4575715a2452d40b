//! Backlog view-controller.
//!
//! Mediates user actions on one project's backlog into gateway calls and
//! reconciles the server's answers into [`BacklogViewState`]. Every remote
//! failure is recovered here: the loading flag is cleared, the user is
//! notified and any optimistic change is rolled back.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::instrument;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    sort_comments, Issue, IssuePatch, IssueStatus, Project, Sprint, SprintDraft,
};
use crate::domain::ports::{
    CommentGateway, IssueGateway, Notifier, ProjectGateway, SprintGateway, UserDirectory,
};

use super::drag_drop::DropEvent;
use super::reducer::Transition;
use super::state::BacklogViewState;

const NO_PROJECT_SELECTED: &str = "No project selected. Please select a project first.";
const NO_ISSUE_SELECTED: &str = "No issue selected";

/// Gateways and collaborators the controller is built from.
#[derive(Clone)]
pub struct BacklogDeps {
    /// Issue backend.
    pub issues: Arc<dyn IssueGateway>,
    /// Sprint backend.
    pub sprints: Arc<dyn SprintGateway>,
    /// Project and board backend.
    pub projects: Arc<dyn ProjectGateway>,
    /// Comment backend.
    pub comments: Arc<dyn CommentGateway>,
    /// Signed-in user.
    pub users: Arc<dyn UserDirectory>,
    /// User feedback sink.
    pub notifier: Arc<dyn Notifier>,
}

/// Result of a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The change was confirmed by the server (or was purely local).
    Applied,
    /// Nothing to do; no request was sent.
    Unchanged,
    /// Input was refused before any request was sent.
    Rejected(String),
    /// The server call failed and local state was restored.
    Failed(DomainError),
}

impl ActionOutcome {
    /// Whether the action took effect.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Collapse into a result, treating rejections as validation errors.
    pub fn into_result(self) -> DomainResult<()> {
        match self {
            Self::Applied | Self::Unchanged => Ok(()),
            Self::Rejected(message) => Err(DomainError::Validation(message)),
            Self::Failed(err) => Err(err),
        }
    }
}

impl From<DomainResult<()>> for ActionOutcome {
    fn from(result: DomainResult<()>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(err) => Self::Failed(err),
        }
    }
}

/// Backlog view-controller: maps user actions to gateway calls and keeps
/// the view state consistent with the server.
pub struct BacklogController {
    deps: BacklogDeps,
    state: BacklogViewState,
}

impl BacklogController {
    /// An uninitialized controller; call [`BacklogController::init`] next.
    pub fn new(deps: BacklogDeps) -> Self {
        Self {
            deps,
            state: BacklogViewState::default(),
        }
    }

    /// Current view state.
    pub fn state(&self) -> &BacklogViewState {
        &self.state
    }

    /// Direct access for pure view transitions and form input.
    pub fn state_mut(&mut self) -> &mut BacklogViewState {
        &mut self.state
    }

    fn notify(&self, message: &str) {
        self.deps.notifier.notify(message);
    }

    fn reject(&self, message: &str) -> ActionOutcome {
        self.notify(message);
        ActionOutcome::Rejected(message.to_string())
    }

    /// Record a remote failure: stop loading, keep the operation's message
    /// on screen and tell the user what the server said.
    fn handle_error(&mut self, err: &DomainError, default_message: &str) {
        tracing::error!(error = %err, "{default_message}");
        self.state.fail(default_message);
        self.notify(&format!("{default_message}: {}", err.user_message()));
    }

    // --- loading ---

    /// Open the backlog of `project_id`.
    ///
    /// Resolves the project's first board (creating a default one when the
    /// project has none), then loads sprints and issues. A board that cannot
    /// be resolved is tolerated; sprints are then empty.
    #[instrument(skip(self))]
    pub async fn init(&mut self, project_id: Option<&str>) -> ActionOutcome {
        self.state.is_loading = true;
        self.load_current_user().await;

        let Some(project_id) = project_id.map(str::trim).filter(|id| !id.is_empty()) else {
            self.state.fail(NO_PROJECT_SELECTED);
            return ActionOutcome::Rejected(NO_PROJECT_SELECTED.to_string());
        };
        self.state.project_id = project_id.to_string();

        match self.deps.projects.get(project_id).await {
            Ok(project) => {
                self.state.project_name = project.name.clone();
                self.state.board_id = self.board_for(&project).await;
                if self.state.board_id.is_none() {
                    tracing::warn!(project_id, "board id unavailable, loading without sprints");
                }
            }
            Err(err) => {
                self.handle_error(&err, "Failed to load project details");
                return ActionOutcome::Failed(err);
            }
        }

        self.reload().await
    }

    async fn load_current_user(&mut self) {
        match self.deps.users.current_user().await {
            Ok(Some(user)) => self.state.set_current_user_name(&user.display_name()),
            Ok(None) => tracing::debug!("no signed-in user"),
            Err(err) => tracing::warn!(error = %err, "failed to load current user"),
        }
    }

    async fn board_for(&self, project: &Project) -> Option<String> {
        if let Some(board) = project.boards.first() {
            tracing::debug!(board_id = %board.id, "found board");
            return Some(board.id.clone());
        }
        match self.deps.projects.create_default_board(&project.id).await {
            Ok(board) => Some(board.id),
            Err(err) => {
                tracing::warn!(project_id = %project.id, error = %err, "could not create default board");
                None
            }
        }
    }

    /// Reload sprints and issues from the server, replacing local lists.
    pub async fn reload(&mut self) -> ActionOutcome {
        self.state.is_loading = true;
        match self.fetch_lists().await {
            Ok(()) => {
                self.state.is_loading = false;
                ActionOutcome::Applied
            }
            Err((err, message)) => {
                self.handle_error(&err, message);
                ActionOutcome::Failed(err)
            }
        }
    }

    async fn fetch_lists(&mut self) -> Result<(), (DomainError, &'static str)> {
        let sprints = match self.state.board_id.clone() {
            Some(board_id) => self
                .deps
                .sprints
                .list(&board_id)
                .await
                .map_err(|err| (err, "Failed to load sprints"))?,
            None => Vec::new(),
        };
        let issues = self
            .deps
            .issues
            .list_by_project(&self.state.project_id)
            .await
            .map_err(|err| (err, "Failed to load backlog issues"))?;

        self.state.partition(sprints, issues);

        // keep the detail view pointing at the fresh copy
        if let Some(id) = self.state.selected_issue.as_ref().map(|i| i.id.clone()) {
            if let Some(fresh) = self.state.find_issue(&id).cloned() {
                self.state.editing_issue = Some(fresh.clone());
                self.state.selected_issue = Some(fresh);
            }
        }
        Ok(())
    }

    // --- drag and drop ---

    /// Handle a completed drag.
    ///
    /// A reorder within one list is local only. A move between lists is
    /// applied locally, then sent as a sprint move; if that fails the lists
    /// are reloaded from the server, falling back to undoing the local move
    /// when the reload fails too.
    #[instrument(skip(self), fields(from = %event.previous_container, to = %event.container))]
    pub async fn drop_issue(&mut self, event: &DropEvent) -> ActionOutcome {
        if event.is_reorder() {
            let reorder = Transition::Reorder {
                list: event.container.clone(),
                from: event.previous_index,
                to: event.current_index,
            };
            return match reorder.apply(&mut self.state) {
                Some(_) => ActionOutcome::Applied,
                None => ActionOutcome::Unchanged,
            };
        }

        let moved_id = self
            .state
            .list(&event.previous_container)
            .and_then(|items| items.get(event.previous_index.min(items.len().saturating_sub(1))))
            .map(|issue| issue.id.clone());
        let Some(moved_id) = moved_id else {
            return self.reject("No issue to move");
        };

        let transfer = Transition::Transfer {
            from_list: event.previous_container.clone(),
            to_list: event.container.clone(),
            from: event.previous_index,
            to: event.current_index,
        };
        let Some(inverse) = transfer.apply(&mut self.state) else {
            return self.reject("Unknown drop target");
        };

        let sprint_id = event.container.sprint_id();
        let (success, failure) = match sprint_id {
            Some(_) => ("Issue moved to sprint", "Failed to move issue"),
            None => ("Issue moved to backlog", "Failed to move issue to backlog"),
        };

        self.state.is_loading = true;
        let result = self.deps.issues.move_to_sprint(&moved_id, sprint_id).await;
        self.state.is_loading = false;

        match result {
            Ok(updated) => {
                self.state.update_issue_in_lists(&updated);
                self.notify(success);
                ActionOutcome::Applied
            }
            Err(err) => {
                self.handle_error(&err, failure);
                if let Err((reload_err, _)) = self.fetch_lists().await {
                    tracing::warn!(error = %reload_err, "reload after failed move failed, undoing locally");
                    inverse.apply(&mut self.state);
                }
                ActionOutcome::Failed(err)
            }
        }
    }

    // --- status ---

    /// Change the status of the issue open in the detail view.
    pub async fn update_issue_status(&mut self, status: IssueStatus) -> ActionOutcome {
        let Some(selected) = &self.state.selected_issue else {
            return self.reject("Cannot update: no issue selected");
        };
        if selected.status == status {
            return ActionOutcome::Unchanged;
        }
        let issue_id = selected.id.clone();
        self.apply_status(&issue_id, status, true).await
    }

    /// Change an issue's status straight from the list.
    pub async fn quick_update_status(&mut self, issue_id: &str, status: IssueStatus) -> ActionOutcome {
        let Some(issue) = self.state.find_issue(issue_id) else {
            return self.reject("Issue not found");
        };
        if issue.status == status {
            return ActionOutcome::Unchanged;
        }
        self.apply_status(issue_id, status, false).await
    }

    async fn apply_status(&mut self, issue_id: &str, status: IssueStatus, show_loading: bool) -> ActionOutcome {
        let tentative = Transition::SetStatus {
            issue_id: issue_id.to_string(),
            status,
        };
        let Some(inverse) = tentative.apply(&mut self.state) else {
            return self.reject("Issue not found");
        };
        if let Transition::SetStatus { status: previous, .. } = &inverse {
            tracing::info!(issue_id, from = %previous, to = %status, "updating status");
        }

        if show_loading {
            self.state.is_loading = true;
        }
        let result = self.deps.issues.update_status(issue_id, status).await;
        self.state.is_loading = false;

        match result {
            Ok(updated) => {
                self.state.update_issue_in_lists(&updated);
                self.notify(&format!("Status updated to: {status}"));
                ActionOutcome::Applied
            }
            Err(err) => {
                inverse.apply(&mut self.state);
                self.handle_error(&err, "Failed to update status");
                ActionOutcome::Failed(err)
            }
        }
    }

    // --- issue detail ---

    /// Select an issue and load its comments.
    pub async fn open_issue_detail(&mut self, issue_id: &str) -> ActionOutcome {
        let issue = match self.state.find_issue(issue_id).cloned() {
            Some(issue) => issue,
            None => match self.deps.issues.get(issue_id).await {
                Ok(issue) => issue,
                Err(err) => {
                    self.handle_error(&err, "Failed to load issue details");
                    return ActionOutcome::Failed(err);
                }
            },
        };
        self.state.editing_issue = Some(issue.clone());
        self.state.selected_issue = Some(issue);
        self.load_comments().await;
        ActionOutcome::Applied
    }

    /// Close the detail view and drop its comments.
    pub fn close_issue_detail(&mut self) {
        self.state.selected_issue = None;
        self.state.editing_issue = None;
        self.state.is_editing_title = false;
        self.state.is_editing_description = false;
        self.state.comments = Default::default();
    }

    /// Working copy of the selected issue, for form edits.
    pub fn editing_issue_mut(&mut self) -> Option<&mut Issue> {
        self.state.editing_issue.as_mut()
    }

    async fn send_update(
        &mut self,
        issue_id: &str,
        patch: &IssuePatch,
        success: &str,
        failure: &str,
    ) -> DomainResult<()> {
        self.state.is_loading = true;
        let result = self.deps.issues.update(issue_id, patch).await;
        self.state.is_loading = false;
        match result {
            Ok(updated) => {
                self.state.update_issue_in_lists(&updated);
                self.notify(success);
                Ok(())
            }
            Err(err) => {
                self.handle_error(&err, failure);
                Err(err)
            }
        }
    }

    /// Save the edited title. Blank titles are rejected.
    pub async fn save_title(&mut self) -> ActionOutcome {
        let (Some(selected), Some(editing)) = (&self.state.selected_issue, &self.state.editing_issue) else {
            return self.reject(NO_ISSUE_SELECTED);
        };
        let title = editing.title.trim().to_string();
        if title.is_empty() {
            return self.reject("Please enter a title for the issue");
        }
        let issue_id = selected.id.clone();
        let patch = IssuePatch {
            title: Some(title),
            ..Default::default()
        };

        let result = self
            .send_update(&issue_id, &patch, "Title updated successfully", "Failed to update title")
            .await;
        if result.is_err() {
            self.state.cancel_editing_title();
        }
        self.state.is_editing_title = false;
        result.into()
    }

    /// Save the edited description.
    pub async fn save_description(&mut self) -> ActionOutcome {
        let (Some(selected), Some(editing)) = (&self.state.selected_issue, &self.state.editing_issue) else {
            return self.reject(NO_ISSUE_SELECTED);
        };
        let issue_id = selected.id.clone();
        let patch = IssuePatch {
            description: Some(editing.description.clone()),
            ..Default::default()
        };

        let result = self
            .send_update(
                &issue_id,
                &patch,
                "Description updated successfully",
                "Failed to update description",
            )
            .await;
        if result.is_err() {
            self.state.cancel_editing_description();
        }
        self.state.is_editing_description = false;
        result.into()
    }

    /// Send every field of the working copy that differs from the selection.
    pub async fn save_issue_changes(&mut self) -> ActionOutcome {
        let (Some(selected), Some(editing)) = (&self.state.selected_issue, &self.state.editing_issue) else {
            return self.reject("No issue selected or no changes to save");
        };
        let patch = IssuePatch::diff(selected, editing);
        if patch.is_empty() {
            self.notify("No changes to save");
            return ActionOutcome::Unchanged;
        }
        let issue_id = selected.id.clone();
        tracing::debug!(issue_id = %issue_id, ?patch, "saving issue changes");

        let result = self
            .send_update(&issue_id, &patch, "Issue updated successfully", "Failed to update issue")
            .await;
        if result.is_err() {
            self.state.editing_issue = self.state.selected_issue.clone();
        }
        result.into()
    }

    // --- create / delete ---

    /// Create an issue from the new-issue form.
    ///
    /// When the form names a sprint the new issue is moved into it; it lands
    /// in the backlog if that move fails.
    #[instrument(skip(self), fields(title = %self.state.new_issue.title))]
    pub async fn create_issue(&mut self) -> ActionOutcome {
        if self.state.new_issue.title.trim().is_empty() {
            return self.reject("Please enter a title for the issue");
        }
        let draft = self.state.new_issue.clone();

        self.state.is_loading = true;
        let created = self.deps.issues.create(&self.state.project_id, &draft).await;
        let mut created = match created {
            Ok(issue) => issue,
            Err(err) => {
                self.handle_error(&err, "Failed to create issue");
                return ActionOutcome::Failed(err);
            }
        };

        let target_sprint = draft
            .sprint_id
            .filter(|id| self.state.sprints.iter().any(|s| &s.id == id));
        if let Some(sprint_id) = target_sprint {
            if created.sprint_id.as_deref() != Some(sprint_id.as_str()) {
                match self.deps.issues.move_to_sprint(&created.id, Some(sprint_id.as_str())).await {
                    Ok(moved) => created = moved,
                    Err(err) => {
                        tracing::warn!(issue_id = %created.id, error = %err, "created issue left in backlog");
                        self.notify("Issue created but could not be added to the sprint");
                    }
                }
            }
        }

        self.state.is_loading = false;
        self.state.insert_issue(created);
        self.state.reset_issue_form();
        self.notify("Issue created successfully");
        ActionOutcome::Applied
    }

    /// Delete the selected issue and close the detail view.
    pub async fn delete_issue(&mut self) -> ActionOutcome {
        let Some(issue_id) = self.state.selected_issue.as_ref().map(|i| i.id.clone()) else {
            return self.reject(NO_ISSUE_SELECTED);
        };

        self.state.is_loading = true;
        let result = self.deps.issues.delete(&issue_id).await;
        self.state.is_loading = false;
        match result {
            Ok(()) => {
                self.state.remove_issue_from_lists(&issue_id);
                self.close_issue_detail();
                self.notify("Issue deleted successfully");
                ActionOutcome::Applied
            }
            Err(err) => {
                self.handle_error(&err, "Failed to delete issue");
                ActionOutcome::Failed(err)
            }
        }
    }

    // --- assignment ---

    async fn send_assign(&mut self, issue_id: &str, user_id: &str, success: &str, failure: &str) -> ActionOutcome {
        self.state.is_loading = true;
        let result = self.deps.issues.assign(issue_id, user_id).await;
        self.state.is_loading = false;
        match result {
            Ok(updated) => {
                self.state.update_issue_in_lists(&updated);
                self.notify(success);
                ActionOutcome::Applied
            }
            Err(err) => {
                self.handle_error(&err, failure);
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Assign `issue_id` to `user_id`. A blank user id does nothing.
    pub async fn assign_to_user(&mut self, issue_id: &str, user_id: &str) -> ActionOutcome {
        if user_id.trim().is_empty() {
            return ActionOutcome::Unchanged;
        }
        if self.state.find_issue(issue_id).is_none() {
            return self.reject("Issue not found");
        }
        self.send_assign(issue_id, user_id, "Issue assigned successfully", "Failed to assign issue")
            .await
    }

    /// Assign the selected issue to the signed-in user.
    ///
    /// The user must be on the project team. If membership cannot be checked
    /// the assignment goes ahead.
    pub async fn assign_to_me(&mut self) -> ActionOutcome {
        let Some(issue_id) = self.state.selected_issue.as_ref().map(|i| i.id.clone()) else {
            return self.reject(NO_ISSUE_SELECTED);
        };
        let Some(user_id) = self.deps.users.current_user_id() else {
            return self.reject("Cannot identify current user");
        };

        match self.deps.projects.members(&self.state.project_id).await {
            Ok(members) if !members.iter().any(|m| m.id == user_id) => {
                return self.reject("You are not a member of this project team");
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "team membership unverifiable, assigning anyway");
            }
        }

        self.send_assign(&issue_id, &user_id, "Issue assigned to you", "Failed to assign issue")
            .await
    }

    /// Remove the assignee of the selected issue.
    pub async fn unassign_issue(&mut self) -> ActionOutcome {
        let Some(issue_id) = self.state.selected_issue.as_ref().map(|i| i.id.clone()) else {
            return self.reject(NO_ISSUE_SELECTED);
        };
        self.send_assign(&issue_id, "", "Issue unassigned", "Failed to unassign issue")
            .await
    }

    /// Assign the selected issue to a random teammate other than the
    /// signed-in user, or to the signed-in user when nobody else is on the team.
    pub async fn assign_automatic(&mut self) -> ActionOutcome {
        let Some(issue_id) = self.state.selected_issue.as_ref().map(|i| i.id.clone()) else {
            return self.reject(NO_ISSUE_SELECTED);
        };

        let members = match self.deps.projects.members(&self.state.project_id).await {
            Ok(members) => members,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch team members");
                self.notify("Failed to fetch team members for auto-assignment");
                return ActionOutcome::Failed(err);
            }
        };

        let me = self.deps.users.current_user_id();
        let eligible: Vec<_> = members
            .into_iter()
            .filter(|m| Some(&m.id) != me.as_ref())
            .collect();
        let pick = eligible.choose(&mut rand::thread_rng()).cloned();
        let Some(pick) = pick else {
            return self.assign_to_me().await;
        };

        tracing::info!(issue_id = %issue_id, user_id = %pick.id, "auto-assigning issue");
        let success = format!("Issue automatically assigned to {}", pick.full_name());
        self.send_assign(&issue_id, &pick.id, &success, "Failed to auto-assign issue")
            .await
    }

    // --- sprints ---

    fn validate_sprint_form(&self) -> Option<ActionOutcome> {
        let draft = &self.state.new_sprint;
        if draft.name.trim().is_empty() {
            return Some(self.reject("Sprint name is required"));
        }
        if draft.start_date.is_none() || draft.end_date.is_none() {
            return Some(self.reject("Sprint dates are required"));
        }
        None
    }

    /// Create a sprint from the sprint form, or save it when the form is
    /// editing an existing sprint.
    #[instrument(skip(self), fields(name = %self.state.new_sprint.name))]
    pub async fn create_sprint(&mut self) -> ActionOutcome {
        if let Some(rejected) = self.validate_sprint_form() {
            return rejected;
        }
        if self.state.editing_sprint_id.is_some() {
            return self.update_sprint().await;
        }

        self.state.is_creating_sprint = true;

        let board_id = match self.state.board_id.clone() {
            Some(board_id) => board_id,
            None => {
                tracing::debug!("board id not set, loading from project first");
                match self.deps.projects.get(&self.state.project_id).await {
                    Ok(project) => match self.board_for(&project).await {
                        Some(board_id) => {
                            self.state.board_id = Some(board_id.clone());
                            board_id
                        }
                        None => {
                            self.state.is_creating_sprint = false;
                            return self.reject("Could not find board for this project");
                        }
                    },
                    Err(err) => {
                        self.state.is_creating_sprint = false;
                        tracing::error!(error = %err, "error loading board id");
                        self.notify("Error loading board information");
                        return ActionOutcome::Failed(err);
                    }
                }
            }
        };

        let mut draft = self.state.new_sprint.clone();
        draft.name = draft.name.trim().to_string();

        match self.deps.sprints.create(&board_id, &draft).await {
            Ok(mut sprint) => {
                sprint.issues.clear();
                sprint.recompute_totals();
                self.state.sprints.push(sprint);
                self.state.finish_sprint_form();
                self.notify("Sprint created successfully");
                ActionOutcome::Applied
            }
            Err(err) => {
                self.state.is_creating_sprint = false;
                tracing::error!(error = %err, "error creating sprint");
                self.notify(&err.user_message());
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Load a sprint into the form for editing.
    pub fn edit_sprint(&mut self, sprint_id: &str) -> ActionOutcome {
        let Some(sprint) = self.state.sprints.iter().find(|s| s.id == sprint_id) else {
            return self.reject("Sprint not found");
        };
        self.state.new_sprint = SprintDraft::from_sprint(sprint);
        self.state.editing_sprint_id = Some(sprint.id.clone());
        ActionOutcome::Applied
    }

    /// Leave sprint edit mode without saving.
    pub fn cancel_sprint_edit(&mut self) {
        self.state.finish_sprint_form();
    }

    /// Save the sprint form over the sprint being edited.
    pub async fn update_sprint(&mut self) -> ActionOutcome {
        if let Some(rejected) = self.validate_sprint_form() {
            return rejected;
        }
        let Some(sprint_id) = self.state.editing_sprint_id.clone() else {
            return self.reject("No sprint selected for editing");
        };

        self.state.is_creating_sprint = true;
        let draft = self.state.new_sprint.clone();
        match self.deps.sprints.update(&sprint_id, &draft).await {
            Ok(sprint) => {
                self.state.replace_sprint(sprint);
                self.state.finish_sprint_form();
                self.notify("Sprint updated successfully");
                ActionOutcome::Applied
            }
            Err(err) => {
                self.state.is_creating_sprint = false;
                tracing::error!(sprint_id = %sprint_id, error = %err, "error updating sprint");
                self.notify(&err.user_message());
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Mark a sprint active.
    pub async fn start_sprint(&mut self, sprint_id: &str) -> ActionOutcome {
        self.state.is_loading = true;
        let result = self.deps.sprints.start(sprint_id).await;
        self.finish_sprint_lifecycle(result, "Sprint started", "Failed to start sprint")
    }

    /// Mark a sprint completed.
    pub async fn complete_sprint(&mut self, sprint_id: &str) -> ActionOutcome {
        self.state.is_loading = true;
        let result = self.deps.sprints.complete(sprint_id).await;
        self.finish_sprint_lifecycle(result, "Sprint completed", "Failed to complete sprint")
    }

    fn finish_sprint_lifecycle(
        &mut self,
        result: DomainResult<Sprint>,
        success: &str,
        failure: &str,
    ) -> ActionOutcome {
        match result {
            Ok(sprint) => {
                self.state.is_loading = false;
                self.state.replace_sprint(sprint);
                self.notify(success);
                ActionOutcome::Applied
            }
            Err(err) => {
                self.handle_error(&err, failure);
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Delete a sprint. Its issues return to the backlog on the server, so
    /// the lists are reloaded afterwards.
    pub async fn delete_sprint(&mut self, sprint_id: &str) -> ActionOutcome {
        self.state.is_loading = true;
        match self.deps.sprints.delete(sprint_id).await {
            Ok(()) => {
                self.state.collapsed_sprints.remove(sprint_id);
                self.notify("Sprint deleted");
                self.reload().await
            }
            Err(err) => {
                self.handle_error(&err, "Failed to delete sprint");
                ActionOutcome::Failed(err)
            }
        }
    }

    // --- comments ---

    /// Load comments of the selected issue in the current sort order.
    pub async fn load_comments(&mut self) -> ActionOutcome {
        let Some(issue_id) = self.state.selected_issue.as_ref().map(|i| i.id.clone()) else {
            return ActionOutcome::Unchanged;
        };

        self.state.comments.is_loading = true;
        let result = self.deps.comments.list(&issue_id).await;
        self.state.comments.is_loading = false;
        match result {
            Ok(mut comments) => {
                sort_comments(&mut comments, self.state.comments.sort_order);
                self.state.comments.items = comments;
                ActionOutcome::Applied
            }
            Err(err) => {
                tracing::error!(issue_id = %issue_id, error = %err, "error loading comments");
                self.notify("Failed to load comments");
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Post the new-comment draft on the selected issue.
    pub async fn add_comment(&mut self) -> ActionOutcome {
        let Some(issue_id) = self.state.selected_issue.as_ref().map(|i| i.id.clone()) else {
            return self.reject(NO_ISSUE_SELECTED);
        };
        let content = self.state.comments.new_content.trim().to_string();
        if content.is_empty() {
            return ActionOutcome::Rejected("Comment cannot be empty".to_string());
        }

        self.state.comments.is_loading = true;
        let result = self.deps.comments.create(&issue_id, &content).await;
        self.state.comments.is_loading = false;
        match result {
            Ok(comment) => {
                self.state.comments.items.insert(0, comment);
                sort_comments(&mut self.state.comments.items, self.state.comments.sort_order);
                self.state.comments.new_content.clear();
                self.notify("Comment added");
                ActionOutcome::Applied
            }
            Err(err) => {
                tracing::error!(error = %err, "error adding comment");
                self.notify("Failed to add comment");
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Load a comment into the edit draft.
    pub fn start_editing_comment(&mut self, comment_id: &str) -> ActionOutcome {
        if self.state.start_editing_comment(comment_id) {
            ActionOutcome::Applied
        } else {
            self.reject("Comment not found")
        }
    }

    /// Discard the comment edit draft.
    pub fn cancel_editing_comment(&mut self) {
        self.state.cancel_editing_comment();
    }

    /// Save the comment edit draft over `comment_id`.
    pub async fn save_comment(&mut self, comment_id: &str) -> ActionOutcome {
        let content = self.state.comments.editing_content.trim().to_string();
        if content.is_empty() {
            return ActionOutcome::Rejected("Comment cannot be empty".to_string());
        }

        self.state.comments.is_loading = true;
        let result = self.deps.comments.update(comment_id, &content).await;
        self.state.comments.is_loading = false;
        match result {
            Ok(comment) => {
                if let Some(slot) = self.state.comments.items.iter_mut().find(|c| c.id == comment_id) {
                    *slot = comment;
                }
                self.state.cancel_editing_comment();
                self.notify("Comment updated");
                ActionOutcome::Applied
            }
            Err(err) => {
                tracing::error!(comment_id, error = %err, "error updating comment");
                self.notify("Failed to update comment");
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Delete a comment of the selected issue.
    pub async fn delete_comment(&mut self, comment_id: &str) -> ActionOutcome {
        self.state.comments.is_loading = true;
        let result = self.deps.comments.delete(comment_id).await;
        self.state.comments.is_loading = false;
        match result {
            Ok(()) => {
                self.state.comments.items.retain(|c| c.id != comment_id);
                self.notify("Comment deleted");
                ActionOutcome::Applied
            }
            Err(err) => {
                tracing::error!(comment_id, error = %err, "error deleting comment");
                self.notify("Failed to delete comment");
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Flip between newest-first and oldest-first.
    pub fn toggle_comment_sort_order(&mut self) {
        let comments = &mut self.state.comments;
        comments.sort_order = comments.sort_order.toggled();
        sort_comments(&mut comments.items, comments.sort_order);
    }
}
