//! Serializable view state of the backlog.
//!
//! Everything the backlog screen shows lives here. The controller mutates it
//! through named methods; nothing else holds a reference into it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::models::{
    initials, total_points, Comment, CommentSortOrder, Issue, NewIssue, Sprint, SprintDraft,
};

use super::drag_drop::DropListId;
use super::filter::{sort_issues, IssueFilters, SortKey, SortOrder};

/// Layout of the issue lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One row per issue.
    #[default]
    List,
    /// Columns by status.
    Board,
}

/// Comment panel of the issue detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsState {
    /// Comments of the selected issue.
    pub items: Vec<Comment>,
    /// Draft of a new comment.
    pub new_content: String,
    /// Comment being edited.
    pub editing_id: Option<String>,
    /// Draft text of the edited comment.
    pub editing_content: String,
    /// Set while comments load.
    pub is_loading: bool,
    /// Display order.
    pub sort_order: CommentSortOrder,
}

/// Everything the backlog view shows and edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogViewState {
    /// Open project.
    pub project_id: String,
    /// Name of the open project.
    pub project_name: String,
    /// Board the sprints belong to.
    pub board_id: Option<String>,

    /// Sprints with their issues.
    pub sprints: Vec<Sprint>,
    /// Unsprinted issues.
    pub backlog_issues: Vec<Issue>,

    /// Set while a remote call is pending.
    pub is_loading: bool,
    /// Last user-facing error.
    pub error_message: Option<String>,
    /// List or board layout.
    pub view_mode: ViewMode,

    /// Active filters.
    pub filters: IssueFilters,
    /// Sort field.
    pub sort_by: SortKey,
    /// Sort direction.
    pub sort_order: SortOrder,

    /// Create form for issues.
    pub new_issue: NewIssue,
    /// Create/edit form for sprints.
    pub new_sprint: SprintDraft,
    /// Set while the sprint form edits an existing sprint.
    pub editing_sprint_id: Option<String>,
    /// Whether the sprint form is open.
    pub is_creating_sprint: bool,

    /// Issue open in the detail view.
    pub selected_issue: Option<Issue>,
    /// Working copy of the selected issue for the detail form.
    pub editing_issue: Option<Issue>,
    /// Title is in edit mode.
    pub is_editing_title: bool,
    /// Description is in edit mode.
    pub is_editing_description: bool,

    /// Ids of collapsed sprints.
    pub collapsed_sprints: BTreeSet<String>,
    /// Whether the backlog list is collapsed.
    pub backlog_collapsed: bool,
    /// Issue whose status dropdown is open.
    pub open_status_dropdown: Option<String>,
    /// Whether the assignee dropdown is open.
    pub show_assignee_dropdown: bool,

    /// Display name of the signed-in user.
    pub current_user_name: String,
    /// Initials of the signed-in user.
    pub current_user_initials: String,

    /// Comment panel.
    pub comments: CommentsState,
}

impl Default for BacklogViewState {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            project_name: "My Project".to_string(),
            board_id: None,
            sprints: Vec::new(),
            backlog_issues: Vec::new(),
            is_loading: true,
            error_message: None,
            view_mode: ViewMode::default(),
            filters: IssueFilters::default(),
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
            new_issue: NewIssue::default(),
            new_sprint: SprintDraft::default(),
            editing_sprint_id: None,
            is_creating_sprint: false,
            selected_issue: None,
            editing_issue: None,
            is_editing_title: false,
            is_editing_description: false,
            collapsed_sprints: BTreeSet::new(),
            backlog_collapsed: false,
            open_status_dropdown: None,
            show_assignee_dropdown: false,
            current_user_name: String::new(),
            current_user_initials: String::new(),
            comments: CommentsState::default(),
        }
    }
}

impl BacklogViewState {
    // --- lists ---

    /// Replace sprints and backlog from a flat issue list.
    ///
    /// Issues whose `sprint_id` names a known sprint go to that sprint, the
    /// rest to the backlog. Sprint aggregates are recomputed.
    pub fn partition(&mut self, mut sprints: Vec<Sprint>, issues: Vec<Issue>) {
        for sprint in &mut sprints {
            sprint.issues.clear();
        }
        let mut backlog = Vec::new();
        for issue in issues {
            let owner = issue
                .sprint_id
                .as_deref()
                .and_then(|id| sprints.iter_mut().find(|s| s.id == id));
            match owner {
                Some(sprint) => sprint.issues.push(issue),
                None => backlog.push(issue),
            }
        }
        self.sprints = sprints;
        self.backlog_issues = backlog;
        self.recompute_totals();
    }

    /// Recompute every sprint's point aggregates.
    pub fn recompute_totals(&mut self) {
        for sprint in &mut self.sprints {
            sprint.recompute_totals();
        }
    }

    /// Issues of a drop list.
    pub fn list(&self, id: &DropListId) -> Option<&Vec<Issue>> {
        match id {
            DropListId::Backlog => Some(&self.backlog_issues),
            DropListId::Sprint(sprint_id) => self
                .sprints
                .iter()
                .find(|s| &s.id == sprint_id)
                .map(|s| &s.issues),
        }
    }

    /// Mutable issues of a drop list.
    pub fn list_mut(&mut self, id: &DropListId) -> Option<&mut Vec<Issue>> {
        match id {
            DropListId::Backlog => Some(&mut self.backlog_issues),
            DropListId::Sprint(sprint_id) => self
                .sprints
                .iter_mut()
                .find(|s| &s.id == sprint_id)
                .map(|s| &mut s.issues),
        }
    }

    /// Mutable access to two distinct lists at once.
    pub fn list_pair_mut(
        &mut self,
        a: &DropListId,
        b: &DropListId,
    ) -> Option<(&mut Vec<Issue>, &mut Vec<Issue>)> {
        if a == b {
            return None;
        }
        let sprint_index = |id: &str, sprints: &[Sprint]| sprints.iter().position(|s| s.id == id);
        match (a, b) {
            (DropListId::Backlog, DropListId::Sprint(id)) => {
                let i = sprint_index(id, &self.sprints)?;
                Some((&mut self.backlog_issues, &mut self.sprints[i].issues))
            }
            (DropListId::Sprint(id), DropListId::Backlog) => {
                let i = sprint_index(id, &self.sprints)?;
                Some((&mut self.sprints[i].issues, &mut self.backlog_issues))
            }
            (DropListId::Sprint(x), DropListId::Sprint(y)) => {
                let i = sprint_index(x, &self.sprints)?;
                let j = sprint_index(y, &self.sprints)?;
                if i == j {
                    None
                } else if i < j {
                    let (left, right) = self.sprints.split_at_mut(j);
                    Some((&mut left[i].issues, &mut right[0].issues))
                } else {
                    let (left, right) = self.sprints.split_at_mut(i);
                    Some((&mut right[0].issues, &mut left[j].issues))
                }
            }
            (DropListId::Backlog, DropListId::Backlog) => None,
        }
    }

    /// An issue in any list.
    pub fn find_issue(&self, issue_id: &str) -> Option<&Issue> {
        self.backlog_issues
            .iter()
            .chain(self.sprints.iter().flat_map(|s| s.issues.iter()))
            .find(|i| i.id == issue_id)
    }

    /// Mutable issue in any list.
    pub fn find_issue_mut(&mut self, issue_id: &str) -> Option<&mut Issue> {
        self.backlog_issues
            .iter_mut()
            .chain(self.sprints.iter_mut().flat_map(|s| s.issues.iter_mut()))
            .find(|i| i.id == issue_id)
    }

    /// Issues across the backlog and all sprints.
    pub fn total_issue_count(&self) -> usize {
        self.backlog_issues.len() + self.sprints.iter().map(|s| s.issues.len()).sum::<usize>()
    }

    /// Splice the server's copy of an issue into every place it appears.
    pub fn update_issue_in_lists(&mut self, updated: &Issue) {
        if let Some(slot) = self.backlog_issues.iter_mut().find(|i| i.id == updated.id) {
            *slot = updated.clone();
        }
        for sprint in &mut self.sprints {
            if let Some(slot) = sprint.issues.iter_mut().find(|i| i.id == updated.id) {
                *slot = updated.clone();
                break;
            }
        }
        if self.selected_issue.as_ref().is_some_and(|i| i.id == updated.id) {
            self.selected_issue = Some(updated.clone());
            self.editing_issue = Some(updated.clone());
        }
        self.recompute_totals();
    }

    /// Drop an issue from every list.
    pub fn remove_issue_from_lists(&mut self, issue_id: &str) {
        self.backlog_issues.retain(|i| i.id != issue_id);
        for sprint in &mut self.sprints {
            sprint.issues.retain(|i| i.id != issue_id);
        }
        self.recompute_totals();
    }

    /// Insert a newly created issue into its sprint, or the backlog.
    pub fn insert_issue(&mut self, issue: Issue) {
        let target = issue
            .sprint_id
            .as_deref()
            .and_then(|id| self.sprints.iter_mut().find(|s| s.id == id));
        match target {
            Some(sprint) => sprint.issues.push(issue),
            None => self.backlog_issues.push(issue),
        }
        self.recompute_totals();
    }

    /// Replace a sprint's metadata, keeping its issues.
    pub fn replace_sprint(&mut self, mut updated: Sprint) {
        if let Some(slot) = self.sprints.iter_mut().find(|s| s.id == updated.id) {
            updated.issues = std::mem::take(&mut slot.issues);
            updated.recompute_totals();
            *slot = updated;
        }
    }

    // --- view helpers ---

    /// Ids of every drop list: the backlog first, then each sprint.
    pub fn connected_drop_lists(&self) -> Vec<DropListId> {
        std::iter::once(DropListId::Backlog)
            .chain(self.sprints.iter().map(|s| DropListId::sprint(&s.id)))
            .collect()
    }

    /// Lists an issue in `sprint_id` may be dropped into.
    pub fn sprint_drop_targets(&self, sprint_id: &str) -> Vec<DropListId> {
        std::iter::once(DropListId::Backlog)
            .chain(
                self.sprints
                    .iter()
                    .filter(|s| s.id != sprint_id)
                    .map(|s| DropListId::sprint(&s.id)),
            )
            .collect()
    }

    /// Story points of the backlog.
    pub fn backlog_total_points(&self) -> u32 {
        total_points(&self.backlog_issues)
    }

    /// Story points of done backlog issues.
    pub fn backlog_completed_points(&self) -> u32 {
        total_points(self.backlog_issues.iter().filter(|i| i.status.is_done()))
    }

    /// Done backlog issues.
    pub fn backlog_done_count(&self) -> usize {
        self.backlog_issues.iter().filter(|i| i.status.is_done()).count()
    }

    /// Backlog issues not done.
    pub fn backlog_todo_count(&self) -> usize {
        self.backlog_issues.len() - self.backlog_done_count()
    }

    /// Filtered and sorted copy of a list.
    pub fn visible_issues(&self, issues: &[Issue]) -> Vec<Issue> {
        let mut visible = self.filters.apply(issues);
        sort_issues(&mut visible, self.sort_by, self.sort_order);
        visible
    }

    /// Collapse or expand a sprint.
    pub fn toggle_sprint_collapse(&mut self, sprint_id: &str) {
        if !self.collapsed_sprints.remove(sprint_id) {
            self.collapsed_sprints.insert(sprint_id.to_string());
        }
    }

    /// Whether a sprint is collapsed.
    pub fn is_sprint_collapsed(&self, sprint_id: &str) -> bool {
        self.collapsed_sprints.contains(sprint_id)
    }

    /// Collapse or expand the backlog.
    pub fn toggle_backlog_collapse(&mut self) {
        self.backlog_collapsed = !self.backlog_collapsed;
    }

    /// Open the status dropdown of an issue, or close it if open.
    pub fn toggle_status_dropdown(&mut self, issue_id: &str) {
        if self.open_status_dropdown.as_deref() == Some(issue_id) {
            self.open_status_dropdown = None;
        } else {
            self.open_status_dropdown = Some(issue_id.to_string());
        }
    }

    /// Whether the status dropdown of an issue is open.
    pub fn is_status_dropdown_open(&self, issue_id: &str) -> bool {
        self.open_status_dropdown.as_deref() == Some(issue_id)
    }

    /// Opening the assignee dropdown closes any status dropdown.
    pub fn toggle_assignee_dropdown(&mut self) {
        self.show_assignee_dropdown = !self.show_assignee_dropdown;
        self.open_status_dropdown = None;
    }

    /// Close every dropdown.
    pub fn close_all_dropdowns(&mut self) {
        self.open_status_dropdown = None;
        self.show_assignee_dropdown = false;
    }

    /// Switch between list and board layout.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Set the sort field and direction.
    pub fn set_sort(&mut self, by: SortKey, order: SortOrder) {
        self.sort_by = by;
        self.sort_order = order;
    }

    // --- forms ---

    /// Store the user's name and derive initials.
    pub fn set_current_user_name(&mut self, name: &str) {
        self.current_user_name = name.to_string();
        self.current_user_initials = initials(name);
    }

    /// Clear the issue form.
    pub fn reset_issue_form(&mut self) {
        self.new_issue = NewIssue::default();
    }

    /// Clear the sprint form.
    pub fn reset_sprint_form(&mut self) {
        self.new_sprint = SprintDraft::default();
    }

    /// Leave sprint edit mode and clear the form.
    pub fn finish_sprint_form(&mut self) {
        self.is_creating_sprint = false;
        self.editing_sprint_id = None;
        self.reset_sprint_form();
    }

    /// Enter title edit mode.
    pub fn start_editing_title(&mut self) {
        self.is_editing_title = true;
    }

    /// Leave title edit mode, restoring the saved title.
    pub fn cancel_editing_title(&mut self) {
        self.is_editing_title = false;
        if let (Some(selected), Some(editing)) = (&self.selected_issue, &mut self.editing_issue) {
            editing.title = selected.title.clone();
        }
    }

    /// Enter description edit mode.
    pub fn start_editing_description(&mut self) {
        self.is_editing_description = true;
    }

    /// Leave description edit mode, restoring the saved description.
    pub fn cancel_editing_description(&mut self) {
        self.is_editing_description = false;
        if let (Some(selected), Some(editing)) = (&self.selected_issue, &mut self.editing_issue) {
            editing.description = selected.description.clone();
        }
    }

    /// Load a comment into the edit draft. `false` when unknown.
    pub fn start_editing_comment(&mut self, comment_id: &str) -> bool {
        let Some(comment) = self.comments.items.iter().find(|c| c.id == comment_id) else {
            return false;
        };
        self.comments.editing_content = comment.content.clone();
        self.comments.editing_id = Some(comment.id.clone());
        true
    }

    /// Leave comment edit mode.
    pub fn cancel_editing_comment(&mut self) {
        self.comments.editing_id = None;
        self.comments.editing_content.clear();
    }

    /// Record an error and stop loading.
    pub fn fail(&mut self, message: &str) {
        self.is_loading = false;
        self.error_message = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::IssueStatus;

    fn issue(id: &str, sprint: Option<&str>, points: u32, status: IssueStatus) -> Issue {
        let mut issue = Issue::new(id, id);
        issue.sprint_id = sprint.map(str::to_string);
        issue.story_points = Some(points);
        issue.status = status;
        issue
    }

    fn loaded() -> BacklogViewState {
        let mut state = BacklogViewState::default();
        state.partition(
            vec![Sprint::new("s1", "Sprint 1"), Sprint::new("s2", "Sprint 2")],
            vec![
                issue("a", Some("s1"), 3, IssueStatus::Done),
                issue("b", Some("s1"), 2, IssueStatus::ToDo),
                issue("c", None, 5, IssueStatus::Done),
                issue("d", Some("gone"), 1, IssueStatus::ToDo),
            ],
        );
        state
    }

    #[test]
    fn test_partition_by_sprint() {
        let state = loaded();
        assert_eq!(state.sprints[0].issues.len(), 2);
        assert_eq!(state.sprints[0].total_story_points, 5);
        assert_eq!(state.sprints[0].completed_story_points, 3);
        assert!(state.sprints[1].issues.is_empty());
        let backlog: Vec<_> = state.backlog_issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(backlog, ["c", "d"]);
        assert_eq!(state.total_issue_count(), 4);
    }

    #[test]
    fn test_backlog_aggregates() {
        let state = loaded();
        assert_eq!(state.backlog_total_points(), 6);
        assert_eq!(state.backlog_completed_points(), 5);
        assert_eq!(state.backlog_done_count(), 1);
        assert_eq!(state.backlog_todo_count(), 1);
    }

    #[test]
    fn test_partition_with_oversized_points_does_not_overflow() {
        let mut state = BacklogViewState::default();
        state.partition(
            vec![Sprint::new("s1", "Sprint 1")],
            vec![
                issue("a", Some("s1"), 3_000_000_000, IssueStatus::Done),
                issue("b", Some("s1"), 3_000_000_000, IssueStatus::ToDo),
                issue("c", None, u32::MAX, IssueStatus::Done),
                issue("d", None, 1, IssueStatus::Done),
            ],
        );
        assert_eq!(state.sprints[0].total_story_points, u32::MAX);
        assert_eq!(state.sprints[0].completed_story_points, 3_000_000_000);
        assert_eq!(state.backlog_total_points(), u32::MAX);
        assert_eq!(state.backlog_completed_points(), u32::MAX);
    }

    #[test]
    fn test_drop_lists() {
        let state = loaded();
        let ids: Vec<String> = state.connected_drop_lists().iter().map(ToString::to_string).collect();
        assert_eq!(ids, ["backlog", "sprint-s1", "sprint-s2"]);
        let targets: Vec<String> = state.sprint_drop_targets("s1").iter().map(ToString::to_string).collect();
        assert_eq!(targets, ["backlog", "sprint-s2"]);
    }

    #[test]
    fn test_update_issue_in_lists_touches_selection() {
        let mut state = loaded();
        state.selected_issue = state.find_issue("b").cloned();
        let mut updated = issue("b", Some("s1"), 2, IssueStatus::Done);
        updated.title = "renamed".into();

        state.update_issue_in_lists(&updated);

        assert_eq!(state.find_issue("b").map(|i| i.title.as_str()), Some("renamed"));
        assert_eq!(state.selected_issue.as_ref().map(|i| i.status), Some(IssueStatus::Done));
        assert_eq!(state.editing_issue.as_ref().map(|i| i.title.as_str()), Some("renamed"));
        assert_eq!(state.sprints[0].completed_story_points, 5);
    }

    #[test]
    fn test_remove_and_insert() {
        let mut state = loaded();
        state.remove_issue_from_lists("a");
        assert!(state.find_issue("a").is_none());
        assert_eq!(state.sprints[0].total_story_points, 2);

        state.insert_issue(issue("e", Some("s2"), 8, IssueStatus::ToDo));
        state.insert_issue(issue("f", Some("nope"), 1, IssueStatus::ToDo));
        assert_eq!(state.sprints[1].total_story_points, 8);
        assert_eq!(state.backlog_issues.last().map(|i| i.id.as_str()), Some("f"));
    }

    #[test]
    fn test_list_pair_mut_distinct_sprints() {
        let mut state = loaded();
        let (from, to) = state
            .list_pair_mut(&DropListId::sprint("s1"), &DropListId::sprint("s2"))
            .unwrap();
        to.push(from.remove(0));
        assert_eq!(state.sprints[1].issues.len(), 1);
        assert!(state
            .list_pair_mut(&DropListId::Backlog, &DropListId::Backlog)
            .is_none());
    }

    #[test]
    fn test_dropdown_toggles() {
        let mut state = BacklogViewState::default();
        state.toggle_status_dropdown("a");
        assert!(state.is_status_dropdown_open("a"));
        state.toggle_status_dropdown("a");
        assert!(!state.is_status_dropdown_open("a"));

        state.toggle_status_dropdown("b");
        state.toggle_assignee_dropdown();
        assert!(state.show_assignee_dropdown);
        assert!(state.open_status_dropdown.is_none());

        state.close_all_dropdowns();
        assert!(!state.show_assignee_dropdown);
    }

    #[test]
    fn test_collapse_and_title_cancel() {
        let mut state = loaded();
        state.toggle_sprint_collapse("s1");
        assert!(state.is_sprint_collapsed("s1"));
        state.toggle_sprint_collapse("s1");
        assert!(!state.is_sprint_collapsed("s1"));

        state.selected_issue = state.find_issue("a").cloned();
        state.editing_issue = state.selected_issue.clone();
        state.start_editing_title();
        if let Some(editing) = state.editing_issue.as_mut() {
            editing.title = "draft".into();
        }
        state.cancel_editing_title();
        assert!(!state.is_editing_title);
        assert_eq!(state.editing_issue.as_ref().map(|i| i.title.as_str()), Some("a"));
    }

    #[test]
    fn test_state_serializes() {
        let state = loaded();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["view_mode"], "list");
        let back: BacklogViewState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
