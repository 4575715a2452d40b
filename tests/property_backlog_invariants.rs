use proptest::prelude::*;

use sprintboard::domain::models::{Issue, IssuePriority, IssueStatus, IssueType, Sprint};
use sprintboard::services::backlog::{
    move_item_in_array, sort_issues, transfer_array_item, BacklogViewState, DropListId,
    IssueFilters, SortKey, SortOrder, Transition, TypeToggles,
};

fn priority() -> impl Strategy<Value = IssuePriority> {
    prop::sample::select(IssuePriority::ALL.to_vec())
}

fn status() -> impl Strategy<Value = IssueStatus> {
    prop::sample::select(IssueStatus::ALL.to_vec())
}

fn issue_type() -> impl Strategy<Value = IssueType> {
    prop::sample::select(IssueType::ALL.to_vec())
}

prop_compose! {
    fn arb_issue(index: usize)(
        title in "[a-z ]{0,12}",
        priority in priority(),
        status in status(),
        issue_type in issue_type(),
        points in 0u32..13,
        sprint in prop::option::of(0usize..3),
    ) -> Issue {
        let mut issue = Issue::new(format!("id{index:03}"), title);
        issue.priority = priority;
        issue.status = status;
        issue.issue_type = issue_type;
        issue.story_points = Some(points);
        issue.sprint_id = sprint.map(|s| format!("s{s}"));
        issue
    }
}

fn arb_issues() -> impl Strategy<Value = Vec<Issue>> {
    (0usize..16).prop_flat_map(|n| (0..n).map(arb_issue).collect::<Vec<_>>())
}

fn arb_filters() -> impl Strategy<Value = IssueFilters> {
    (
        prop::option::of("[a-z]{1,2}"),
        prop::option::of(priority()),
        prop::option::of(issue_type()),
        prop::option::of(status()),
        prop::option::of(0usize..3),
        any::<[bool; 4]>(),
    )
        .prop_map(|(search, priority, issue_type, status, sprint, toggles)| IssueFilters {
            search: search.unwrap_or_default(),
            priority,
            issue_type,
            status,
            sprint_id: sprint.map(|s| format!("s{s}")),
            epic_id: None,
            toggles: TypeToggles {
                epics_only: toggles[0],
                stories_only: toggles[1],
                tasks_only: toggles[2],
                bugs_only: toggles[3],
            },
        })
}

fn loaded_state(issues: Vec<Issue>) -> BacklogViewState {
    let mut state = BacklogViewState::default();
    let sprints = (0..3).map(|s| Sprint::new(format!("s{s}"), format!("Sprint {s}"))).collect();
    state.partition(sprints, issues);
    state
}

fn list_id(index: usize) -> DropListId {
    if index == 3 {
        DropListId::Backlog
    } else {
        DropListId::sprint(format!("s{index}"))
    }
}

fn sorted_ids(state: &BacklogViewState) -> Vec<String> {
    let mut ids: Vec<String> = state
        .backlog_issues
        .iter()
        .chain(state.sprints.iter().flat_map(|s| s.issues.iter()))
        .map(|i| i.id.clone())
        .collect();
    ids.sort();
    ids
}

proptest! {
    /// Property: Reordering keeps the same elements
    #[test]
    fn prop_move_item_is_a_permutation(
        mut items in prop::collection::vec(any::<u8>(), 0..20),
        from in 0usize..25,
        to in 0usize..25,
    ) {
        let mut before = items.clone();
        let result = move_item_in_array(&mut items, from, to);

        prop_assert_eq!(result.is_none(), before.is_empty());
        before.sort_unstable();
        let mut after = items.clone();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    /// Property: A transfer moves exactly one element
    #[test]
    fn prop_transfer_preserves_total(
        mut source in prop::collection::vec(any::<u8>(), 0..10),
        mut target in prop::collection::vec(any::<u8>(), 0..10),
        from in 0usize..15,
        to in 0usize..15,
    ) {
        let (source_len, target_len) = (source.len(), target.len());
        let result = transfer_array_item(&mut source, &mut target, from, to);

        if source_len == 0 {
            prop_assert!(result.is_none());
            prop_assert_eq!(target.len(), target_len);
        } else {
            let (used_from, used_to) = result.unwrap();
            prop_assert!(used_from < source_len);
            prop_assert!(used_to <= target_len);
            prop_assert_eq!(source.len() + target.len(), source_len + target_len);
        }
    }

    /// Property: Moving an issue between lists never creates or loses issues,
    /// keeps sprint membership consistent, and is undone by its inverse
    #[test]
    fn prop_transfer_transition_round_trips(
        issues in arb_issues(),
        from_list in 0usize..4,
        to_list in 0usize..4,
        from in 0usize..20,
        to in 0usize..20,
    ) {
        prop_assume!(from_list != to_list);
        let original = loaded_state(issues);
        let mut state = original.clone();

        let transition = Transition::Transfer {
            from_list: list_id(from_list),
            to_list: list_id(to_list),
            from,
            to,
        };

        match transition.apply(&mut state) {
            None => prop_assert_eq!(&state, &original),
            Some(inverse) => {
                prop_assert_eq!(sorted_ids(&state), sorted_ids(&original));
                for sprint in &state.sprints {
                    prop_assert!(sprint.issues.iter().all(|i| i.sprint_id.as_deref() == Some(sprint.id.as_str())));
                    let points: u32 = sprint.issues.iter().map(Issue::points).sum();
                    prop_assert_eq!(sprint.total_story_points, points);
                }
                prop_assert!(state.backlog_issues.iter().all(|i| i.sprint_id.is_none()));

                prop_assert!(inverse.apply(&mut state).is_some());
                prop_assert_eq!(&state, &original);
            }
        }
    }

    /// Property: A failed status change leaves no trace after the inverse
    #[test]
    fn prop_status_transition_round_trips(
        issues in arb_issues(),
        pick in any::<prop::sample::Index>(),
        next in status(),
    ) {
        prop_assume!(!issues.is_empty());
        let target = pick.get(&issues).id.clone();
        let original = loaded_state(issues);
        let mut state = original.clone();

        let inverse = Transition::SetStatus { issue_id: target.clone(), status: next }
            .apply(&mut state)
            .expect("known issue");
        prop_assert_eq!(state.find_issue(&target).unwrap().status, next);

        inverse.apply(&mut state);
        prop_assert_eq!(&state, &original);
    }

    /// Property: Filtering keeps exactly the matching issues, in order
    #[test]
    fn prop_filters_are_conjunctive_and_order_preserving(
        issues in arb_issues(),
        filters in arb_filters(),
    ) {
        let kept = filters.apply(&issues);
        let expected: Vec<Issue> = issues.iter().filter(|i| filters.matches(i)).cloned().collect();
        prop_assert_eq!(&kept, &expected);

        for issue in &kept {
            if let Some(p) = filters.priority {
                prop_assert_eq!(issue.priority, p);
            }
            if let Some(s) = filters.status {
                prop_assert_eq!(issue.status, s);
            }
            if let Some(t) = filters.issue_type {
                prop_assert_eq!(issue.issue_type, t);
            }
        }

        prop_assert_eq!(IssueFilters::default().apply(&issues), issues);
    }

    /// Property: Priority sort orders by weight in the requested direction
    #[test]
    fn prop_priority_sort_is_monotonic(mut issues in arb_issues(), descending in any::<bool>()) {
        let order = if descending { SortOrder::Desc } else { SortOrder::Asc };
        sort_issues(&mut issues, SortKey::Priority, order);

        for pair in issues.windows(2) {
            let (a, b) = (pair[0].priority.weight(), pair[1].priority.weight());
            if descending {
                prop_assert!(a >= b);
            } else {
                prop_assert!(a <= b);
            }
        }
    }
}
