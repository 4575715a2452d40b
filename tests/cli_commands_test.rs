//! Commands run end to end against the in-memory tracker.

mod common;

use std::sync::Arc;

use common::{standard_tracker, FakeTracker, FixedUser, RecordingNotifier, PROJECT_ID};
use sprintboard::cli::commands::{backlog, comment, issue, sprint};
use sprintboard::cli::AppContext;
use sprintboard::domain::models::{IssueStatus, SprintStatus};
use sprintboard::services::BacklogDeps;

fn context(tracker: &Arc<FakeTracker>, project: Option<&str>) -> AppContext {
    let deps = BacklogDeps {
        issues: tracker.clone(),
        sprints: tracker.clone(),
        projects: tracker.clone(),
        comments: tracker.clone(),
        users: Arc::new(FixedUser::me()),
        notifier: Arc::new(RecordingNotifier::default()),
    };
    AppContext::with_deps(deps, true, project.map(str::to_string))
}

fn parse_issue(args: &[&str]) -> issue::IssueArgs {
    use clap::Parser;
    let cli = sprintboard::cli::Cli::try_parse_from(
        std::iter::once("sprintboard").chain(std::iter::once("issue")).chain(args.iter().copied()),
    )
    .unwrap();
    match cli.command {
        sprintboard::cli::Commands::Issue(args) => args,
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn test_missing_project_fails_with_message() {
    let tracker = Arc::new(standard_tracker());
    let ctx = context(&tracker, None);

    let err = ctx.open_backlog().await.err().expect("no project should fail");

    assert!(format!("{err:#}").contains("No project selected"));
}

#[tokio::test]
async fn test_backlog_show_rejects_bad_filter() {
    let tracker = Arc::new(standard_tracker());
    let ctx = context(&tracker, Some(PROJECT_ID));
    let args = backlog::BacklogArgs {
        command: backlog::BacklogCommands::Show {
            search: None,
            priority: Some("Urgent".to_string()),
            issue_type: None,
            status: None,
            sprint: None,
            epic: None,
            epics_only: false,
            stories_only: false,
            tasks_only: false,
            bugs_only: false,
            sort: "priority".to_string(),
            order: "desc".to_string(),
            board: false,
        },
    };

    assert!(backlog::execute(args, &ctx).await.is_err());
    assert_eq!(tracker.call_count("get_project"), 0);
}

#[tokio::test]
async fn test_issue_status_and_move_commands() {
    let tracker = Arc::new(standard_tracker());
    let ctx = context(&tracker, Some(PROJECT_ID));

    issue::execute(parse_issue(&["status", "i3", "done"]), &ctx).await.unwrap();
    assert_eq!(tracker.issue("i3").unwrap().status, IssueStatus::Done);

    issue::execute(parse_issue(&["move", "i3", "--to", "s1"]), &ctx).await.unwrap();
    assert_eq!(tracker.issue("i3").unwrap().sprint_id.as_deref(), Some("s1"));

    issue::execute(parse_issue(&["move", "i3", "--to", "backlog", "--position", "0"]), &ctx)
        .await
        .unwrap();
    assert!(tracker.issue("i3").unwrap().sprint_id.is_none());
}

#[tokio::test]
async fn test_issue_update_command_sends_patch() {
    let tracker = Arc::new(standard_tracker());
    let ctx = context(&tracker, Some(PROJECT_ID));

    issue::execute(
        parse_issue(&["update", "i4", "--title", "Polish", "--labels", "ui,docs", "--due", "2024-05-01"]),
        &ctx,
    )
    .await
    .unwrap();

    let updated = tracker.issue("i4").unwrap();
    assert_eq!(updated.title, "Polish");
    assert_eq!(updated.labels, vec!["ui", "docs"]);
    assert_eq!(updated.due_date.unwrap().to_rfc3339(), "2024-05-01T00:00:00+00:00");
}

#[tokio::test]
async fn test_failed_command_surfaces_error() {
    let tracker = Arc::new(standard_tracker());
    tracker.fail("delete_issue");
    let ctx = context(&tracker, Some(PROJECT_ID));

    let result = issue::execute(parse_issue(&["delete", "i1"]), &ctx).await;

    assert!(result.is_err());
    assert!(tracker.issue("i1").is_some());
}

#[tokio::test]
async fn test_sprint_and_comment_commands() {
    let tracker = Arc::new(standard_tracker());
    let ctx = context(&tracker, Some(PROJECT_ID));

    sprint::execute(
        sprint::SprintArgs {
            command: sprint::SprintCommands::Start { id: "s1".to_string() },
        },
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(tracker.sprint("s1").unwrap().status, SprintStatus::Active);

    let missing = sprint::execute(
        sprint::SprintArgs {
            command: sprint::SprintCommands::Complete { id: "nope".to_string() },
        },
        &ctx,
    )
    .await;
    assert!(missing.is_err());

    comment::execute(
        comment::CommentArgs {
            command: comment::CommentCommands::Add {
                issue: "i1".to_string(),
                content: "Ready for review".to_string(),
            },
        },
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(tracker.call_count("create_comment"), 1);
}
