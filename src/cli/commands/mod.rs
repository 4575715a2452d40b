//! CLI command implementations.

pub mod backlog;
pub mod comment;
pub mod issue;
pub mod sprint;

use anyhow::{anyhow, Result};

use crate::domain::models::{IssuePriority, IssueStatus, IssueType};
use crate::services::ActionOutcome;

/// Turn a controller outcome into a command result.
pub(crate) fn finish(outcome: ActionOutcome) -> Result<()> {
    outcome.into_result().map_err(anyhow::Error::from)
}

pub(crate) fn parse_priority(raw: &str) -> Result<IssuePriority> {
    IssuePriority::from_str(raw).ok_or_else(|| {
        anyhow!("Invalid priority: {raw}. Must be one of: Highest, High, Medium, Low, Lowest")
    })
}

pub(crate) fn parse_status(raw: &str) -> Result<IssueStatus> {
    IssueStatus::from_str(raw)
        .ok_or_else(|| anyhow!("Invalid status: {raw}. Must be one of: To Do, In Progress, Review, Done"))
}

pub(crate) fn parse_type(raw: &str) -> Result<IssueType> {
    IssueType::from_str(raw)
        .ok_or_else(|| anyhow!("Invalid type: {raw}. Must be one of: Epic, Story, Task, Bug, Sub-task"))
}

/// Parse a filter value where absent or "All" means no filter.
pub(crate) fn parse_filter<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<Option<T>> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => parse(value).map(Some),
    }
}
