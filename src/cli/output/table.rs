//! Table output formatting for CLI commands
//!
//! Formats issues, sprints and comments with comfy-table. Colors are dropped
//! when `NO_COLOR` is set or the terminal is dumb.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{Comment, Issue, IssuePriority, IssueStatus, Sprint, SprintStatus};

use super::truncate;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Formatter with colors detected from the environment.
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Formatter with explicit color and width settings.
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a list of issues as a table
    pub fn format_issues(&self, issues: &[Issue]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Key", "Title", "Type", "Status", "Priority", "Points", "Assignee"]));

        for issue in issues {
            let status_cell = if self.use_colors {
                Cell::new(issue.status).fg(status_color(issue.status))
            } else {
                Cell::new(format!("{} {}", status_icon(issue.status), issue.status))
            };
            let priority_cell = if self.use_colors {
                Cell::new(issue.priority).fg(priority_color(issue.priority))
            } else {
                Cell::new(issue.priority)
            };
            let assignee = issue
                .assignee
                .as_ref()
                .map_or_else(|| "-".to_string(), |a| a.name.clone());

            table.add_row(vec![
                Cell::new(&issue.key),
                Cell::new(truncate(&issue.title, 40)),
                Cell::new(issue.issue_type),
                status_cell,
                priority_cell,
                Cell::new(issue.points()),
                Cell::new(assignee),
            ]);
        }

        table.to_string()
    }

    /// Format issues as a board with one column per status
    pub fn format_board(&self, issues: &[Issue]) -> String {
        let mut table = self.create_base_table();
        let columns: Vec<Vec<&Issue>> = IssueStatus::ALL
            .iter()
            .map(|status| issues.iter().filter(|i| i.status == *status).collect())
            .collect();
        let titles: Vec<String> = IssueStatus::ALL
            .iter()
            .zip(&columns)
            .map(|(status, column)| format!("{status} ({})", column.len()))
            .collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        table.set_header(header(&titles));

        let depth = columns.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..depth {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|column| {
                    column.get(row).map_or_else(
                        || Cell::new(""),
                        |issue| Cell::new(format!("{} {}", issue.key, truncate(&issue.title, 24))),
                    )
                })
                .collect();
            table.add_row(cells);
        }

        table.to_string()
    }

    /// Format sprint summaries as a table
    pub fn format_sprints(&self, sprints: &[Sprint]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Id", "Name", "Status", "Dates", "Issues", "Points", "Done"]));

        for sprint in sprints {
            let dates = match (sprint.start_date, sprint.end_date) {
                (Some(start), Some(end)) => format!("{} – {}", start.format("%b %d"), end.format("%b %d, %Y")),
                _ => "-".to_string(),
            };
            let status_cell = if self.use_colors {
                Cell::new(sprint.status).fg(match sprint.status {
                    SprintStatus::Active => Color::Green,
                    SprintStatus::Completed => Color::Magenta,
                    SprintStatus::Planning => Color::Blue,
                })
            } else {
                Cell::new(sprint.status)
            };

            table.add_row(vec![
                Cell::new(&sprint.id),
                Cell::new(truncate(&sprint.name, 30)),
                status_cell,
                Cell::new(dates),
                Cell::new(format!("{} done / {} to do", sprint.done_count(), sprint.todo_count())),
                Cell::new(format!("{}/{}", sprint.completed_story_points, sprint.total_story_points)),
                Cell::new(format!("{}%", sprint.completion_percentage())),
            ]);
        }

        table.to_string()
    }

    /// Format comments as a table, in the given order
    pub fn format_comments(&self, comments: &[Comment]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Id", "Author", "Created", "Comment"]));

        for comment in comments {
            table.add_row(vec![
                Cell::new(&comment.id),
                Cell::new(comment.author_name.as_deref().unwrap_or("-")),
                Cell::new(comment.created_at.format("%Y-%m-%d %H:%M")),
                Cell::new(truncate(&comment.content, 60)),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.use_colors {
            table.force_no_tty();
        }
        if let Some(width) = self.max_width {
            table.set_width(width);
        }
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if terminal supports colors
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

fn status_color(status: IssueStatus) -> Color {
    match status {
        IssueStatus::ToDo => Color::White,
        IssueStatus::InProgress => Color::Cyan,
        IssueStatus::Review => Color::Yellow,
        IssueStatus::Done => Color::Green,
    }
}

fn status_icon(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::ToDo => "○",
        IssueStatus::InProgress => "⟳",
        IssueStatus::Review => "⧗",
        IssueStatus::Done => "✓",
    }
}

fn priority_color(priority: IssuePriority) -> Color {
    match priority {
        IssuePriority::Highest => Color::Red,
        IssuePriority::High => Color::DarkRed,
        IssuePriority::Medium => Color::Yellow,
        IssuePriority::Low => Color::Green,
        IssuePriority::Lowest => Color::DarkGreen,
    }
}
