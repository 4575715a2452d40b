//! CLI output formatting module
//!
//! Human output goes through comfy-table, machine output through serde_json.

pub mod progress;
pub mod table;

use serde::Serialize;

pub use progress::{create_spinner_with_message, ProgressBarExt};
pub use table::TableFormatter;

/// Result of a command, printable as text or JSON.
pub trait CommandOutput: Serialize {
    /// Text for the terminal.
    fn to_human(&self) -> String;

    /// JSON value for `--json` mode.
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print `result` in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Truncate a string to at most `max_len` characters, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a lon...");
        assert_eq!(truncate("héllo wörld", 6), "hél...");
    }
}
