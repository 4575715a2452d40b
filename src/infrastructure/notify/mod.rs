//! Transient user notifications on the terminal.

use console::style;

use crate::domain::ports::Notifier;

/// Prints notifications to stderr, one line each.
///
/// Stdout is left to command output so `--json` stays machine-readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier {
    quiet: bool,
}

impl TerminalNotifier {
    /// A notifier that prints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress notifications entirely (used in JSON mode).
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        tracing::debug!(message, "notification");
        if !self.quiet {
            eprintln!("{} {}", style("›").cyan().bold(), message);
        }
    }
}
