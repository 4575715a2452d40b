//! Command-line interface.

pub mod commands;
pub mod context;
pub mod output;
pub mod types;

pub use context::AppContext;
pub use types::{Cli, Commands};

/// Print a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    let message = format!("{err:#}");

    if json {
        let body = serde_json::json!({ "error": message });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {}", console::style("error:").red().bold(), message);
    }
    std::process::exit(1);
}
