//! Sprintboard CLI entry point.

use anyhow::Result;
use clap::Parser;

use sprintboard::cli::{AppContext, Cli, Commands};
use sprintboard::infrastructure::{ConfigLoader, LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        sprintboard::cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let mut log_config = LogConfig::from_settings(&config.logging)?;
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    let _logger = LoggerImpl::init(&log_config)?;
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");

    let ctx = AppContext::from_config(&config, cli.json, cli.project);

    match cli.command {
        Commands::Backlog(args) => sprintboard::cli::commands::backlog::execute(args, &ctx).await,
        Commands::Issue(args) => sprintboard::cli::commands::issue::execute(args, &ctx).await,
        Commands::Sprint(args) => sprintboard::cli::commands::sprint::execute(args, &ctx).await,
        Commands::Comment(args) => sprintboard::cli::commands::comment::execute(args, &ctx).await,
    }
}
