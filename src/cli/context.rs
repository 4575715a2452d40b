//! Wiring shared by every command: gateways, identity and the notifier.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::adapters::rest::{
    HttpCommentGateway, HttpIssueGateway, HttpProjectGateway, HttpSprintGateway, RestClient,
};
use crate::domain::models::Config;
use crate::infrastructure::{SessionIdentity, TerminalNotifier};
use crate::services::{BacklogController, BacklogDeps};

use super::output::{create_spinner_with_message, ProgressBarExt};

/// Shared state for command execution.
pub struct AppContext {
    /// Emit JSON instead of tables.
    pub json: bool,
    /// Project selected by flag or config.
    pub project_id: Option<String>,
    deps: BacklogDeps,
}

impl AppContext {
    /// Build REST gateways from configuration.
    ///
    /// `project` from the command line wins over `project_id` in the config.
    pub fn from_config(config: &Config, json: bool, project: Option<String>) -> Self {
        let identity = Arc::new(SessionIdentity::from_config(&config.session));
        if !identity.is_signed_in() {
            tracing::warn!("no session token configured, requests will be anonymous");
        }
        let client = Arc::new(RestClient::new(config.api.base_url.clone(), identity.clone()));

        let deps = BacklogDeps {
            issues: Arc::new(HttpIssueGateway::new(client.clone(), identity.clone())),
            sprints: Arc::new(HttpSprintGateway::new(client.clone())),
            projects: Arc::new(HttpProjectGateway::new(client.clone())),
            comments: Arc::new(HttpCommentGateway::new(client)),
            users: identity,
            notifier: Arc::new(TerminalNotifier::new().quiet(json)),
        };

        Self {
            json,
            project_id: project.or_else(|| config.project_id.clone()),
            deps,
        }
    }

    /// Context over arbitrary gateways.
    pub fn with_deps(deps: BacklogDeps, json: bool, project_id: Option<String>) -> Self {
        Self {
            json,
            project_id,
            deps,
        }
    }

    /// Load the project's backlog behind a spinner.
    pub async fn open_backlog(&self) -> Result<BacklogController> {
        let spinner = create_spinner_with_message("Loading backlog...", self.json);
        let mut controller = BacklogController::new(self.deps.clone());
        let outcome = controller.init(self.project_id.as_deref()).await;

        match outcome.into_result() {
            Ok(()) => {
                spinner.finish_and_clear();
                Ok(controller)
            }
            Err(err) => {
                spinner.finish_error("Failed to load backlog");
                let message = controller
                    .state()
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "Failed to load backlog".to_string());
                Err(err).context(message)
            }
        }
    }
}
