//! Session credentials and identity.
//!
//! The signed-in session comes from configuration (`session.*` keys or
//! `SPRINTBOARD_SESSION__*` variables). [`SessionIdentity`] exposes it to the
//! REST client as a bearer token and to the controller as the current user.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CurrentUser, SessionConfig};
use crate::domain::ports::{CredentialProvider, UserDirectory};

/// Session-backed credential provider and user directory.
#[derive(Clone, Default)]
pub struct SessionIdentity {
    token: Option<String>,
    user_id: Option<String>,
    first_name: String,
    last_name: String,
}

impl SessionIdentity {
    /// Identity from the session section of the config. Blank token or id count as absent.
    pub fn from_config(session: &SessionConfig) -> Self {
        Self {
            token: session.token.clone().filter(|t| !t.trim().is_empty()),
            user_id: session.user_id.clone().filter(|id| !id.trim().is_empty()),
            first_name: session.first_name.clone().unwrap_or_default(),
            last_name: session.last_name.clone().unwrap_or_default(),
        }
    }

    /// Whether a bearer token is configured.
    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }
}

impl std::fmt::Debug for SessionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIdentity")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user_id", &self.user_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

impl CredentialProvider for SessionIdentity {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}

#[async_trait]
impl UserDirectory for SessionIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }

    async fn current_user(&self) -> DomainResult<Option<CurrentUser>> {
        Ok(self.user_id.as_ref().map(|id| CurrentUser {
            id: id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }))
    }
}
