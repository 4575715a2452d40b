//! Session credential and user identity ports.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::CurrentUser;

/// Supplies the bearer token for authenticated requests.
pub trait CredentialProvider: Send + Sync {
    /// The current session token, if signed in.
    fn bearer_token(&self) -> Option<String>;
}

/// Identity of the signed-in user.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Id of the signed-in user, without a remote call.
    fn current_user_id(&self) -> Option<String>;

    /// Full profile of the signed-in user; `None` when signed out.
    async fn current_user(&self) -> DomainResult<Option<CurrentUser>>;
}
