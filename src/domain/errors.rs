//! Domain errors for the sprintboard client.
//!
//! Every gateway call collapses its failure into a single [`DomainError`]
//! whose display text is the message shown to the user.

use thiserror::Error;

/// Fallback text when the server gives no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Domain-level errors raised by gateways and surfaced by the controller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Required input was missing or malformed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// HTTP 401.
    #[error("You are not authorized to perform this action.")]
    Unauthorized,

    /// HTTP 404.
    #[error("The requested resource was not found.")]
    NotFound,

    /// HTTP 500.
    #[error("Server error occurred. Please try again later.")]
    Server,

    /// Any other HTTP failure, carrying the server-provided message.
    #[error("{0}")]
    Api(String),

    /// The request never produced an HTTP status (connection refused, DNS, ...).
    #[error("An error occurred")]
    Transport(String),

    /// A response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A fetch operation failed; the message is fixed per operation.
    #[error("{0}")]
    LoadFailed(String),
}

/// Result alias for gateway and controller operations.
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Classify an HTTP failure by status code.
    ///
    /// 401, 404 and 500 map to fixed messages. Anything else passes through
    /// the `message` field of a JSON error body when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            500 => Self::Server,
            _ => Self::Api(server_message(body).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())),
        }
    }

    /// The text to show the user for this error.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether the failure happened before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_status_messages() {
        assert_eq!(
            DomainError::from_status(401, "").user_message(),
            "You are not authorized to perform this action."
        );
        assert_eq!(
            DomainError::from_status(404, "{\"message\":\"nope\"}").user_message(),
            "The requested resource was not found."
        );
        assert_eq!(
            DomainError::from_status(500, "").user_message(),
            "Server error occurred. Please try again later."
        );
    }

    #[test]
    fn test_other_status_passes_through_server_message() {
        let err = DomainError::from_status(400, r#"{"message":"taskName must not be empty"}"#);
        assert_eq!(err, DomainError::Api("taskName must not be empty".to_string()));
        assert_eq!(err.user_message(), "taskName must not be empty");
    }

    #[test]
    fn test_other_status_without_message_is_generic() {
        assert_eq!(
            DomainError::from_status(409, "conflict").user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            DomainError::from_status(422, r#"{"message":""}"#).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_transport_hides_detail() {
        let err = DomainError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert!(!err.is_validation());
        assert!(DomainError::Validation("x".into()).is_validation());
    }
}
