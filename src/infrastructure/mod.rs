//! Infrastructure layer module
//!
//! Concrete implementations behind the domain ports and the application edge:
//! - Configuration loading (figment)
//! - Session credentials and identity
//! - Logging infrastructure (tracing)
//! - Terminal notifications

pub mod config;
pub mod credentials;
pub mod logging;
pub mod notify;

pub use config::{ConfigError, ConfigLoader};
pub use credentials::SessionIdentity;
pub use logging::{LogConfig, LoggerImpl};
pub use notify::TerminalNotifier;
