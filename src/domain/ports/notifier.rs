//! User notification port.

/// Transient user feedback (toast / snack-bar).
pub trait Notifier: Send + Sync {
    /// Show `message` to the user.
    fn notify(&self, message: &str);
}
