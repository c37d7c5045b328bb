use thiserror::Error as ThisError;

/// Raised when a notification listener itself fails during dispatch (§4.H, §7).
#[derive(Debug, ThisError)]
pub enum NotificationError {
    #[error("notification listener failed handling {event:?}: {message}")]
    ListenerFailed { event: String, message: String },
}
