use thiserror::Error as ThisError;

/// Errors raised by the Environment Store (§4.A).
#[derive(Debug, ThisError)]
pub enum EnvironmentError {
    #[error("key '{key}' holds a {found} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}
