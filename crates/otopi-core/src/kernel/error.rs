//! Top-level error type for the orchestrator core.
//!
//! Each subsystem (environment, plugin loading, sequence building/running,
//! notification dispatch, configuration) defines its own `thiserror` enum;
//! this module aggregates them behind one `Error` so callers crossing
//! subsystem boundaries don't need to know which one produced a failure.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::environment::error::EnvironmentError;
use crate::plugin::error::PluginError;
use crate::sequence::error::SequenceError;
use crate::notify::error::NotificationError;
use crate::config::error::ConfigError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("environment error: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("sequence error: {0}")]
    Sequence(#[from] SequenceError),

    #[error("notification error: {0}")]
    Notification(#[from] NotificationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The distinguished failure kind a handler raises to mean "stop the
    /// whole run now", as opposed to an ordinary fault (§4.G, §7). The
    /// Sequence Runner sets `ABORTED` in addition to `ERROR` when it
    /// captures one of these.
    #[error("{0}")]
    Abort(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
