use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors from the Plugin Loader (§4.D) and the Plugin Registry.
#[derive(Debug, ThisError)]
pub enum PluginError {
    /// §4.D failure mode: a requested group was not present under any root.
    #[error("required plugin group(s) not found on PLUGIN_PATH: {0:?}")]
    MissingGroups(Vec<String>),

    #[error("failed to read plugin directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed plugin manifest at {path}: {message}")]
    MalformedManifest { path: PathBuf, message: String },

    #[error("failed to load plugin library {path}: {source}")]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("plugin library {path} is missing the '{symbol}' entry point")]
    MissingEntryPoint { path: PathBuf, symbol: String },

    #[error("plugin {id} declares incompatible API version {declared} (core is {core})")]
    ApiVersionMismatch { id: String, declared: String, core: String },

    #[error("plugin {id} registration failed: {message}")]
    RegistrationFailed { id: String, message: String },
}
