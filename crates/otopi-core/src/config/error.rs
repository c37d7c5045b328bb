use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors from the (ambient) Configuration Loader, §4.K.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("unsupported config file extension for {0}")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "toml-config")]
    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[cfg(feature = "yaml-config")]
    #[error("failed to parse YAML config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
