//! Configuration Loader (ambient, §4.K): an on-disk TOML or YAML file
//! (selected by extension) supplying overrides for the build-time defaults,
//! read once before `load_plugins()` is called. Its absence is not an error —
//! every field has a build-time default already installed by
//! [`crate::environment::Environment::new`].
use std::path::Path;

use serde::Deserialize;

pub mod error;
#[cfg(test)]
mod tests;

pub use error::ConfigError;

use crate::environment::{keys, EnvValue, Environment};

/// Overrides for the environment defaults listed in §3. Every field is
/// optional: an absent field leaves the build-time default untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub plugin_path: Option<String>,
    pub plugin_groups: Option<String>,
    pub execution_directory: Option<String>,
    pub randomize_events: Option<bool>,
    pub fail_on_prio_override: Option<bool>,
    pub log: Option<bool>,
}

impl Config {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads and parses a config file, dispatching on its extension.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        match path.extension().and_then(|e| e.to_str()) {
            #[cfg(feature = "toml-config")]
            Some("toml") => toml::from_str(&contents)
                .map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source }),
            #[cfg(feature = "yaml-config")]
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
                .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source }),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Applies every present override onto `env`, matching §4.K: read once,
    /// before any plugin is loaded.
    pub fn apply_to_environment(&self, env: &mut Environment) {
        if let Some(path) = &self.plugin_path {
            env.set(keys::PLUGIN_PATH, EnvValue::Str(path.clone()));
        }
        if let Some(groups) = &self.plugin_groups {
            env.set(keys::PLUGIN_GROUPS, EnvValue::Str(groups.clone()));
        }
        if let Some(dir) = &self.execution_directory {
            env.set(keys::EXECUTION_DIRECTORY, EnvValue::Str(dir.clone()));
        }
        if let Some(randomize) = self.randomize_events {
            env.set(keys::RANDOMIZE_EVENTS, EnvValue::Bool(randomize));
        }
        if let Some(fail) = self.fail_on_prio_override {
            env.set(keys::FAIL_ON_PRIO_OVERRIDE, EnvValue::Bool(fail));
        }
        if let Some(log) = self.log {
            env.set(keys::LOG, EnvValue::Bool(log));
        }
    }
}
