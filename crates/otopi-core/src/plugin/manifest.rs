//! `plugin.toml`: the module-definition marker file the Plugin Loader looks
//! for under each candidate directory (§4.D). Its presence means "load this
//! directory as a plugin module"; its contents describe how to load it.
use serde::Deserialize;

/// Parsed contents of a `plugin.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    /// Compatible core API version range, e.g. "1.x".
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Dynamic library file name relative to the manifest's directory
    /// (e.g. `libexample_plugin.so`). Absent for statically-linked plugins
    /// registered directly by the entry-point binary (see §6 and the
    /// `otopi` CLI crate, which links its core plugins in).
    pub entry_point: Option<String>,
}

fn default_api_version() -> String {
    "1.x".to_string()
}

impl PluginManifest {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
