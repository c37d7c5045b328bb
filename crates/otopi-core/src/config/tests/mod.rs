use std::io::Write;

use crate::config::Config;
use crate::environment::{keys, Environment};

#[test]
fn empty_config_applies_no_overrides() {
    let env_before = Environment::new();
    let mut env = env_before.clone();
    Config::empty().apply_to_environment(&mut env);
    assert_eq!(env.dump(), env_before.dump());
}

#[test]
fn toml_config_overrides_plugin_path() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "plugin_path = \"/opt/otopi/plugins\"").unwrap();
    writeln!(file, "randomize_events = true").unwrap();

    let config = Config::load_from_file(file.path()).unwrap();
    let mut env = Environment::new();
    config.apply_to_environment(&mut env);

    assert_eq!(env.get(keys::PLUGIN_PATH).and_then(|v| v.as_str()), Some("/opt/otopi/plugins"));
    assert_eq!(env.get(keys::RANDOMIZE_EVENTS).and_then(|v| v.as_bool()), Some(true));
}

#[test]
fn unsupported_extension_is_an_error() {
    let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
    assert!(Config::load_from_file(file.path()).is_err());
}
