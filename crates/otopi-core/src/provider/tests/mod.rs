use std::path::PathBuf;

use crate::provider::{BaseCommand, Command, Dialog, ProviderError, ProviderRegistry};

#[test]
fn base_providers_are_installed_by_default() {
    let registry = ProviderRegistry::new();
    assert!(registry.dialog().confirm("proceed?"));
    assert!(registry.dialog().ask("name?").is_none());
    assert!(!registry.services().start("httpd"));
}

#[test]
fn registering_a_provider_replaces_the_slot() {
    struct AlwaysDenyDialog;
    impl Dialog for AlwaysDenyDialog {
        fn confirm(&self, _question: &str) -> bool {
            false
        }
    }

    let mut registry = ProviderRegistry::new();
    registry.register_dialog(Box::new(AlwaysDenyDialog));
    assert!(!registry.dialog().confirm("proceed?"));
}

#[test]
fn command_get_fails_for_unresolved_required_name() {
    let command = BaseCommand::default();
    match command.get("rpm", false) {
        Err(ProviderError::CommandNotFound(name)) => assert_eq!(name, "rpm"),
        other => panic!("expected CommandNotFound, got {other:?}"),
    }
}

#[test]
fn command_get_returns_none_for_unresolved_optional_name() {
    let command = BaseCommand::default();
    assert_eq!(command.get("rpm", true).unwrap(), None);
}

#[test]
fn command_set_then_get_returns_resolved_path() {
    let mut command = BaseCommand::default();
    command.set("rpm", PathBuf::from("/usr/bin/rpm"));
    assert_eq!(command.get("rpm", false).unwrap(), Some(PathBuf::from("/usr/bin/rpm")));
}
