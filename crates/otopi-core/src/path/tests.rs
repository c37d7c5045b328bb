use super::resolve_file;

#[test]
fn none_passes_through() {
    assert_eq!(resolve_file("/exec", None), None);
}

#[test]
fn absolute_path_passes_through_unchanged() {
    let result = resolve_file("/exec", Some("/abs/path"));
    assert_eq!(result.unwrap().to_str().unwrap(), "/abs/path");
}

#[test]
fn relative_path_is_joined_with_execution_directory() {
    let result = resolve_file("/exec", Some("rel/path"));
    assert_eq!(result.unwrap().to_str().unwrap(), "/exec/rel/path");
}

#[test]
fn resolve_file_is_idempotent() {
    let once = resolve_file("/exec", Some("rel/path")).unwrap();
    let twice = resolve_file("/exec", once.to_str());
    assert_eq!(Some(once), twice);
}
