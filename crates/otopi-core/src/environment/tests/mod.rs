use crate::environment::{keys, EnvValue, Environment, ExceptionKind, ExceptionRecord};
use crate::handler::Priority;

#[test]
fn new_installs_defaults() {
    let env = Environment::new();
    assert!(!env.is_error());
    assert!(!env.is_aborted());
    assert_eq!(env.exit_code(), 0);
    assert_eq!(env.execution_directory(), ".");
}

#[test]
fn set_error_is_monotone() {
    let mut env = Environment::new();
    env.set_error();
    assert!(env.is_error());
    // There is no clear_error: once set, it stays set for the run.
    env.set(keys::LOG, EnvValue::Bool(true));
    assert!(env.is_error());
}

#[test]
fn push_exception_sets_error_and_aborted_for_abort_kind() {
    let mut env = Environment::new();
    env.push_exception(ExceptionRecord {
        kind: ExceptionKind::Abort,
        stage: "setup".into(),
        message: "boom".into(),
        stack_trace: String::new(),
    });
    assert!(env.is_error());
    assert!(env.is_aborted());
    assert_eq!(env.first_exception().unwrap().message, "boom");
}

#[test]
fn push_exception_handler_fault_does_not_set_aborted() {
    let mut env = Environment::new();
    env.push_exception(ExceptionRecord {
        kind: ExceptionKind::HandlerFault,
        stage: "setup".into(),
        message: "boom".into(),
        stack_trace: String::new(),
    });
    assert!(env.is_error());
    assert!(!env.is_aborted());
}

#[test]
fn exit_code_picks_highest_priority_entry() {
    let mut env = Environment::new();
    env.push_exit_code(Priority::DEFAULT, 7);
    env.push_exit_code(Priority::HIGH, 3);
    // Default EXIT_CODE entry (priority after_last, code 0) still outranks both.
    assert_eq!(env.exit_code(), 0);
}

#[test]
fn suppressed_keys_are_redacted_in_dump() {
    let mut env = Environment::new();
    env.suppress_key("password");
    env.set("password", EnvValue::Str("hunter2".into()));
    let dump = env.dump();
    let line = dump.iter().find(|l| l.starts_with("ENV password=")).unwrap();
    assert_eq!(line, "ENV password=string:'***'");
}

#[test]
fn diff_reports_only_changed_keys() {
    let before = Environment::new();
    let mut after = before.clone();
    after.set("NEW_KEY", EnvValue::Int(42));
    let diff = after.diff(&before);
    assert_eq!(diff.len(), 1);
    assert!(diff[0].contains("NEW_KEY"));
}

#[test]
fn setdefault_does_not_override_existing_value() {
    let mut env = Environment::new();
    env.set("k", EnvValue::Int(1));
    env.setdefault("k", EnvValue::Int(2));
    assert_eq!(env.get("k").unwrap().as_int(), Some(1));
}
