use crate::stage::{StageId, ALL_STAGES};

#[test]
fn ordinal_matches_position_in_all_stages() {
    for (i, stage) in ALL_STAGES.iter().enumerate() {
        assert_eq!(stage.ordinal(), i as u32);
    }
}

#[test]
fn boot_is_first_and_reboot_is_last() {
    assert_eq!(ALL_STAGES.first().copied(), Some(StageId::Boot));
    assert_eq!(ALL_STAGES.last().copied(), Some(StageId::Reboot));
}

#[test]
fn teardown_stages_run_even_after_error() {
    assert!(!StageId::Cleanup.if_success());
    assert!(!StageId::PreTerminate.if_success());
    assert!(!StageId::Terminate.if_success());
    assert!(!StageId::Reboot.if_success());
}

#[test]
fn ordinary_stages_are_skipped_after_error() {
    assert!(StageId::Init.if_success());
    assert!(StageId::Setup.if_success());
    assert!(StageId::Closeup.if_success());
}

#[test]
fn display_name_is_kebab_case() {
    assert_eq!(StageId::InternalPackages.display_name(), "internal-packages");
    assert_eq!(StageId::TransactionBegin.to_string(), "transaction-begin");
}
