use std::sync::Arc;

use async_trait::async_trait;

use crate::handler::{HandlerBuilder, HandlerMethod, Priority};
use crate::kernel::bootstrap::Context;
use crate::kernel::error::Result;
use crate::stage::StageId;

use super::builder::build;
use super::error::SequenceError;
use super::runner::run;

struct NoOp;

#[async_trait]
impl HandlerMethod for NoOp {
    async fn call(&self, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }
}

fn noop() -> Arc<dyn HandlerMethod> {
    Arc::new(NoOp)
}

struct Aborts;

#[async_trait]
impl HandlerMethod for Aborts {
    async fn call(&self, _ctx: &mut Context) -> Result<()> {
        Err(crate::kernel::error::Error::Abort("boom".to_string()))
    }
}

struct SetsFlag(&'static str);

#[async_trait]
impl HandlerMethod for SetsFlag {
    async fn call(&self, ctx: &mut Context) -> Result<()> {
        ctx.environment_mut().set(self.0, crate::environment::EnvValue::Bool(true));
        Ok(())
    }
}

#[test]
fn scenario_1_priority_orders_within_a_stage() {
    let h1 = HandlerBuilder::new("p.h1", StageId::Init).priority(Priority::HIGH).build(noop());
    let h2 = HandlerBuilder::new("p.h2", StageId::Init).priority(Priority::DEFAULT).build(noop());

    let seq = build(vec![h2, h1], false, false).unwrap();
    let names: Vec<_> = seq.stage(StageId::Init).iter().map(|h| h.qualified_name.clone()).collect();
    assert_eq!(names, vec!["p.h1", "p.h2"]);
}

#[test]
fn scenario_2_before_constraint_reorders() {
    let a = HandlerBuilder::new("p.a", StageId::Setup).name("a").priority(Priority::DEFAULT).build(noop());
    let b = HandlerBuilder::new("p.b", StageId::Setup)
        .name("b")
        .priority(Priority::DEFAULT)
        .before(["a"])
        .build(noop());

    let seq = build(vec![a, b], false, false).unwrap();
    let names: Vec<_> = seq.stage(StageId::Setup).iter().map(|h| h.name.clone()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn scenario_3_after_constraint_reorders_and_is_flagged() {
    let x = HandlerBuilder::new("p.x", StageId::Misc).name("x").priority(Priority::DEFAULT).build(noop());
    let y = HandlerBuilder::new("p.y", StageId::Misc)
        .name("y")
        .priority(Priority::HIGH)
        .after(["x"])
        .build(noop());

    // Initial priority order is [y, x] (HIGH < DEFAULT); the after pass then
    // moves y behind x, producing a recorded but non-fatal inversion.
    let seq = build(vec![x, y], false, false).unwrap();
    let names: Vec<_> = seq.stage(StageId::Misc).iter().map(|h| h.name.clone()).collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn scenario_3_inversion_is_fatal_when_fail_on_prio_override() {
    let x = HandlerBuilder::new("p.x", StageId::Misc).name("x").priority(Priority::DEFAULT).build(noop());
    let y = HandlerBuilder::new("p.y", StageId::Misc)
        .name("y")
        .priority(Priority::HIGH)
        .after(["x"])
        .build(noop());

    let err = build(vec![x, y], false, true).unwrap_err();
    assert!(matches!(err, SequenceError::PriorityInversion(_)));
}

#[test]
fn missing_before_after_target_is_not_a_constraint() {
    let a = HandlerBuilder::new("p.a", StageId::Setup)
        .name("a")
        .before(["does-not-exist"])
        .build(noop());
    let seq = build(vec![a], false, false).unwrap();
    assert_eq!(seq.stage(StageId::Setup).len(), 1);
}

#[test]
fn scenario_6_mutual_before_raises_build_loop_detected() {
    let a = HandlerBuilder::new("p.a", StageId::Setup).name("a").before(["b"]).build(noop());
    let b = HandlerBuilder::new("p.b", StageId::Setup).name("b").before(["a"]).build(noop());

    let err = build(vec![a, b], false, false).unwrap_err();
    assert!(matches!(err, SequenceError::BuildLoopDetected { .. }));
}

#[test]
fn build_is_deterministic_without_randomization() {
    let a = HandlerBuilder::new("p.a", StageId::Setup).name("a").build(noop());
    let b = HandlerBuilder::new("p.b", StageId::Setup).name("b").build(noop());

    let first = build(vec![a.clone(), b.clone()], false, false).unwrap();
    let second = build(vec![b, a], false, false).unwrap();

    let first_names: Vec<_> = first.stage(StageId::Setup).iter().map(|h| h.name.clone()).collect();
    let second_names: Vec<_> = second.stage(StageId::Setup).iter().map(|h| h.name.clone()).collect();
    assert_eq!(first_names, second_names);
}

#[tokio::test]
async fn scenario_4_abort_still_runs_cleanup_but_skips_a_later_ordinary_stage() {
    let mut ctx = Context::new();

    let abort = HandlerBuilder::new("p.abort", StageId::Setup).name("abort").build(Arc::new(Aborts));
    let later = HandlerBuilder::new("p.later", StageId::Programs)
        .name("later")
        .build(Arc::new(SetsFlag("LATER_RAN")));
    let cleanup = HandlerBuilder::new("p.cleanup", StageId::Cleanup)
        .name("cleanup")
        .build(Arc::new(SetsFlag("CLEANUP_RAN")));

    let seq = build(vec![abort, later, cleanup], false, false).unwrap();
    let err = run(&mut ctx, &seq).await.unwrap_err();

    assert!(matches!(err, SequenceError::Aborted { .. }));
    assert!(ctx.environment().is_error());
    assert!(ctx.environment().is_aborted());
    assert!(ctx.environment().get("LATER_RAN").is_none(), "Programs runs after the abort and is if_success-gated");
    assert_eq!(ctx.environment().get("CLEANUP_RAN").and_then(|v| v.as_bool()), Some(true));
}
