use crate::handler::{qualified_method_name, HandlerBuilder, Priority};
use crate::stage::StageId;

#[test]
fn priority_ordering_matches_scale() {
    assert!(Priority::FIRST < Priority::HIGH);
    assert!(Priority::HIGH < Priority::MEDIUM);
    assert!(Priority::MEDIUM < Priority::DEFAULT);
    assert!(Priority::DEFAULT < Priority::POST);
    assert!(Priority::POST < Priority::LOW);
    assert!(Priority::LOW < Priority::LAST);
    assert!(Priority::LAST < Priority::after_last());
}

#[test]
fn qualified_method_name_joins_plugin_and_method() {
    assert_eq!(qualified_method_name("otopi.core", "setup"), "otopi.core.setup");
}

#[test]
fn builder_defaults_match_declared_defaults() {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::kernel::bootstrap::Context;
    use crate::kernel::error::Result;

    struct NoOp;
    #[async_trait]
    impl crate::handler::HandlerMethod for NoOp {
        async fn call(&self, _ctx: &mut Context) -> Result<()> {
            Ok(())
        }
    }

    let metadata = HandlerBuilder::new("otopi.core.setup", StageId::Setup).build(Arc::new(NoOp));
    assert_eq!(metadata.priority, Priority::DEFAULT);
    assert_eq!(metadata.name, "");
    assert!(metadata.before.is_empty());
    assert!(metadata.after.is_empty());
}

#[test]
fn builder_before_after_accumulate() {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::kernel::bootstrap::Context;
    use crate::kernel::error::Result;

    struct NoOp;
    #[async_trait]
    impl crate::handler::HandlerMethod for NoOp {
        async fn call(&self, _ctx: &mut Context) -> Result<()> {
            Ok(())
        }
    }

    let metadata = HandlerBuilder::new("otopi.core.setup", StageId::Setup)
        .before(["a", "b"])
        .after(["c"])
        .build(Arc::new(NoOp));
    assert_eq!(metadata.before.len(), 2);
    assert_eq!(metadata.after.len(), 1);
}
