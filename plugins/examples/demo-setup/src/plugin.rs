//! Demonstrates `before`/`after` ordering end-to-end: three handlers in
//! `Setup` whose qualified names force a different initial tie-break than
//! their intended execution order, corrected only by the repair passes.
use std::sync::Arc;

use async_trait::async_trait;

use otopi_core::environment::EnvValue;
use otopi_core::handler::{HandlerBuilder, HandlerMethod};
use otopi_core::kernel::bootstrap::Context;
use otopi_core::kernel::error::Result;
use otopi_core::plugin::Plugin;
use otopi_core::stage::StageId;

const ORDER_KEY: &str = "DEMO_SETUP_ORDER";

fn record(ctx: &mut Context, name: &str) {
    let mut order = match ctx.environment().get(ORDER_KEY) {
        Some(EnvValue::StringList(list)) => list.clone(),
        _ => Vec::new(),
    };
    order.push(name.to_string());
    ctx.environment_mut().set(ORDER_KEY, EnvValue::StringList(order));
}

macro_rules! recorder {
    ($name:ident, $label:expr) => {
        struct $name;
        #[async_trait]
        impl HandlerMethod for $name {
            async fn call(&self, ctx: &mut Context) -> Result<()> {
                record(ctx, $label);
                Ok(())
            }
        }
    };
}

recorder!(First, "first");
recorder!(Second, "second");
recorder!(Third, "third");

#[derive(Default)]
pub struct DemoSetupPlugin;

impl Plugin for DemoSetupPlugin {
    fn id(&self) -> &str {
        "demo.setup"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn register(&self, ctx: &mut Context) -> Result<()> {
        // Qualified names are deliberately out of alphabetical target order
        // (third, first, second) so the initial name-sorted tie-break does
        // NOT already land on [first, second, third]; the before/after
        // repair passes are what actually produce that order here, not the
        // initial sort.
        ctx.register_event(
            HandlerBuilder::new("demo.setup.01_third", StageId::Setup)
                .name("third")
                .after(["second"])
                .build(Arc::new(Third)),
        );
        ctx.register_event(
            HandlerBuilder::new("demo.setup.02_first", StageId::Setup)
                .name("first")
                .before(["second"])
                .build(Arc::new(First)),
        );
        ctx.register_event(
            HandlerBuilder::new("demo.setup.03_second", StageId::Setup)
                .name("second")
                .build(Arc::new(Second)),
        );
        Ok(())
    }
}
