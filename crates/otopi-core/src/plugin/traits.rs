//! The plugin-side contract (§6, §9).
use crate::kernel::bootstrap::Context;
use crate::kernel::error::Result;

/// Core trait every plugin instance implements (§6). Registration happens at
/// construction time, not via runtime reflection: a plugin's `register`
/// method calls [`Context::register_event`], [`Context::register_dialog`]
/// etc. directly (§9 "Dynamic method collection").
pub trait Plugin: Send + Sync {
    /// Stable plugin identifier, used to build each handler's qualified name.
    fn id(&self) -> &str;

    fn version(&self) -> &str;

    /// Called once, immediately after the plugin is constructed by the
    /// loader. Registers handlers, and optionally providers, with `ctx`.
    fn register(&self, ctx: &mut Context) -> Result<()>;
}
