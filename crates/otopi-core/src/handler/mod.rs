//! Handler metadata (§3, §4.F) and the priority scale handlers are ordered by.
//!
//! A [`HandlerMetadata`] record is produced once, at plugin-registration time,
//! by a plugin instance calling [`crate::kernel::bootstrap::Context::register_event`].
//! It is never mutated after the Sequence Builder consumes it.
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::kernel::error::Result;
use crate::kernel::bootstrap::Context;
use crate::stage::StageId;

#[cfg(test)]
mod tests;

/// Ordered priority scale; lower values sort earlier (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

impl Priority {
    pub const FIRST: Priority = Priority(0);
    pub const HIGH: Priority = Priority(10);
    pub const MEDIUM: Priority = Priority(20);
    pub const DEFAULT: Priority = Priority(30);
    pub const POST: Priority = Priority(40);
    pub const LOW: Priority = Priority(50);
    pub const LAST: Priority = Priority(60);

    /// One past [`Priority::LAST`]; used as the default `EXIT_CODE` entry's
    /// priority so any plugin-contributed exit code outranks it (§3).
    pub fn after_last() -> Priority {
        Priority(Priority::LAST.0 + 1)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A handler's fully-qualified name, used for the tie-break sort (§4.F.1) and
/// as the unit matched by `before`/`after` targets. Mirrors "module + class +
/// method" from the source system; here it's "plugin-id.method-name".
pub fn qualified_method_name(plugin_id: &str, method_name: &str) -> String {
    format!("{}.{}", plugin_id, method_name)
}

/// A handler's bound, invocable body. Plugins implement this (typically via a
/// closure-capturing struct) and hand an `Arc<dyn HandlerMethod>` to
/// `register_event`; the registry, not the handler record, owns the plugin
/// instance it closes over.
#[async_trait]
pub trait HandlerMethod: Send + Sync {
    /// Evaluated before `call`; a false result silently skips the handler (§4.G).
    async fn condition(&self, _ctx: &Context) -> bool {
        true
    }

    /// Invoke the handler body. Failures are captured by the runner, not propagated.
    async fn call(&self, ctx: &mut Context) -> Result<()>;
}

/// Immutable per-handler record (§3).
#[derive(Clone)]
pub struct HandlerMetadata {
    /// Fully-qualified name used for the initial tie-break sort.
    pub qualified_name: String,
    /// Symbolic name; empty string permitted. Target of other handlers' before/after.
    pub name: String,
    pub stage: StageId,
    pub priority: Priority,
    pub before: HashSet<String>,
    pub after: HashSet<String>,
    pub method: Arc<dyn HandlerMethod>,
}

impl fmt::Debug for HandlerMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMetadata")
            .field("qualified_name", &self.qualified_name)
            .field("name", &self.name)
            .field("stage", &self.stage)
            .field("priority", &self.priority)
            .field("before", &self.before)
            .field("after", &self.after)
            .finish()
    }
}

/// Builder used by plugins inside their construction/registration step to
/// assemble a [`HandlerMetadata`] without reflection (§9 "Dynamic method
/// collection"). Defaults match §6: `priority = DEFAULT`, `name = ""`,
/// `before = after = ∅`.
pub struct HandlerBuilder {
    qualified_name: String,
    name: String,
    stage: StageId,
    priority: Priority,
    before: HashSet<String>,
    after: HashSet<String>,
}

impl HandlerBuilder {
    pub fn new(qualified_name: impl Into<String>, stage: StageId) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            name: String::new(),
            stage,
            priority: Priority::DEFAULT,
            before: HashSet::new(),
            after: HashSet::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn before(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.before.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn after(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.after.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self, method: Arc<dyn HandlerMethod>) -> HandlerMetadata {
        HandlerMetadata {
            qualified_name: self.qualified_name,
            name: self.name,
            stage: self.stage,
            priority: self.priority,
            before: self.before,
            after: self.after,
            method,
        }
    }
}
