//! The kernel: the [`Context`](bootstrap::Context) façade that owns the
//! Environment Store, Provider Registry, plugin list and Notification Bus,
//! plus the shared constants and top-level error type every other module
//! aggregates into.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::Context;
pub use error::{Error, Result};