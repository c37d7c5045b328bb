pub mod config;
pub mod environment;
pub mod handler;
pub mod kernel;
pub mod notify;
pub mod path;
pub mod plugin;
pub mod provider;
pub mod sequence;
pub mod stage;

pub use kernel::error::Error;
pub use kernel::Context;
pub use environment::Environment;
pub use handler::{HandlerBuilder, HandlerMetadata, HandlerMethod, Priority};
pub use plugin::Plugin;
pub use stage::StageId;
