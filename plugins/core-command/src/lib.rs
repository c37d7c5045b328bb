//! External command resolution: searches `COMMAND_PATH` for the set of
//! well-known system commands otopi plugins rely on, and exposes them
//! through the Command provider slot (§4.E).
//!
//! Grounded in the reference `command.py` plugin: register as the Command
//! provider at `Init` (high priority), then search for each enumerated
//! command at `Programs`, and again at `Misc` (in case earlier stages
//! installed packages that provide one).
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use otopi_core::environment::EnvValue;
use otopi_core::handler::{HandlerBuilder, HandlerMethod, Priority};
use otopi_core::kernel::bootstrap::Context;
use otopi_core::kernel::error::Result;
use otopi_core::plugin::Plugin;
use otopi_core::provider::{Command, ProviderError};
use otopi_core::stage::StageId;

pub const COMMAND_PATH_KEY: &str = "COMMAND_PATH";
pub const DEFAULT_COMMAND_PATH: &str = "/usr/bin:/bin:/usr/sbin:/sbin:/usr/local/bin:/usr/local/sbin";

/// Commands every plugin in this distribution may want resolved. A real
/// deployment would let plugins declare these dynamically; the original's
/// `command.enum()` registration hook is simplified here to a fixed list.
const WELL_KNOWN_COMMANDS: &[&str] = &["rpm", "yum", "dnf", "systemctl", "service"];

#[derive(Default)]
pub struct SearchingCommand {
    resolved: HashMap<String, PathBuf>,
}

impl Command for SearchingCommand {
    fn enumerate(&self) -> Vec<String> {
        WELL_KNOWN_COMMANDS.iter().map(|s| s.to_string()).collect()
    }

    fn set(&mut self, name: &str, path: PathBuf) {
        self.resolved.insert(name.to_string(), path);
    }

    fn get(&self, name: &str, optional: bool) -> std::result::Result<Option<PathBuf>, ProviderError> {
        match self.resolved.get(name) {
            Some(path) => Ok(Some(path.clone())),
            None if optional => Ok(None),
            None => Err(ProviderError::CommandNotFound(name.to_string())),
        }
    }
}

fn search_path(ctx: &mut Context) {
    let search_path = ctx
        .environment()
        .get(COMMAND_PATH_KEY)
        .and_then(EnvValue::as_str)
        .unwrap_or(DEFAULT_COMMAND_PATH)
        .to_string();
    let roots: Vec<&str> = search_path.split(':').collect();

    for name in ctx.command().enumerate() {
        if ctx.command().get(&name, true).ok().flatten().is_some() {
            continue;
        }
        for root in &roots {
            let candidate = Path::new(root).join(&name);
            if candidate.exists() {
                debug!("resolved command {name} -> {}", candidate.display());
                ctx.command_mut().set(&name, candidate);
                break;
            }
        }
    }
}

struct InitHandler;
#[async_trait]
impl HandlerMethod for InitHandler {
    async fn call(&self, ctx: &mut Context) -> Result<()> {
        ctx.environment_mut().setdefault(COMMAND_PATH_KEY, EnvValue::Str(DEFAULT_COMMAND_PATH.to_string()));
        ctx.register_command(Box::new(SearchingCommand::default()));
        Ok(())
    }
}

struct SearchHandler;
#[async_trait]
impl HandlerMethod for SearchHandler {
    async fn call(&self, ctx: &mut Context) -> Result<()> {
        search_path(ctx);
        Ok(())
    }
}

#[derive(Default)]
pub struct CommandPlugin;

impl Plugin for CommandPlugin {
    fn id(&self) -> &str {
        "otopi.system.command"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn register(&self, ctx: &mut Context) -> Result<()> {
        ctx.register_event(
            HandlerBuilder::new("otopi.system.command.init", StageId::Init)
                .priority(Priority::HIGH)
                .build(Arc::new(InitHandler)),
        );
        ctx.register_event(
            HandlerBuilder::new("otopi.system.command.detect", StageId::Programs)
                .name("system-command-detection")
                .build(Arc::new(SearchHandler)),
        );
        ctx.register_event(
            HandlerBuilder::new("otopi.system.command.redetect", StageId::Misc)
                .name("system-command-redetection")
                .priority(Priority::HIGH)
                .build(Arc::new(SearchHandler)),
        );
        Ok(())
    }
}
