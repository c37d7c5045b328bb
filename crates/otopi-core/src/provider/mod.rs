//! Provider Registry (§3, §4.E): four named single-slots a plugin can
//! overwrite during the `Init` stage. Last write wins; there is no versioning.
use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[cfg(test)]
mod tests;

#[derive(Debug, ThisError)]
pub enum ProviderError {
    #[error("required command '{0}' was not resolved")]
    CommandNotFound(String),
}

/// Dialog provider contract (§6): ask/note/confirm. The base implementation
/// is silent, matching "base (no-op / abstract) provider" (§4.E).
pub trait Dialog: Send + Sync {
    fn note(&self, message: &str) {
        let _ = message;
    }
    fn ask(&self, _question: &str) -> Option<String> {
        None
    }
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}

pub struct BaseDialog;
impl Dialog for BaseDialog {}

/// Services provider contract (§6): start/stop/status over a host's service
/// manager.
pub trait Services: Send + Sync {
    fn start(&self, _name: &str) -> bool {
        false
    }
    fn stop(&self, _name: &str) -> bool {
        false
    }
    fn status(&self, _name: &str) -> bool {
        false
    }
}

pub struct BaseServices;
impl Services for BaseServices {}

/// Packager provider contract (§6): install/update/query over a package
/// manager.
pub trait Packager: Send + Sync {
    fn install(&self, _packages: &[String]) -> bool {
        false
    }
    fn update(&self, _packages: &[String]) -> bool {
        false
    }
    fn query(&self, _package: &str) -> bool {
        false
    }
}

pub struct BasePackager;
impl Packager for BasePackager {}

/// Command provider contract (§6), grounded in the reference `command.py`
/// plugin: `enum()` lists required external command names, `set` records a
/// resolved absolute path, `get` returns it or fails if required and missing.
pub trait Command: Send + Sync {
    fn enumerate(&self) -> Vec<String> {
        Vec::new()
    }
    fn set(&mut self, name: &str, path: PathBuf);
    fn get(&self, name: &str, optional: bool) -> Result<Option<PathBuf>, ProviderError>;
}

#[derive(Default)]
pub struct BaseCommand {
    resolved: HashMap<String, PathBuf>,
}

impl Command for BaseCommand {
    fn set(&mut self, name: &str, path: PathBuf) {
        self.resolved.insert(name.to_string(), path);
    }

    fn get(&self, name: &str, optional: bool) -> Result<Option<PathBuf>, ProviderError> {
        match self.resolved.get(name) {
            Some(path) => Ok(Some(path.clone())),
            None if optional => Ok(None),
            None => Err(ProviderError::CommandNotFound(name.to_string())),
        }
    }
}

/// The Provider Registry (§4.E): one slot per role, each pre-populated with a
/// base provider at construction.
pub struct ProviderRegistry {
    dialog: Box<dyn Dialog>,
    services: Box<dyn Services>,
    packager: Box<dyn Packager>,
    command: Box<dyn Command>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            dialog: Box::new(BaseDialog),
            services: Box::new(BaseServices),
            packager: Box::new(BasePackager),
            command: Box::new(BaseCommand::default()),
        }
    }

    pub fn register_dialog(&mut self, provider: Box<dyn Dialog>) {
        self.dialog = provider;
    }

    pub fn register_services(&mut self, provider: Box<dyn Services>) {
        self.services = provider;
    }

    pub fn register_packager(&mut self, provider: Box<dyn Packager>) {
        self.packager = provider;
    }

    pub fn register_command(&mut self, provider: Box<dyn Command>) {
        self.command = provider;
    }

    pub fn dialog(&self) -> &dyn Dialog {
        self.dialog.as_ref()
    }

    pub fn services(&self) -> &dyn Services {
        self.services.as_ref()
    }

    pub fn packager(&self) -> &dyn Packager {
        self.packager.as_ref()
    }

    pub fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }

    pub fn command_mut(&mut self) -> &mut dyn Command {
        self.command.as_mut()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
