//! Context (§4.J, ambient): the single façade struct a plugin's `register`
//! method and the CLI entry point both drive. Owns the Environment Store,
//! the Provider Registry, the plugin instance list, the pending (not yet
//! built) handler metadata, the built Sequence once it exists, and the
//! Notification Bus.
use std::path::PathBuf;

use log::info;

use crate::config::Config;
use crate::environment::{keys, EnvValue, Environment};
use crate::handler::HandlerMetadata;
use crate::kernel::error::{Error, Result};
use crate::notify::{Listener, ListenerId, NotificationBus, NotifyEvent};
use crate::plugin::{Plugin, PluginRegistry};
use crate::provider::{Command, Dialog, Packager, ProviderRegistry, Services};
use crate::sequence::{self, Sequence};


pub struct Context {
    environment: Environment,
    providers: ProviderRegistry,
    plugins: PluginRegistry,
    pending_handlers: Vec<HandlerMetadata>,
    sequence: Option<Sequence>,
    notifications: NotificationBus,
}

impl Context {
    /// Builds a fresh context with the §3 environment defaults installed and
    /// the base providers in place. Matches §4.J: "construction reads the
    /// initial environment defaults, then applies Configuration Loader
    /// overrides before any plugin is loaded."
    pub fn new() -> Self {
        info!("{} v{}: constructing context", crate::kernel::constants::APP_NAME, crate::kernel::constants::APP_VERSION);
        Self {
            environment: Environment::new(),
            providers: ProviderRegistry::new(),
            plugins: PluginRegistry::new(),
            pending_handlers: Vec::new(),
            sequence: None,
            notifications: NotificationBus::new(),
        }
    }

    /// Applies an already-parsed config's overrides (§4.K). Must be called
    /// before [`Context::load_plugins`].
    pub fn apply_config(&mut self, config: &Config) {
        config.apply_to_environment(&mut self.environment);
    }

    /// Convenience wrapper: load and apply a config file in one call.
    pub fn load_config_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let config = Config::load_from_file(path)?;
        self.apply_config(&config);
        Ok(())
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// §4.I: resolves a path against `EXECUTION_DIRECTORY`.
    pub fn resolve_file(&self, p: Option<&str>) -> Option<PathBuf> {
        crate::path::resolve_file(&self.environment.execution_directory(), p)
    }

    pub fn dialog(&self) -> &dyn Dialog {
        self.providers.dialog()
    }

    pub fn services(&self) -> &dyn Services {
        self.providers.services()
    }

    pub fn packager(&self) -> &dyn Packager {
        self.providers.packager()
    }

    pub fn command(&self) -> &dyn Command {
        self.providers.command()
    }

    pub fn command_mut(&mut self) -> &mut dyn Command {
        self.providers.command_mut()
    }

    pub fn register_dialog(&mut self, provider: Box<dyn Dialog>) {
        self.providers.register_dialog(provider);
    }

    pub fn register_services(&mut self, provider: Box<dyn Services>) {
        self.providers.register_services(provider);
    }

    pub fn register_packager(&mut self, provider: Box<dyn Packager>) {
        self.providers.register_packager(provider);
    }

    pub fn register_command(&mut self, provider: Box<dyn Command>) {
        self.providers.register_command(provider);
    }

    /// A plugin's `register` method calls this once per handler it
    /// contributes (§9 "Dynamic method collection" re-architected as
    /// registration at construction time).
    pub fn register_event(&mut self, handler: HandlerMetadata) {
        self.pending_handlers.push(handler);
    }

    pub fn register_notification(&mut self, listener: Box<dyn Listener>) -> ListenerId {
        self.notifications.register(listener)
    }

    pub(crate) async fn notify(&self, event: NotifyEvent) -> std::result::Result<(), crate::notify::NotificationError> {
        self.notifications.notify(event).await
    }

    /// Runs the Plugin Loader (§4.D): discovers every module under
    /// `PLUGIN_PATH`/`PLUGIN_GROUPS`, instantiates it, calls its `register`
    /// method, then adds it to the plugin list (§4.E).
    pub fn load_plugins(&mut self) -> Result<()> {
        let plugin_path = self
            .environment
            .get(keys::PLUGIN_PATH)
            .and_then(EnvValue::as_str)
            .unwrap_or(crate::kernel::constants::DEFAULT_PLUGIN_PATH)
            .to_string();
        let plugin_groups = self
            .environment
            .get(keys::PLUGIN_GROUPS)
            .and_then(EnvValue::as_str)
            .unwrap_or(crate::kernel::constants::DEFAULT_PLUGIN_GROUPS)
            .to_string();

        let modules = crate::plugin::loader::discover(&plugin_path, &plugin_groups)?;
        for module in &modules {
            let plugin = crate::plugin::loader::instantiate(module)?;
            self.register_plugin(plugin)?;
        }
        Ok(())
    }

    /// Registers an already-instantiated plugin directly, bypassing the
    /// on-disk loader. Used both by [`Context::load_plugins`] and by hosts
    /// that link core plugins in statically (§6, §4.D note on
    /// statically-linked plugins).
    pub fn register_plugin(&mut self, plugin: Box<dyn Plugin>) -> Result<()> {
        plugin.register(self)?;
        self.plugins.register(plugin);
        Ok(())
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Runs the Sequence Builder (§4.F) over every handler registered so
    /// far.
    pub fn build_sequence(&mut self) -> Result<()> {
        let randomize = self.environment.get(keys::RANDOMIZE_EVENTS).and_then(EnvValue::as_bool).unwrap_or(false);
        let fail_on_prio_override =
            self.environment.get(keys::FAIL_ON_PRIO_OVERRIDE).and_then(EnvValue::as_bool).unwrap_or(false);
        let handlers = std::mem::take(&mut self.pending_handlers);
        let built = sequence::build(handlers, randomize, fail_on_prio_override)?;
        self.sequence = Some(built);
        Ok(())
    }

    /// Runs the Sequence Runner (§4.G) over the previously built sequence.
    pub async fn run_sequence(&mut self) -> Result<()> {
        let built = self.sequence.take().ok_or_else(|| Error::Other("sequence not built".to_string()))?;
        let result = sequence::run(self, &built).await;
        self.sequence = Some(built);
        result.map_err(Error::from)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
