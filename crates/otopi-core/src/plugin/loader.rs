//! Plugin Loader (§4.D): walks `PLUGIN_PATH` looking for `plugin.toml`
//! module markers under the requested `PLUGIN_GROUPS`, and loads each one.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::kernel::constants::{BASE_PLUGIN_GROUP, PLUGIN_MODULE_MARKER};
use crate::plugin::error::PluginError;
use crate::plugin::ffi::{CreatePluginFn, VTablePlugin, CREATE_PLUGIN_SYMBOL};
use crate::plugin::manifest::PluginManifest;
use crate::plugin::traits::Plugin;

/// A module directory found during the walk, ready to be instantiated.
pub struct DiscoveredModule {
    pub module_name: String,
    pub directory: PathBuf,
    pub manifest: PluginManifest,
}

/// Parses `PLUGIN_PATH`/`PLUGIN_GROUPS` (colon-separated), walks each root
/// for the requested groups (always including the base group), and returns
/// every discovered module. Does not instantiate anything yet.
pub fn discover(plugin_path: &str, plugin_groups: &str) -> Result<Vec<DiscoveredModule>, PluginError> {
    let roots: Vec<&Path> = plugin_path.split(':').filter(|s| !s.is_empty()).map(Path::new).collect();
    let mut requested: HashSet<String> = plugin_groups.split(':').filter(|s| !s.is_empty()).map(String::from).collect();
    requested.insert(BASE_PLUGIN_GROUP.to_string());

    let mut found_groups: HashSet<String> = HashSet::new();
    let mut modules = Vec::new();

    for root in &roots {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !requested.contains(&name) {
                continue;
            }
            found_groups.insert(name.clone());
            walk_group(&path, &path, &name, &mut modules)?;
        }
    }

    let missing: Vec<String> = requested.difference(&found_groups).cloned().collect();
    if !missing.is_empty() {
        return Err(PluginError::MissingGroups(missing));
    }

    Ok(modules)
}

fn walk_group(
    group_root: &Path,
    dir: &Path,
    group: &str,
    modules: &mut Vec<DiscoveredModule>,
) -> Result<(), PluginError> {
    if dir.join(PLUGIN_MODULE_MARKER).is_file() {
        let module_name = synthesize_module_name(group_root, dir, group);
        let manifest = read_manifest(dir)?;
        check_api_compatibility(&manifest)?;
        modules.push(DiscoveredModule { module_name, directory: dir.to_path_buf(), manifest });
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|source| PluginError::Io { path: dir.to_path_buf(), source })?;
    for entry in entries {
        let entry = entry.map_err(|source| PluginError::Io { path: dir.to_path_buf(), source })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('_') || name.starts_with('.') {
            continue;
        }
        walk_group(group_root, &path, group, modules)?;
    }
    Ok(())
}

/// Checks a manifest's `api_version` requirement (e.g. `"1.x"`) against the
/// core's own `API_VERSION` using semver comparator syntax.
fn check_api_compatibility(manifest: &PluginManifest) -> Result<(), PluginError> {
    let req_str = manifest.api_version.replace(['x', 'X'], "*");
    let req = semver::VersionReq::parse(&req_str).map_err(|_| PluginError::ApiVersionMismatch {
        id: manifest.id.clone(),
        declared: manifest.api_version.clone(),
        core: crate::kernel::constants::API_VERSION.to_string(),
    })?;
    let core_version = semver::Version::parse(crate::kernel::constants::API_VERSION).expect("API_VERSION is valid semver");
    if req.matches(&core_version) {
        Ok(())
    } else {
        Err(PluginError::ApiVersionMismatch {
            id: manifest.id.clone(),
            declared: manifest.api_version.clone(),
            core: crate::kernel::constants::API_VERSION.to_string(),
        })
    }
}

fn read_manifest(dir: &Path) -> Result<PluginManifest, PluginError> {
    let path = dir.join(PLUGIN_MODULE_MARKER);
    let contents = fs::read_to_string(&path).map_err(|source| PluginError::Io { path: path.clone(), source })?;
    PluginManifest::parse(&contents).map_err(|e| PluginError::MalformedManifest { path, message: e.to_string() })
}

/// `plugins.<group>.<relative-path-normalised>.<basename>` (§4.D), with any
/// character outside `[A-Za-z0-9._]` replaced by `_`.
fn synthesize_module_name(group_root: &Path, module_dir: &Path, group: &str) -> String {
    let relative = module_dir.strip_prefix(group_root).unwrap_or(module_dir);
    let basename = module_dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let relative_str = relative.to_string_lossy().replace(std::path::MAIN_SEPARATOR, ".");
    let raw = if relative_str.is_empty() || relative_str == basename {
        format!("plugins.{group}.{basename}")
    } else {
        format!("plugins.{group}.{relative_str}")
    };
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '_' { c } else { '_' })
        .collect()
}

/// Instantiates a discovered module into a `Box<dyn Plugin>`. For now every
/// module is dylib-backed (`entry_point` set); statically-linked plugins are
/// registered directly by the host binary and never go through the loader.
pub fn instantiate(module: &DiscoveredModule) -> Result<Box<dyn Plugin>, PluginError> {
    let entry_point = module.manifest.entry_point.as_ref().ok_or_else(|| PluginError::MissingEntryPoint {
        path: module.directory.clone(),
        symbol: "entry_point (manifest field)".to_string(),
    })?;
    let library_path = module.directory.join(entry_point);

    debug!("loading plugin module {} from {}", module.module_name, library_path.display());

    let library = unsafe { libloading::Library::new(&library_path) }
        .map_err(|source| PluginError::LibraryLoad { path: library_path.clone(), source })?;

    let create: libloading::Symbol<CreatePluginFn> = unsafe { library.get(CREATE_PLUGIN_SYMBOL) }.map_err(|source| {
        PluginError::LibraryLoad { path: library_path.clone(), source }
    })?;
    let create = *create;

    let handle = unsafe { create() };
    let plugin = unsafe { VTablePlugin::from_raw(handle, library, &library_path) }?;
    Ok(Box::new(plugin))
}
