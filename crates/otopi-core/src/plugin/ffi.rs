//! C-ABI bridge for plugins loaded from a dynamic library (§4.D, §6).
//!
//! A plugin module's `entry_point` dylib exposes one exported symbol,
//! [`CREATE_PLUGIN_SYMBOL`], with signature [`CreatePluginFn`]. It must
//! return an owning [`RawPluginHandle`] pairing an opaque instance pointer
//! with a [`PluginVTable`] of function pointers — not a `Box<dyn Plugin>`,
//! since a trait object's layout isn't guaranteed stable across the crate
//! boundary a dynamically loaded library crosses.
use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::path::Path;

use crate::kernel::bootstrap::Context;
use crate::kernel::error::{Error, Result};
use crate::plugin::error::PluginError;
use crate::plugin::traits::Plugin;

/// Name of the exported entry-point symbol every plugin dylib must provide.
pub const CREATE_PLUGIN_SYMBOL: &[u8] = b"otopi_create_plugin";

#[repr(C)]
pub struct PluginVTable {
    pub id: extern "C" fn(*const c_void) -> *const c_char,
    pub version: extern "C" fn(*const c_void) -> *const c_char,
    pub register: extern "C" fn(*const c_void, *mut Context) -> i32,
    pub destroy: extern "C" fn(*mut c_void),
}

#[repr(C)]
pub struct RawPluginHandle {
    pub data: *mut c_void,
    pub vtable: *const PluginVTable,
}

pub type CreatePluginFn = unsafe extern "C" fn() -> *mut RawPluginHandle;

struct UnsafeVTablePtr(*const PluginVTable);
unsafe impl Send for UnsafeVTablePtr {}
unsafe impl Sync for UnsafeVTablePtr {}

/// Wraps a dylib-loaded plugin instance behind the safe [`Plugin`] trait.
/// Caches `id`/`version` at load time so the trait's `&str` accessors never
/// need to cross the FFI boundary again.
pub struct VTablePlugin {
    data: *mut c_void,
    vtable: UnsafeVTablePtr,
    id_cache: String,
    version_cache: String,
    // Kept alive for as long as the plugin instance is; dropped (and the
    // library unloaded) after `data`'s destructor runs, since `Drop` fields
    // run in declaration order.
    _library: libloading::Library,
}

unsafe impl Send for VTablePlugin {}
unsafe impl Sync for VTablePlugin {}

impl VTablePlugin {
    /// # Safety
    /// `handle` must have been produced by a [`CreatePluginFn`] exported from
    /// `library`, and ownership of the handle (and the instance it
    /// describes) transfers to the returned `VTablePlugin`.
    pub unsafe fn from_raw(
        handle: *mut RawPluginHandle,
        library: libloading::Library,
        path: &Path,
    ) -> std::result::Result<Self, PluginError> {
        if handle.is_null() {
            return Err(PluginError::RegistrationFailed {
                id: path.display().to_string(),
                message: "entry point returned a null plugin handle".to_string(),
            });
        }
        let handle = Box::from_raw(handle);
        let vtable_ref = &*handle.vtable;
        let id_cache = c_str_to_string((vtable_ref.id)(handle.data), path)?;
        let version_cache = c_str_to_string((vtable_ref.version)(handle.data), path)?;
        Ok(Self {
            data: handle.data,
            vtable: UnsafeVTablePtr(handle.vtable),
            id_cache,
            version_cache,
            _library: library,
        })
    }
}

fn c_str_to_string(ptr: *const c_char, path: &Path) -> std::result::Result<String, PluginError> {
    if ptr.is_null() {
        return Err(PluginError::RegistrationFailed {
            id: path.display().to_string(),
            message: "plugin vtable returned a null string".to_string(),
        });
    }
    Ok(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

impl Drop for VTablePlugin {
    fn drop(&mut self) {
        unsafe {
            ((*self.vtable.0).destroy)(self.data);
        }
    }
}

impl Plugin for VTablePlugin {
    fn id(&self) -> &str {
        &self.id_cache
    }

    fn version(&self) -> &str {
        &self.version_cache
    }

    fn register(&self, ctx: &mut Context) -> Result<()> {
        let code = unsafe { ((*self.vtable.0).register)(self.data, ctx as *mut Context) };
        if code == 0 {
            Ok(())
        } else {
            Err(Error::Plugin(PluginError::RegistrationFailed {
                id: self.id_cache.clone(),
                message: format!("register() returned non-zero status {code}"),
            }))
        }
    }
}
