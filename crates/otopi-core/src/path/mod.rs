//! Path Resolver (§4.I).
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests;

/// `resolveFile(p)`: `None` passes through unchanged; an absolute path passes
/// through unchanged; otherwise `execution_directory` is joined with `p`
/// using OS path rules (§4.I).
///
/// Idempotent: `resolve_file(execution_directory, resolve_file(execution_directory, p))`
/// equals `resolve_file(execution_directory, p)` for any `p`, since the
/// result is always either `None` or an absolute path (§8).
pub fn resolve_file(execution_directory: &str, p: Option<&str>) -> Option<PathBuf> {
    let p = p?;
    let path = Path::new(p);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(Path::new(execution_directory).join(path))
    }
}
