/// Application name, used in log banners and early-debug traces.
pub const APP_NAME: &str = "otopi";

/// Application version.
pub const APP_VERSION: &str = "1.0.0";

/// Current handler API version; checked against a plugin's declared compatible range.
pub const API_VERSION: &str = "1.0.0";

/// Group that is always appended to the requested plugin groups (§4.D).
pub const BASE_PLUGIN_GROUP: &str = "otopi";

/// Default plugin search path when none is configured.
pub const DEFAULT_PLUGIN_PATH: &str = "/usr/share/otopi/plugins";

/// Default plugin groups when none is configured.
pub const DEFAULT_PLUGIN_GROUPS: &str = "otopi";

/// Name of the module-definition marker file a plugin loader looks for under a
/// candidate directory; its presence means "load this directory as a plugin module".
pub const PLUGIN_MODULE_MARKER: &str = "plugin.toml";

/// Environment variable read once at context construction into `DEBUG` (§6).
pub const DEBUG_ENV_VAR: &str = "OTOPI_DEBUG";

/// Bound on the number of modifications a single before/after sub-pass may make
/// before the Sequence Builder considers the constraint set unsatisfiable (§4.F).
pub const SEQUENCE_BUILD_MAX_INNER_ITERATIONS: usize = 400;

/// Bound on the number of before/after alternation rounds the Sequence Builder
/// will run before giving up (§4.F).
pub const SEQUENCE_BUILD_MAX_OUTER_ITERATIONS: usize = 400;
