//! Environment Store (§3, §4.A): the shared typed key/value map threaded
//! through every handler invocation.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::handler::Priority;

pub mod error;
#[cfg(test)]
mod tests;

pub use error::EnvironmentError;

/// Well-known environment keys (§3).
pub mod keys {
    pub const ERROR: &str = "ERROR";
    pub const ABORTED: &str = "ABORTED";
    pub const EXCEPTION_INFO: &str = "EXCEPTION_INFO";
    pub const EXIT_CODE: &str = "EXIT_CODE";
    pub const EXECUTION_DIRECTORY: &str = "EXECUTION_DIRECTORY";
    pub const SUPPRESS_ENVIRONMENT_KEYS: &str = "SUPPRESS_ENVIRONMENT_KEYS";
    pub const LOG: &str = "LOG";
    pub const PLUGIN_PATH: &str = "PLUGIN_PATH";
    pub const PLUGIN_GROUPS: &str = "PLUGIN_GROUPS";
    pub const DEBUG: &str = "DEBUG";
    pub const RANDOMIZE_EVENTS: &str = "RANDOMIZE_EVENTS";
    pub const FAIL_ON_PRIO_OVERRIDE: &str = "FAIL_ON_PRIO_OVERRIDE";
}

/// The distinguished failure kind that additionally sets `ABORTED` (§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    Abort,
    HandlerFault,
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExceptionKind::Abort => write!(f, "Abort"),
            ExceptionKind::HandlerFault => write!(f, "HandlerFault"),
        }
    }
}

/// A captured handler failure, appended to `EXCEPTION_INFO` (§4.G, §7).
#[derive(Debug, Clone)]
pub struct ExceptionRecord {
    pub kind: ExceptionKind,
    pub stage: String,
    pub message: String,
    pub stack_trace: String,
}

/// One entry of the `EXIT_CODE` sequence; highest priority wins (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCodeEntry {
    pub priority: Priority,
    pub code: i32,
}

pub const EXIT_CODE_SUCCESS: i32 = 0;

/// A dynamically-typed environment value (§9 "Dynamic typing of environment values").
#[derive(Debug, Clone)]
pub enum EnvValue {
    Bool(bool),
    Int(i64),
    Str(String),
    StringList(Vec<String>),
    StringSet(BTreeSet<String>),
    ExitCodes(Vec<ExitCodeEntry>),
    ExceptionInfo(Vec<ExceptionRecord>),
}

impl EnvValue {
    fn type_tag(&self) -> &'static str {
        match self {
            EnvValue::Bool(_) => "bool",
            EnvValue::Int(_) => "int",
            EnvValue::Str(_) => "string",
            EnvValue::StringList(_) => "list",
            EnvValue::StringSet(_) => "set",
            EnvValue::ExitCodes(_) => "exit_codes",
            EnvValue::ExceptionInfo(_) => "exception_info",
        }
    }

    /// Stringified payload, used both for the diagnostic dump and for diffing
    /// pre/post state (§4.A, §4.G). Two values compare equal for diffing
    /// purposes iff their `stringify()` outputs are equal.
    fn stringify(&self) -> String {
        match self {
            EnvValue::Bool(b) => b.to_string(),
            EnvValue::Int(i) => i.to_string(),
            EnvValue::Str(s) => s.clone(),
            EnvValue::StringList(l) => l.join(","),
            EnvValue::StringSet(s) => s.iter().cloned().collect::<Vec<_>>().join(","),
            EnvValue::ExitCodes(entries) => entries
                .iter()
                .map(|e| format!("{}:{}", e.priority, e.code))
                .collect::<Vec<_>>()
                .join(","),
            EnvValue::ExceptionInfo(infos) => infos
                .iter()
                .map(|e| format!("{}:{}", e.kind, e.message))
                .collect::<Vec<_>>()
                .join(";"),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnvValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            EnvValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_string_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            EnvValue::StringSet(s) => Some(s),
            _ => None,
        }
    }
}

/// The Environment Store (§4.A). Single-threaded by construction (§5): no
/// per-key locking.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: BTreeMap<String, EnvValue>,
}

impl Environment {
    /// A fresh store populated with the §3 defaults.
    pub fn new() -> Self {
        let mut env = Environment { values: BTreeMap::new() };
        env.values.insert(keys::ERROR.into(), EnvValue::Bool(false));
        env.values.insert(keys::ABORTED.into(), EnvValue::Bool(false));
        env.values.insert(keys::EXCEPTION_INFO.into(), EnvValue::ExceptionInfo(Vec::new()));
        env.values.insert(
            keys::EXIT_CODE.into(),
            EnvValue::ExitCodes(vec![ExitCodeEntry { priority: Priority::after_last(), code: EXIT_CODE_SUCCESS }]),
        );
        env.values.insert(keys::EXECUTION_DIRECTORY.into(), EnvValue::Str(".".into()));
        env.values.insert(keys::SUPPRESS_ENVIRONMENT_KEYS.into(), EnvValue::StringSet(BTreeSet::new()));
        env.values.insert(keys::LOG.into(), EnvValue::Bool(false));
        env.values.insert(
            keys::PLUGIN_PATH.into(),
            EnvValue::Str(crate::kernel::constants::DEFAULT_PLUGIN_PATH.into()),
        );
        env.values.insert(
            keys::PLUGIN_GROUPS.into(),
            EnvValue::Str(crate::kernel::constants::DEFAULT_PLUGIN_GROUPS.into()),
        );
        let debug = std::env::var(crate::kernel::constants::DEBUG_ENV_VAR)
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0);
        env.values.insert(keys::DEBUG.into(), EnvValue::Int(debug));
        env.values.insert(keys::RANDOMIZE_EVENTS.into(), EnvValue::Bool(false));
        env.values.insert(keys::FAIL_ON_PRIO_OVERRIDE.into(), EnvValue::Bool(false));
        env
    }

    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: EnvValue) {
        self.values.insert(key.into(), value);
    }

    /// "If absent, install this value" — used pervasively by plugins at the
    /// `Init` stage to declare defaults without overriding caller-supplied
    /// values (§4.A).
    pub fn setdefault(&mut self, key: impl Into<String>, value: EnvValue) {
        self.values.entry(key.into()).or_insert(value);
    }

    pub fn iterate(&self) -> impl Iterator<Item = (&String, &EnvValue)> {
        self.values.iter()
    }

    pub fn is_error(&self) -> bool {
        self.get(keys::ERROR).and_then(EnvValue::as_bool).unwrap_or(false)
    }

    /// Sets `ERROR`. Monotone: never clears it once set (§3 invariant).
    pub fn set_error(&mut self) {
        self.values.insert(keys::ERROR.into(), EnvValue::Bool(true));
    }

    pub fn is_aborted(&self) -> bool {
        self.get(keys::ABORTED).and_then(EnvValue::as_bool).unwrap_or(false)
    }

    pub fn set_aborted(&mut self) {
        self.values.insert(keys::ABORTED.into(), EnvValue::Bool(true));
    }

    /// Appends a captured failure and sets `ERROR` (and `ABORTED` for Abort
    /// kind failures), preserving the §3 invariant that `EXCEPTION_INFO`
    /// length ≥ 1 implies `ERROR`.
    pub fn push_exception(&mut self, record: ExceptionRecord) {
        let is_abort = record.kind == ExceptionKind::Abort;
        match self.values.entry(keys::EXCEPTION_INFO.into()).or_insert_with(|| EnvValue::ExceptionInfo(Vec::new())) {
            EnvValue::ExceptionInfo(list) => list.push(record),
            _ => unreachable!("EXCEPTION_INFO is always an ExceptionInfo value"),
        }
        self.set_error();
        if is_abort {
            self.set_aborted();
        }
    }

    pub fn exceptions(&self) -> &[ExceptionRecord] {
        match self.get(keys::EXCEPTION_INFO) {
            Some(EnvValue::ExceptionInfo(list)) => list,
            _ => &[],
        }
    }

    pub fn first_exception(&self) -> Option<&ExceptionRecord> {
        self.exceptions().first()
    }

    /// The highest-priority `EXIT_CODE` entry's code (§3).
    pub fn exit_code(&self) -> i32 {
        match self.get(keys::EXIT_CODE) {
            Some(EnvValue::ExitCodes(entries)) => entries
                .iter()
                .max_by_key(|e| e.priority)
                .map(|e| e.code)
                .unwrap_or(EXIT_CODE_SUCCESS),
            _ => EXIT_CODE_SUCCESS,
        }
    }

    pub fn push_exit_code(&mut self, priority: Priority, code: i32) {
        match self.values.entry(keys::EXIT_CODE.into()).or_insert_with(|| EnvValue::ExitCodes(Vec::new())) {
            EnvValue::ExitCodes(list) => list.push(ExitCodeEntry { priority, code }),
            _ => unreachable!("EXIT_CODE is always an ExitCodes value"),
        }
    }

    pub fn execution_directory(&self) -> String {
        self.get(keys::EXECUTION_DIRECTORY).and_then(EnvValue::as_str).unwrap_or(".").to_string()
    }

    fn is_suppressed(&self, key: &str) -> bool {
        self.get(keys::SUPPRESS_ENVIRONMENT_KEYS)
            .and_then(EnvValue::as_string_set)
            .map(|s| s.contains(key))
            .unwrap_or(false)
    }

    /// Adds a key to the redaction set used by diagnostic dumps (§4.G scenario 5).
    pub fn suppress_key(&mut self, key: impl Into<String>) {
        match self
            .values
            .entry(keys::SUPPRESS_ENVIRONMENT_KEYS.into())
            .or_insert_with(|| EnvValue::StringSet(BTreeSet::new()))
        {
            EnvValue::StringSet(set) => {
                set.insert(key.into());
            }
            _ => unreachable!("SUPPRESS_ENVIRONMENT_KEYS is always a StringSet value"),
        }
    }

    /// A displayable `ENV key=type:'value'` line, redacting the value if
    /// `key` is in the suppression set. Used both as a standalone dump line
    /// and as the unit the diff in [`Environment::diff`] produces.
    fn dump_line(&self, key: &str, value: &EnvValue) -> String {
        let rendered = if self.is_suppressed(key) { "***".to_string() } else { value.stringify() };
        format!("ENV {}={}:'{}'", key, value.type_tag(), rendered)
    }

    /// Full diagnostic dump of every key, sorted for determinism (§4.A).
    pub fn dump(&self) -> Vec<String> {
        self.values.iter().map(|(k, v)| self.dump_line(k, v)).collect()
    }

    /// The environment diff between `old` (a snapshot taken before a handler
    /// ran) and `self` (the state after): one `ENV` line per key whose
    /// stringified value differs or is newly present (§4.G, §8 invariant).
    pub fn diff(&self, old: &Environment) -> Vec<String> {
        let mut lines = Vec::new();
        for (key, value) in self.values.iter() {
            let changed = match old.values.get(key) {
                Some(prev) => prev.stringify() != value.stringify(),
                None => true,
            };
            if changed {
                lines.push(self.dump_line(key, value));
            }
        }
        lines
    }
}
