use clap::Parser;

/// Run an orchestrated stage sequence (§4.M).
#[derive(Debug, Parser)]
#[command(name = "otopi", version, about = "Plugin-driven install/configure orchestrator")]
pub struct Cli {
    /// Optional TOML or YAML config file overriding environment defaults (§4.K).
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Colon-separated plugin search roots; overrides PLUGIN_PATH.
    #[arg(long)]
    pub plugin_path: Option<String>,

    /// Colon-separated plugin groups to load; overrides PLUGIN_GROUPS.
    #[arg(long)]
    pub plugin_groups: Option<String>,

    /// Directory relative paths are resolved against; overrides EXECUTION_DIRECTORY.
    #[arg(long)]
    pub execution_directory: Option<String>,

    /// Shuffle the initial handler order instead of sorting by name.
    #[arg(long)]
    pub randomize_events: bool,

    /// Treat recorded priority inversions as fatal.
    #[arg(long)]
    pub fail_on_prio_override: bool,

    /// Increase log verbosity; repeatable (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The `tracing_subscriber::EnvFilter` directive this verbosity level maps
    /// to, used when `RUST_LOG` is unset (§4.L: "verbosity is configurable at
    /// the CLI entry point").
    pub fn default_log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
