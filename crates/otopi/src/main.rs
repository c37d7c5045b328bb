mod cli;

use clap::Parser;
use otopi_core::environment::{keys, EnvValue};
use otopi_core::kernel::bootstrap::Context;

use cli::Cli;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_logging(&args);

    let exit_code = match run(&args).await {
        Ok(ctx) => ctx.environment().exit_code(),
        Err(err) => {
            log::error!("{err}");
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(args: &Cli) {
    use tracing_subscriber::EnvFilter;

    tracing_log::LogTracer::init().expect("LogTracer can only be installed once");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.default_log_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(args: &Cli) -> otopi_core::kernel::error::Result<Context> {
    let mut ctx = Context::new();

    if let Some(config_path) = &args.config {
        ctx.load_config_file(config_path)?;
    }
    if let Some(plugin_path) = &args.plugin_path {
        ctx.environment_mut().set(keys::PLUGIN_PATH, EnvValue::Str(plugin_path.clone()));
    }
    if let Some(plugin_groups) = &args.plugin_groups {
        ctx.environment_mut().set(keys::PLUGIN_GROUPS, EnvValue::Str(plugin_groups.clone()));
    }
    if let Some(dir) = &args.execution_directory {
        ctx.environment_mut().set(keys::EXECUTION_DIRECTORY, EnvValue::Str(dir.clone()));
    }
    if args.randomize_events {
        ctx.environment_mut().set(keys::RANDOMIZE_EVENTS, EnvValue::Bool(true));
    }
    if args.fail_on_prio_override {
        ctx.environment_mut().set(keys::FAIL_ON_PRIO_OVERRIDE, EnvValue::Bool(true));
    }

    ctx.register_plugin(Box::new(otopi_core_command::CommandPlugin::default()))?;
    ctx.load_plugins()?;
    ctx.build_sequence()?;
    ctx.run_sequence().await?;

    Ok(ctx)
}
