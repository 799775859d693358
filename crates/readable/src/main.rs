//! readable CLI
#![deny(unsafe_code)]

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::debug;

use readable::{Cli, Commands, commands};
use readable_core::config::{Config, ConfigLoader, ConfigSources};

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config).context("failed to load configuration")?;

    let log_dir = config.log_dir.as_ref().map(|dir| dir.as_std_path().to_path_buf());
    let obs = observability::ObservabilityConfig::from_env_with_overrides(log_dir);
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs, filter)
        .context("failed to initialize logging")?;
    debug!(
        json = cli.json,
        verbose = cli.verbose,
        config_files = sources.files().len(),
        "starting"
    );

    let result = dispatch(command, cli.json, config, &sources);
    if let Err(err) = &result {
        tracing::error!(error = format!("{err:#}"), "command failed");
    }
    result
}

/// Discover configuration from the working directory, plus `--config`.
fn load_config(explicit: Option<std::path::PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("current directory is not valid UTF-8: {}", p.display()))?;

    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(path) = explicit {
        let path = Utf8PathBuf::from_path_buf(path)
            .map_err(|p| anyhow!("config path is not valid UTF-8: {}", p.display()))?;
        loader = loader.with_file(path);
    }
    Ok(loader.load()?)
}

fn dispatch(
    command: Commands,
    json: bool,
    config: Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let max_input = config.input_limit();
    match command {
        Commands::Score(args) => commands::score::cmd_score(args, json, &config, max_input),
        Commands::ReadingTime(args) => {
            commands::reading_time::cmd_reading_time(args, json, &config, max_input)
        }
        Commands::Extract(args) => commands::extract::cmd_extract(args, json, &config, max_input),
        Commands::Mimetype(args) => commands::mimetype::cmd_mimetype(args, json),
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to start the async runtime")?
            .block_on(commands::serve::cmd_serve(args, max_input, config)),
    }
}
