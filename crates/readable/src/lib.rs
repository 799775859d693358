//! The `readable` command line.
//!
//! Parsing lives here rather than in `main.rs` so that `xtask` can render
//! man pages and shell completions from [`command()`], and so the command
//! implementations in [`commands`] can be tested directly.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// When to colour terminal output.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Colour when stdout is a terminal that supports it.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl ColorChoice {
    /// Install this choice as the process-wide colour override.
    pub fn apply(self) {
        match self {
            Self::Auto => owo_colors::unset_override(),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const AFTER_HELP: &str = "\
ENVIRONMENT:
    READABLE_AVERAGE_READING_SPEED  Words per minute for reading time (default 238)
    READABLE_<KEY>                  Override any configuration key
    READABLE_LOG_PATH               Write JSONL logs to this file
    READABLE_LOG_DIR                Write readable.jsonl logs to this directory
    RUST_LOG                        Log filter, e.g. readable_core=debug
";

/// Readability scores and reading time for documents.
#[derive(Parser)]
#[command(name = "readable", version, about, long_about = None)]
#[command(arg_required_else_help = true, after_long_help = AFTER_HELP)]
pub struct Cli {
    /// What to do.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Load this configuration file on top of any discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before doing anything else
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colour output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,
}

/// The `readable` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Score one or more files with every readability metric
    Score(commands::score::ScoreArgs),

    /// Estimate how long a file takes to read
    ReadingTime(commands::reading_time::ReadingTimeArgs),

    /// Validate a file or URL and build its readability metadata
    Extract(commands::extract::ExtractArgs),

    /// Check a mimetype against the supported list
    Mimetype(commands::mimetype::MimetypeArgs),

    /// Show version and the configuration in effect
    Info(commands::info::InfoArgs),

    /// Serve the calculator over MCP on stdin/stdout
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The clap command tree, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["readable", "info", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Info(_))));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["readable", "-q", "-v", "info"]).is_err());
    }
}
