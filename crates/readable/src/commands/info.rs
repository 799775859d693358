//! Info command: package details and the configuration in effect.

use clap::Args;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use readable_core::calculator::Calculator;
use readable_core::config::{Config, ConfigSources};
use readable_core::mimetype::SUPPORTED_MIMETYPES;

use super::paint;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct InfoReport<'a> {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    license: &'static str,
    repository: &'static str,
    config: Settings<'a>,
    supported_mimetypes: usize,
}

/// The loaded configuration, with the values the commands will actually use.
#[derive(Serialize)]
struct Settings<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    sources: &'a ConfigSources,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_reading_speed: Option<i64>,
    effective_reading_speed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl<'a> Settings<'a> {
    fn new(config: &Config, sources: &'a ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(ToString::to_string),
            sources,
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(ToString::to_string),
            average_reading_speed: config.average_reading_speed,
            effective_reading_speed: Calculator::new(config).reading_speed(),
            max_input_bytes: config.input_limit(),
        }
    }
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let report = InfoReport {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
        license: env!("CARGO_PKG_LICENSE"),
        repository: env!("CARGO_PKG_REPOSITORY"),
        config: Settings::new(config, sources),
        supported_mimetypes: SUPPORTED_MIMETYPES.len(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

fn print_text(report: &InfoReport<'_>) {
    println!(
        "{} {}",
        paint(report.name, Style::new().bold()),
        paint(report.version, Style::new().green())
    );
    println!("{}", report.description);
    row("License", report.license);
    row("Repository", paint(report.repository, Style::new().cyan()));

    let settings = &report.config;
    println!();
    heading("Configuration");
    match &settings.config_file {
        Some(path) => row("Config file", paint(path, Style::new().cyan())),
        None => row("Config file", paint("none loaded", Style::new().yellow())),
    }
    for source in settings.sources.files().iter().rev().skip(1) {
        row("  overrides", &source.path);
    }
    row("Log level", settings.log_level);
    if let Some(dir) = &settings.log_dir {
        row("Log directory", dir);
    }

    println!();
    heading("Scoring");
    match settings.average_reading_speed {
        Some(speed) => row("Configured speed", speed),
        None => row("Configured speed", paint("(not set)", Style::new().dimmed())),
    }
    row("Effective speed", format!("{} wpm", settings.effective_reading_speed));
    match settings.max_input_bytes {
        Some(max) => row("Input limit", format!("{max} bytes")),
        None => row("Input limit", paint("disabled", Style::new().yellow())),
    }
    row("Mimetypes", format!("{} supported", report.supported_mimetypes));
}

fn heading(title: &str) {
    println!("{}", paint(title, Style::new().bold().underline()));
}

fn row(label: &str, value: impl std::fmt::Display) {
    println!("{}: {value}", paint(label, Style::new().dimmed()));
}
