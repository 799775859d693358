//! Reading-time command.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use readable_core::calculator::Calculator;
use readable_core::config::Config;

use super::{paint, read_prose};

/// Arguments for the `reading-time` subcommand.
#[derive(Args, Debug)]
pub struct ReadingTimeArgs {
    /// File to measure.
    pub file: Utf8PathBuf,

    /// Reading speed in words per minute (overrides configuration).
    #[arg(long, value_name = "WPM")]
    pub speed: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ReadingTimeReport {
    file: Utf8PathBuf,
    words: usize,
    words_per_minute: u32,
    seconds: u64,
    formatted: String,
}

/// Print the estimated reading time for a file.
#[instrument(name = "cmd_reading_time", skip_all, fields(file = %args.file))]
pub fn cmd_reading_time(
    args: ReadingTimeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, speed = ?args.speed, "executing reading-time command");

    let prose = read_prose(&args.file, max_input_bytes)?;
    let calculator = Calculator::new(args.speed.or(config.average_reading_speed));
    let report = measure(args.file, &prose, &calculator);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {} ({} words at {} wpm)",
            paint(&report.formatted, Style::new().bold()),
            paint(format!("{}s", report.seconds), Style::new().dimmed()),
            report.words,
            report.words_per_minute,
        );
    }

    Ok(())
}

fn measure(file: Utf8PathBuf, prose: &str, calculator: &Calculator) -> ReadingTimeReport {
    let seconds = calculator.calculate_reading_time(prose);
    ReadingTimeReport {
        file,
        words: readable_core::statistics::word_count(&calculator.clean_for_calculation(prose)),
        words_per_minute: calculator.reading_speed(),
        seconds,
        formatted: calculator.format_time(seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_speed() {
        let prose = "word ".repeat(500);
        let report = measure(Utf8PathBuf::from("a.txt"), &prose, &Calculator::new(None));
        assert_eq!(report.words, 500);
        assert_eq!(report.words_per_minute, 238);
        assert_eq!(report.seconds, 126);
        assert_eq!(report.formatted, "0:02:06");
    }

    #[test]
    fn custom_speed() {
        let prose = "word ".repeat(5000);
        let report = measure(Utf8PathBuf::from("a.txt"), &prose, &Calculator::new(Some(400)));
        assert_eq!(report.seconds, 750);
        assert_eq!(report.formatted, "0:12:30");
    }

    #[test]
    fn non_positive_speed_falls_back() {
        let prose = "word ".repeat(500);
        let report = measure(Utf8PathBuf::from("a.txt"), &prose, &Calculator::new(Some(-20)));
        assert_eq!(report.words_per_minute, 238);
    }
}
