//! Score command: the full readability score set for one or more files.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use readable_core::calculator::{Calculator, Metric, Score, ScoreSet, format_time};
use readable_core::config::Config;

use super::{paint, read_prose};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Files to score. Markdown files (`.md`) are flattened to prose first.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Print only this metric.
    #[arg(short, long, value_enum)]
    pub metric: Option<Metric>,

    /// Reading speed in words per minute (overrides configuration).
    #[arg(long, value_name = "WPM")]
    pub speed: Option<i64>,
}

/// Scores for one file.
#[derive(Debug, Serialize)]
pub struct FileScores {
    /// The scored file.
    pub file: Utf8PathBuf,
    /// Its score set.
    #[serde(flatten)]
    pub scores: ScoreSet,
}

/// Score every file, printing text or JSON.
#[instrument(name = "cmd_score", skip_all, fields(files = args.files.len()))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(files = ?args.files, metric = ?args.metric, "executing score command");

    let calculator = Calculator::new(args.speed.or(config.average_reading_speed));
    let reports = score_files(&args.files, &calculator, max_input_bytes)?;

    if global_json {
        match (args.metric, reports.as_slice()) {
            (Some(metric), [single]) => {
                println!("{}", serde_json::to_string_pretty(&single.scores.get(metric))?);
            }
            (Some(metric), _) => {
                let values = reports
                    .iter()
                    .map(|r| {
                        let mut entry = serde_json::Map::new();
                        entry.insert("file".to_string(), serde_json::to_value(&r.file)?);
                        entry.insert(
                            metric.key().to_string(),
                            serde_json::to_value(r.scores.get(metric))?,
                        );
                        Ok(entry)
                    })
                    .collect::<serde_json::Result<Vec<_>>>()?;
                println!("{}", serde_json::to_string_pretty(&values)?);
            }
            (None, [single]) => println!("{}", serde_json::to_string_pretty(single)?),
            (None, _) => println!("{}", serde_json::to_string_pretty(&reports)?),
        }
        return Ok(());
    }

    let multiple = reports.len() > 1;
    for (i, report) in reports.iter().enumerate() {
        match args.metric {
            Some(metric) if multiple => {
                println!("{}: {}", report.file, report.scores.get(metric));
            }
            Some(metric) => println!("{}", report.scores.get(metric)),
            None => {
                if i > 0 {
                    println!();
                }
                print_report(report);
            }
        }
    }

    Ok(())
}

/// Read and score each file in order, with a progress bar for batches.
fn score_files(
    files: &[Utf8PathBuf],
    calculator: &Calculator,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<Vec<FileScores>> {
    let progress = if files.len() > 1 {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("invalid progress template")?
                .progress_chars("█▓▒░  "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        progress.set_message(file.to_string());
        let prose = read_prose(file, max_input_bytes)?;
        let scores = calculator.calculate_scores(&prose);
        debug!(file = %file, words = scores.word_count, "scored");
        reports.push(FileScores {
            file: file.clone(),
            scores,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(reports)
}

fn print_report(report: &FileScores) {
    println!("{}", paint(&report.file, Style::new().bold()));
    for (metric, score) in report.scores.entries() {
        let value = match (metric, score) {
            (Metric::ReadingTime, Score::Integer(seconds)) => {
                format!("{seconds} ({})", format_time(seconds))
            }
            _ => score.to_string(),
        };
        let label = paint(format!("{}:", metric.label()), Style::new().dimmed());
        println!("  {label:<30} {}", paint(value, Style::new().cyan()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn scores_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write(&dir, "a.txt", "The cat sat on the mat.");
        let second = write(&dir, "b.md", "# Notes\n\nThe dog ran.\n\n```\nignored code\n```\n");

        let reports =
            score_files(&[first.clone(), second.clone()], &Calculator::default(), None).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].file, first);
        assert_eq!(reports[0].scores.word_count, 6);
        assert_eq!(reports[1].file, second);
        assert_eq!(reports[1].scores.word_count, 4);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = score_files(
            &[Utf8PathBuf::from("/nonexistent/file.txt")],
            &Calculator::default(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn report_serializes_flat() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "a.txt", "The cat sat on the mat.");
        let reports = score_files(&[path], &Calculator::default(), None).unwrap();

        let json = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(json["wordcount"], 6);
        assert!(json["file"].as_str().unwrap().ends_with("a.txt"));
    }
}
