//! Extract command: the host metadata pipeline against the local filesystem.
//!
//! Runs the same validate-then-extract sequence a host metadata system
//! performs, using [`LocalExtractor`] in place of a document-conversion
//! service. Plain text and markdown are read directly; other supported
//! formats validate but yield no metadata, since no local text extractor
//! exists for them.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use readable_core::calculator::{Calculator, format_time};
use readable_core::config::Config;
use readable_core::error::{ExtractionError, ExtractionResult};
use readable_core::extractor::{
    ContentExtractor, FileResource, ReadabilityMetadata, ReadableExtractor, Resource, UrlResource,
};

use super::{is_markdown, paint, read_prose};

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// File path or http(s) URL to extract metadata for.
    pub target: String,
}

/// A content extractor backed by the local filesystem.
///
/// Knows mimetypes by file extension and reads text files directly. URLs
/// are never fetched.
#[derive(Debug, Clone, Default)]
pub struct LocalExtractor {
    max_input_bytes: Option<usize>,
}

impl LocalExtractor {
    /// Create an extractor that refuses files above `max_input_bytes`.
    pub const fn new(max_input_bytes: Option<usize>) -> Self {
        Self { max_input_bytes }
    }
}

/// Guess a mimetype from a file extension.
pub fn mimetype_for_path(path: &Utf8Path) -> &'static str {
    let extension = path.extension().map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("txt" | "text" | "md" | "markdown") => "text/plain; charset=utf-8",
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("odt") => "application/vnd.oasis.opendocument.text",
        Some("abw") => "application/x-abiword",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("odp") => "application/vnd.oasis.opendocument.presentation",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

impl ContentExtractor for LocalExtractor {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn extract_file_content(&self, file: &FileResource) -> ExtractionResult<Option<String>> {
        let plain = matches!(
            file.path.extension().map(str::to_ascii_lowercase).as_deref(),
            Some("txt" | "text")
        );
        if !plain && !is_markdown(&file.path) {
            return Err(ExtractionError::Failed(format!(
                "no local text extractor for {}",
                mimetype_for_path(&file.path)
            )));
        }
        read_prose(&file.path, self.max_input_bytes)
            .map(Some)
            .map_err(|err| ExtractionError::Failed(format!("{err:#}")))
    }

    fn extract_url_content(&self, url: &UrlResource) -> ExtractionResult<Option<String>> {
        Err(ExtractionError::Failed(format!(
            "remote content is not fetched: {}",
            url.external_url
        )))
    }

    fn extract_file_mimetype(&self, file: &FileResource) -> ExtractionResult<String> {
        Ok(mimetype_for_path(&file.path).to_string())
    }

    fn extract_url_mimetype(&self, url: &UrlResource) -> ExtractionResult<String> {
        Err(ExtractionError::Failed(format!(
            "remote mimetype is not fetched: {}",
            url.external_url
        )))
    }
}

#[derive(Debug, Serialize)]
struct ExtractReport {
    target: String,
    resource_hash: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<ReadabilityMetadata>,
}

/// Validate a resource and extract its readability metadata.
#[instrument(name = "cmd_extract", skip_all, fields(target = %args.target))]
pub fn cmd_extract(
    args: ExtractArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(target = %args.target, "executing extract command");

    let resource = resolve_resource(&args.target)?;
    let readable = ReadableExtractor::new(
        LocalExtractor::new(max_input_bytes),
        Calculator::new(config.average_reading_speed),
    );
    let report = run(&readable, args.target, &resource)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", paint(&report.target, Style::new().bold()));
    let dim = Style::new().dimmed();
    let warn = Style::new().yellow();
    println!("  {:<14} {}", paint("Resource hash:", dim), report.resource_hash);
    match (report.valid, &report.metadata) {
        (false, _) => println!("  {}", paint("not supported", warn)),
        (true, None) => println!("  {}", paint("supported, but no text extracted", warn)),
        (true, Some(metadata)) => {
            for (metric, score) in metadata.scores.entries() {
                println!("  {:<30} {score}", paint(format!("{}:", metric.label()), dim));
            }
            println!(
                "  {:<30} {}",
                paint("Formatted reading time:", dim),
                format_time(metadata.scores.reading_time)
            );
        }
    }

    Ok(())
}

/// Treat an existing path as a file and anything else as a URL.
fn resolve_resource(target: &str) -> anyhow::Result<Resource> {
    let path = Utf8Path::new(target);
    if path.exists() {
        let file =
            FileResource::from_path(path).with_context(|| format!("failed to read {path}"))?;
        Ok(Resource::File(file))
    } else {
        Ok(Resource::Url(UrlResource::new(target)))
    }
}

fn run(
    readable: &ReadableExtractor<LocalExtractor>,
    target: String,
    resource: &Resource,
) -> anyhow::Result<ExtractReport> {
    let valid = readable
        .validate_resource(resource)
        .with_context(|| format!("failed to validate {target}"))?;
    let metadata = if valid {
        readable
            .extract_metadata(resource)
            .with_context(|| format!("failed to extract metadata for {target}"))?
    } else {
        None
    };

    Ok(ExtractReport {
        target,
        resource_hash: resource.resource_hash(),
        valid,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readable() -> ReadableExtractor<LocalExtractor> {
        ReadableExtractor::new(LocalExtractor::default(), Calculator::new(None))
    }

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn mimetypes_by_extension() {
        assert_eq!(
            mimetype_for_path(Utf8Path::new("a.TXT")),
            "text/plain; charset=utf-8"
        );
        assert_eq!(mimetype_for_path(Utf8Path::new("a.pdf")), "application/pdf");
        assert_eq!(mimetype_for_path(Utf8Path::new("a.png")), "image/png");
        assert_eq!(
            mimetype_for_path(Utf8Path::new("Makefile")),
            "application/octet-stream"
        );
    }

    #[test]
    fn text_file_yields_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "note.txt", "The cat sat on the mat.");
        let resource = resolve_resource(path.as_str()).unwrap();

        let report = run(&readable(), path.to_string(), &resource).unwrap();
        assert!(report.valid);
        let metadata = report.metadata.unwrap();
        assert_eq!(metadata.resource_hash, report.resource_hash);
        assert_eq!(metadata.scores.word_count, 6);
    }

    #[test]
    fn unsupported_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "data.json", "{}");
        let resource = resolve_resource(path.as_str()).unwrap();

        let report = run(&readable(), path.to_string(), &resource).unwrap();
        assert!(!report.valid);
        assert!(report.metadata.is_none());
    }

    #[test]
    fn supported_binary_has_no_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "paper.pdf", "%PDF-1.7");
        let resource = resolve_resource(path.as_str()).unwrap();

        let report = run(&readable(), path.to_string(), &resource).unwrap();
        assert!(report.valid);
        assert!(report.metadata.is_none());
    }

    #[test]
    fn directory_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().to_str().unwrap().to_string();
        let resource = resolve_resource(&target).unwrap();

        let report = run(&readable(), target, &resource).unwrap();
        assert!(!report.valid);
    }

    #[test]
    fn urls_are_hashed_but_not_fetched() {
        let target = "https://example.com";
        let resource = resolve_resource(target).unwrap();
        assert!(matches!(resource, Resource::Url(_)));

        let report = run(&readable(), target.to_string(), &resource).unwrap();
        assert!(!report.valid);
        assert_eq!(
            report.resource_hash,
            "100680ad546ce6a577f42f52df33b4cfdca756859e664b8d7de329b150d09ce9"
        );
    }
}
