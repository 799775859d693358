//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use owo_colors::{OwoColorize, Stream, Style};

pub mod extract;
pub mod info;
pub mod mimetype;
pub mod reading_time;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;

/// Style text for stdout. Plain unless `--color` or the terminal allows it.
pub fn paint(value: impl std::fmt::Display, style: Style) -> String {
    value
        .if_supports_color(Stream::Stdout, |text| text.style(style))
        .to_string()
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Whether a path should be flattened from markdown before scoring.
pub fn is_markdown(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("md" | "markdown"))
}

/// Read a file as prose: size-checked, with markdown flattened to plain text.
pub fn read_prose(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let content = read_input_file(path, max_bytes)?;
    if is_markdown(path) {
        Ok(readable_core::markdown::to_plain_text(&content))
    } else {
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn rejects_oversized_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("big.txt")).unwrap();
        std::fs::write(&path, "word ".repeat(100)).unwrap();

        let err = read_input_file(&path, Some(10)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
        assert!(read_input_file(&path, None).is_ok());
    }

    #[test]
    fn markdown_is_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("doc.md")).unwrap();
        std::fs::write(&path, "# Title\n\nSome *plain* text.\n\n```\ncode here\n```\n").unwrap();

        let prose = read_prose(&path, None).unwrap();
        assert_eq!(prose, "Title.\n\nSome plain text.");
    }

    #[test]
    fn paint_follows_colour_override() {
        owo_colors::set_override(false);
        assert_eq!(paint("supported:", Style::new().green()), "supported:");
        assert_eq!(paint(42, Style::new().bold().underline()), "42");

        owo_colors::set_override(true);
        let coloured = paint("supported:", Style::new().green());
        assert!(coloured.starts_with("\x1b["), "{coloured:?}");
        assert!(coloured.contains("supported:"));
        owo_colors::unset_override();
    }

    #[test]
    fn markdown_extensions() {
        assert!(is_markdown(Utf8Path::new("README.md")));
        assert!(is_markdown(Utf8Path::new("notes.markdown")));
        assert!(!is_markdown(Utf8Path::new("notes.txt")));
    }
}
