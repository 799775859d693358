//! Markdown to plain text for scoring.
//!
//! Markdown sources are flattened with pulldown-cmark before they reach the
//! calculator. Every block (paragraph, heading, list item, table row) ends
//! with a blank line, and a block that ends in a word gets a full stop, so
//! headings and list items stay sentences of their own even after
//! whitespace is collapsed for calculation.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Flatten markdown into plain text.
///
/// Drops code blocks, inline code, raw HTML, and YAML frontmatter. Keeps
/// headings, link text, image alt text, list items, blockquotes, and table
/// cells (cells are separated by spaces).
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn to_plain_text(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut result = String::with_capacity(text.len());
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,

            Event::Text(t) if !in_code_block => result.push_str(&t),
            Event::SoftBreak | Event::HardBreak => result.push(' '),
            Event::End(TagEnd::TableCell) => result.push(' '),

            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableHead
                | TagEnd::TableRow,
            ) => end_block(&mut result),

            // Inline code, HTML, and footnote references carry no prose.
            _ => {}
        }
    }

    result.trim_end().to_string()
}

/// Terminate the current block with a blank line.
fn end_block(result: &mut String) {
    let trimmed = result.trim_end_matches([' ', '\n']).len();
    result.truncate(trimmed);
    let Some(last) = result.chars().last() else {
        return;
    };
    if last.is_alphanumeric() || matches!(last, ')' | '"' | '\'') {
        result.push('.');
    }
    result.push_str("\n\n");
}

/// Skip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}
