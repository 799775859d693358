//! Text cleaning, sentence splitting and word extraction.
//!
//! Whitespace cleaning for calculation, the normalised "statistics view" of a
//! text, sentence splitting, and word extraction.

use regex::Regex;
use std::sync::LazyLock;

use crate::dictionaries::abbreviations::is_abbreviation;

/// Runs of two or more whitespace characters (tabs and newlines included).
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// A point between two digits, as in `3.14`.
static NUMBER_POINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\.(\d)").expect("valid regex"));

/// A blank line that follows text without a terminator.
static UNTERMINATED_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^.!?\s])[ \t]*(?:\r?\n[ \t]*){2,}").expect("valid regex")
});

/// Punctuation that separates words but never ends a sentence. A single
/// hyphen joins a compound; a double hyphen is a dash.
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[",:;()/]|--"#).expect("valid regex"));

/// A number with a fractional part.
static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("valid regex"));

/// A web address, with or without a scheme.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").expect("valid regex"));

/// An e-mail address.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});

/// One or more initials: `J.`, `U.S.A.`.
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]\.(?:[A-Z]\.)*").expect("valid regex"));

/// Replace tabs and runs of whitespace with a single space.
///
/// Applied once before every calculation so stray tabs and double spaces
/// cannot split or merge words. Idempotent.
pub fn clean_for_calculation(text: &str) -> String {
    let text = text.replace('\t', " ");
    WHITESPACE_RUN.replace_all(&text, " ").into_owned()
}

/// Build the statistics view of a text.
///
/// Typographic punctuation is mapped to ASCII, points inside numbers are
/// dropped so they never read as terminators, a blank line ends a sentence,
/// and separator punctuation (commas, colons, brackets, quotes, dashes)
/// becomes a space. Hyphenated compounds stay one word. The result is
/// trimmed with single spaces between words.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn normalise(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' => mapped.push('\''),
            '\u{201C}' | '\u{201D}' => mapped.push('"'),
            '\u{2013}' => mapped.push('-'),
            '\u{2014}' => mapped.push_str("--"),
            '\u{2026}' => mapped.push_str("..."),
            _ => mapped.push(ch),
        }
    }

    let text = NUMBER_POINT.replace_all(&mapped, "$1$2");
    let text = UNTERMINATED_PARAGRAPH.replace_all(&text, "$1. ");
    let text = SEPARATORS.replace_all(&text, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shorter fragments are punctuation debris, not sentences.
const MIN_SENTENCE_LEN: usize = 3;

/// Split text into sentences.
///
/// `!` and `?` end a sentence unless a lowercase word follows a quote.
/// A `.` does not end one after an abbreviation or initial, inside a
/// decimal number, an ellipsis, a URL or an e-mail address, or when the
/// next word starts lowercase.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (pos, &ch) in chars.iter().enumerate() {
        if matches!(ch, '.' | '!' | '?') && ends_sentence(&chars, start, pos) {
            push_sentence(&mut sentences, &chars[start..=pos]);
            start = pos + 1;
        }
    }
    push_sentence(&mut sentences, &chars[start..]);

    sentences
}

/// Extract words from text, splitting on whitespace and stripping surrounding
/// punctuation. Case is preserved; tokens without a letter or digit are dropped.
pub fn extract_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .collect()
}

fn push_sentence(sentences: &mut Vec<String>, chars: &[char]) {
    let sentence: String = chars.iter().collect();
    let sentence = sentence.trim();
    if sentence.len() >= MIN_SENTENCE_LEN {
        sentences.push(sentence.to_string());
    }
}

/// Whether the terminator at `pos` closes the sentence that began at `start`.
fn ends_sentence(chars: &[char], start: usize, pos: usize) -> bool {
    if pos + 1 == chars.len() {
        return true;
    }
    let next_at = next_visible(chars, pos + 1);
    let next = next_at.map(|i| chars[i]);

    if chars[pos] != '.' {
        return match (next, next_at) {
            (Some('"' | '\''), Some(quote)) => {
                next_visible(chars, quote + 1).is_none_or(|i| !chars[i].is_lowercase())
            }
            _ => true,
        };
    }

    // Only the last point of an ellipsis can end a sentence.
    if chars[pos + 1] == '.' {
        return false;
    }

    let word = word_before(chars, pos);
    let token_start = chars[start..pos]
        .iter()
        .rposition(|c| c.is_whitespace())
        .map_or(start, |i| start + i + 1);
    let token: String = chars[token_start..=pos].iter().collect();
    if is_likely_abbreviation(&word)
        || is_likely_initial(&word)
        || DECIMAL_PATTERN.is_match(&token)
        || token.ends_with("...")
        || URL_PATTERN.is_match(&token)
        || EMAIL_PATTERN.is_match(&token)
    {
        return false;
    }

    match next {
        Some(c) if c.is_ascii_digit() && word.ends_with(|w: char| w.is_ascii_digit()) => false,
        Some(c) => !c.is_lowercase(),
        None => true,
    }
}

/// Index of the first non-whitespace character at or after `from`.
fn next_visible(chars: &[char], from: usize) -> Option<usize> {
    chars
        .get(from..)?
        .iter()
        .position(|c| !c.is_whitespace())
        .map(|offset| from + offset)
}

/// The word (letters, digits and dots) before the terminator at `pos`,
/// skipping any whitespace and dots directly in front of it.
fn word_before(chars: &[char], pos: usize) -> String {
    let end = chars[..pos]
        .iter()
        .rposition(|c| !c.is_whitespace() && *c != '.')
        .unwrap_or(0);
    let begin = chars[..=end]
        .iter()
        .rposition(|c| !c.is_alphanumeric() && *c != '.')
        .map_or(0, |i| i + 1);
    chars[begin..=end].iter().collect()
}

fn is_likely_abbreviation(word: &str) -> bool {
    let bare = word.trim_end_matches('.');
    if bare.is_empty() {
        return false;
    }
    is_abbreviation(bare) || (bare.chars().count() == 1 && bare.chars().all(char::is_uppercase))
}

fn is_likely_initial(word: &str) -> bool {
    let mut chars = word.chars();
    let two_char_initial = matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_uppercase()
    );
    two_char_initial || INITIALS_PATTERN.is_match(word)
}
