//! Text statistics engine.
//!
//! [`TextStatistics`] measures a text once (words, sentences, letters,
//! syllables, complex and unfamiliar words) and derives every readability
//! formula from those counts. Formulas return raw values: nothing here is
//! rounded or clamped, and degenerate inputs (empty text) score `0.0` rather
//! than failing.
//!
//! Free functions at the bottom of the module cover one-off measurements.

use std::collections::HashSet;

use crate::dictionaries::abbreviations::is_abbreviation;
use crate::dictionaries::{dale_chall, spache, syllable_dict};
use crate::inflection;
use crate::text;

/// One measured word.
#[derive(Debug, Clone)]
struct Word {
    lower: String,
    letters: usize,
    syllables: usize,
    complex: bool,
}

impl Word {
    fn new(word: &str, sentence_start: bool) -> Self {
        let lower = word.to_lowercase();
        let syllables = syllable_dict::count_syllables(&lower);
        let capitalised = word.chars().next().is_some_and(char::is_uppercase);
        // Proper nouns only count as complex when they open a sentence.
        let complex =
            syllables >= 3 && (sentence_start || !capitalised) && !inflected_short(&lower);

        Self {
            letters: word.chars().filter(|c| c.is_alphabetic()).count(),
            lower,
            syllables,
            complex,
        }
    }

    /// Lookup key for the familiar-word lists: possessive `'s` dropped.
    fn base(&self) -> &str {
        self.lower.strip_suffix("'s").unwrap_or(&self.lower)
    }

    /// Only words of two or more letters can be unfamiliar; numbers and
    /// stray single letters never are.
    fn can_be_unfamiliar(&self) -> bool {
        self.letters >= 2
    }
}

/// Whether a word only reaches three syllables through an `-es`, `-ed` or
/// `-ing` ending.
fn inflected_short(lower: &str) -> bool {
    ["ing", "ed", "es"].iter().any(|suffix| {
        lower
            .strip_suffix(suffix)
            .is_some_and(|stem| stem.len() > 2 && syllable_dict::count_syllables(stem) < 3)
    })
}

/// Counts taken from one text, with the readability formulas built on them.
#[derive(Debug, Clone)]
pub struct TextStatistics {
    words: Vec<Word>,
    sentences: usize,
}

impl TextStatistics {
    /// Measure a text.
    ///
    /// The text is normalised first (see [`text::normalise`]); a non-empty text
    /// without terminal punctuation still counts as one sentence.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn new(text: &str) -> Self {
        let view = text::normalise(text);
        let sentences = text::split_sentences(&view).len().max(1);

        let mut words = Vec::new();
        let mut sentence_start = true;
        for token in view.split_whitespace() {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            if !word.is_empty() {
                words.push(Word::new(word, sentence_start));
            }
            sentence_start = token.ends_with(['.', '!', '?']) && !is_abbreviation(word);
        }

        tracing::debug!(words = words.len(), sentences, "measured text");
        Self { words, sentences }
    }

    /// Number of words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of sentences, never below one.
    pub const fn sentence_count(&self) -> usize {
        self.sentences
    }

    /// Number of alphabetic characters across all words.
    pub fn letter_count(&self) -> usize {
        self.words.iter().map(|w| w.letters).sum()
    }

    /// Total syllables across all words.
    pub fn syllable_count(&self) -> usize {
        self.words.iter().map(|w| w.syllables).sum()
    }

    /// Words of three or more syllables, not counting proper nouns or words
    /// that only get there through `-es`, `-ed` or `-ing`.
    pub fn complex_word_count(&self) -> usize {
        self.words.iter().filter(|w| w.complex).count()
    }

    /// Words of three or more syllables, with no exceptions.
    pub fn polysyllable_count(&self) -> usize {
        self.words.iter().filter(|w| w.syllables >= 3).count()
    }

    /// Words missing from the Dale-Chall list. Repeats count every time.
    pub fn dale_chall_difficult_word_count(&self) -> usize {
        self.words
            .iter()
            .filter(|w| w.can_be_unfamiliar() && !dale_chall::is_familiar(w.base()))
            .count()
    }

    /// Distinct words missing from the Spache list. Inflected forms of the
    /// same word count once.
    pub fn spache_difficult_word_count(&self) -> usize {
        self.words
            .iter()
            .filter(|w| w.can_be_unfamiliar() && !spache::is_familiar(w.base()))
            .map(|w| inflection::singular(w.base()))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Words per sentence, unrounded.
    pub fn average_words_per_sentence(&self) -> f64 {
        self.word_count() as f64 / self.sentences as f64
    }

    /// Syllables per word, or `0.0` for a text without words.
    pub fn average_syllables_per_word(&self) -> f64 {
        self.per_word(self.syllable_count())
    }

    fn per_word(&self, count: usize) -> f64 {
        match self.word_count() {
            0 => 0.0,
            words => count as f64 / words as f64,
        }
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Flesch-Kincaid Reading Ease.
    ///
    /// `206.835 - 1.015 * ASL - 84.6 * ASW`
    pub fn flesch_kincaid_reading_ease(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        206.835
            - 1.015 * self.average_words_per_sentence()
            - 84.6 * self.average_syllables_per_word()
    }

    /// Flesch-Kincaid Grade Level.
    ///
    /// `0.39 * ASL + 11.8 * ASW - 15.59`
    pub fn flesch_kincaid_grade_level(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        0.39 * self.average_words_per_sentence() + 11.8 * self.average_syllables_per_word() - 15.59
    }

    /// Gunning Fog score.
    pub fn gunning_fog_score(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        0.4 * (self.average_words_per_sentence()
            + 100.0 * self.per_word(self.complex_word_count()))
    }

    /// Coleman-Liau index, from letters and sentences per hundred words.
    pub fn coleman_liau_index(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let letters = 100.0 * self.per_word(self.letter_count());
        let sentences = 100.0 * self.per_word(self.sentences);
        0.0588 * letters - 0.296 * sentences - 15.8
    }

    /// SMOG index, scaling polysyllables to a thirty-sentence sample.
    pub fn smog_index(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let sample = self.polysyllable_count() as f64 * (30.0 / self.sentences as f64);
        3.0 + sample.sqrt()
    }

    /// Automated Readability Index.
    pub fn automated_readability_index(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        4.71 * self.per_word(self.letter_count()) + 0.5 * self.average_words_per_sentence()
            - 21.43
    }

    /// Dale-Chall readability score.
    ///
    /// `0.1579 * PDW + 0.0496 * ASL`, plus `3.6365` when more than 5% of words
    /// are difficult.
    pub fn dale_chall_readability_score(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let difficult = 100.0 * self.per_word(self.dale_chall_difficult_word_count());
        let score = 0.1579 * difficult + 0.0496 * self.average_words_per_sentence();
        if difficult > 5.0 {
            score + 3.6365
        } else {
            score
        }
    }

    /// Revised Spache readability score.
    ///
    /// `0.121 * ASL + 0.082 * PDW + 0.659`
    pub fn spache_readability_score(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let difficult = 100.0 * self.per_word(self.spache_difficult_word_count());
        0.121 * self.average_words_per_sentence() + 0.082 * difficult + 0.659
    }
}

/// Round to a number of decimal places, halves away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Number of words in a text; `0` for empty or whitespace-only text.
pub fn word_count(text: &str) -> usize {
    text::extract_words(&text::normalise(text)).len()
}

/// Number of sentences in a text, never below one.
pub fn sentence_count(text: &str) -> usize {
    text::split_sentences(&text::normalise(text)).len().max(1)
}

/// Syllables in a single word; at least one for any non-empty word.
pub fn syllable_count(word: &str) -> usize {
    syllable_dict::count_syllables(word)
}

/// Number of complex words in a text (see
/// [`TextStatistics::complex_word_count`]).
pub fn complex_word_count(text: &str) -> usize {
    TextStatistics::new(text).complex_word_count()
}

/// Words per sentence rounded to `places` decimal places.
pub fn average_words_per_sentence(text: &str, places: u32) -> f64 {
    round_to(TextStatistics::new(text).average_words_per_sentence(), places)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGH: &str = "A hard word to read is chlorofluorocarbonation. Others I can learn \
                        include antidisestablishmentarianism, chlorofluorocarbonation and \
                        phosphorescent.";
    const LOW: &str = "An easy word to read is deal. Others I can learn are make, gem and the.";

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-6
    }

    #[test]
    fn counts_high_complexity() {
        let stats = TextStatistics::new(HIGH);
        assert_eq!(stats.word_count(), 16);
        assert_eq!(stats.sentence_count(), 2);
        assert_eq!(stats.complex_word_count(), 4);
        assert_eq!(stats.polysyllable_count(), 4);
        assert_eq!(stats.dale_chall_difficult_word_count(), 5);
        assert_eq!(stats.spache_difficult_word_count(), 4);
        assert!(close(stats.average_words_per_sentence(), 8.0));
    }

    #[test]
    fn counts_low_complexity() {
        let stats = TextStatistics::new(LOW);
        assert_eq!(stats.word_count(), 16);
        assert_eq!(stats.sentence_count(), 2);
        assert_eq!(stats.syllable_count(), 18);
        assert_eq!(stats.letter_count(), 53);
        assert_eq!(stats.complex_word_count(), 0);
        assert_eq!(stats.dale_chall_difficult_word_count(), 1);
        assert_eq!(stats.spache_difficult_word_count(), 2);
    }

    #[test]
    fn formulas_low_complexity() {
        let stats = TextStatistics::new(LOW);
        // ASL 8, ASW 1.125
        assert!(close(stats.flesch_kincaid_reading_ease(), 103.54));
        assert!(close(stats.flesch_kincaid_grade_level(), 0.805));
        assert!(close(stats.gunning_fog_score(), 3.2));
        assert!(close(stats.smog_index(), 3.0));
    }

    #[test]
    fn formulas_high_complexity() {
        let stats = TextStatistics::new(HIGH);
        assert!(close(stats.gunning_fog_score(), 13.2));
        assert!(close(stats.smog_index(), 3.0 + 60f64.sqrt()));
        // 31.25% difficult words, so the correction constant applies.
        assert!(close(
            stats.dale_chall_readability_score(),
            0.1579 * 31.25 + 0.0496 * 8.0 + 3.6365
        ));
        assert!(close(
            stats.spache_readability_score(),
            0.121 * 8.0 + 0.082 * 25.0 + 0.659
        ));
        assert!(stats.flesch_kincaid_reading_ease() < 0.0);
        assert!(stats.flesch_kincaid_grade_level() > 12.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let stats = TextStatistics::new("");
        assert_eq!(stats.word_count(), 0);
        assert_eq!(stats.sentence_count(), 1);
        assert!(close(stats.flesch_kincaid_reading_ease(), 0.0));
        assert!(close(stats.smog_index(), 0.0));
        assert!(close(stats.average_syllables_per_word(), 0.0));
    }

    #[test]
    fn single_word_without_terminator() {
        let stats = TextStatistics::new("Hello");
        assert_eq!(stats.word_count(), 1);
        assert_eq!(stats.sentence_count(), 1);
        assert!(stats.flesch_kincaid_grade_level().is_finite());
    }

    #[test]
    fn single_letters_are_never_difficult() {
        let stats = TextStatistics::new("Point x is at b. Go to c now.");
        assert_eq!(stats.word_count(), 8);
        assert_eq!(stats.dale_chall_difficult_word_count(), 0);
        assert_eq!(stats.spache_difficult_word_count(), 0);

        let stats = TextStatistics::new("Set q to 42 and zq to 7.");
        assert_eq!(stats.dale_chall_difficult_word_count(), 1);
        assert_eq!(stats.spache_difficult_word_count(), 1);
    }

    #[test]
    fn hyphenated_compounds_are_one_word() {
        let text = "A well-known self-made man.";
        assert_eq!(text.split_whitespace().count(), 4);
        assert_eq!(word_count(text), 4);

        let stats = TextStatistics::new(text);
        assert_eq!(stats.word_count(), 4);
        assert_eq!(stats.syllable_count(), 1 + 2 + 2 + 1);
    }

    #[test]
    fn proper_nouns_are_not_complex() {
        let stats = TextStatistics::new("We met Alexandria there. Everybody came along.");
        assert_eq!(stats.polysyllable_count(), 2);
        // "Alexandria" is mid-sentence and capitalised; "Everybody" opens one.
        assert_eq!(stats.complex_word_count(), 1);
    }

    #[test]
    fn inflected_words_are_not_complex() {
        let stats = TextStatistics::new("they repeated it");
        assert_eq!(stats.polysyllable_count(), 1);
        assert_eq!(stats.complex_word_count(), 0);
    }

    #[test]
    fn free_functions() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \t  "), 0);
        assert_eq!(word_count("one two  three"), 3);
        assert_eq!(sentence_count("no terminator here"), 1);
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(syllable_count("table"), 2);
        assert!(close(average_words_per_sentence("One two three. Four five.", 1), 2.5));
        assert!(close(
            average_words_per_sentence("One two. Three four. Five six seven eight.", 2),
            2.67
        ));
    }

    #[test]
    fn rounding() {
        assert!(close(round_to(2.345, 1), 2.3));
        assert!(close(round_to(2.25, 1), 2.3));
        assert!(close(round_to(-1.25, 1), -1.3));
        assert!(close(round_to(7.0, 2), 7.0));
    }
}
