//! Readability calculator.
//!
//! Wraps the [`statistics`](crate::statistics) engine: cleans the text once,
//! applies the configured reading speed, and assembles the fixed
//! [`ScoreSet`] handed to the host as metadata.
//!
//! Published scores are rounded to one decimal place and clamped to each
//! metric's documented range (for example, grade levels stop at 12). The raw,
//! unclamped values stay available from [`TextStatistics`].

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::statistics::{self, TextStatistics, round_to};
use crate::text;

/// Words per minute used when no positive reading speed is configured.
pub const DEFAULT_READING_SPEED: u32 = 238;

/// Decimal places for every published float score.
const SCORE_PRECISION: u32 = 1;

/// Source of the configured reading speed.
///
/// Implementations return whatever is stored; validation and the fallback to
/// [`DEFAULT_READING_SPEED`] happen in [`Calculator::reading_speed`].
pub trait ReadingSpeedProvider {
    /// The stored words-per-minute value, if any.
    fn configured_reading_speed(&self) -> Option<i64>;
}

impl ReadingSpeedProvider for Option<i64> {
    fn configured_reading_speed(&self) -> Option<i64> {
        *self
    }
}

impl ReadingSpeedProvider for i64 {
    fn configured_reading_speed(&self) -> Option<i64> {
        Some(*self)
    }
}

impl ReadingSpeedProvider for Config {
    fn configured_reading_speed(&self) -> Option<i64> {
        self.average_reading_speed
    }
}

impl<P: ReadingSpeedProvider + ?Sized> ReadingSpeedProvider for &P {
    fn configured_reading_speed(&self) -> Option<i64> {
        (**self).configured_reading_speed()
    }
}

/// A named metric in the score set.
///
/// Serialized (and, with the `clap` feature, parsed) as the lowercase metric
/// key, e.g. `fleschkincaidgradelevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", value(rename_all = "lower"))]
pub enum Metric {
    /// Flesch-Kincaid reading ease (0-100, higher is easier).
    FleschKincaidReadingEase,
    /// Flesch-Kincaid grade level.
    FleschKincaidGradeLevel,
    /// Gunning Fog score.
    GunningFogScore,
    /// Coleman-Liau index.
    ColemanLiauIndex,
    /// SMOG index.
    SmogIndex,
    /// Automated Readability Index.
    AutomatedReadabilityIndex,
    /// Dale-Chall readability score.
    DaleChallReadabilityScore,
    /// Words missing from the Dale-Chall list.
    DaleChallDifficultWordCount,
    /// Revised Spache readability score.
    SpacheReadabilityScore,
    /// Distinct words missing from the Spache list.
    SpacheDifficultWordCount,
    /// Number of words.
    WordCount,
    /// Average sentence length in words.
    AverageWordsPerSentence,
    /// Estimated reading time in seconds.
    ReadingTime,
}

impl Metric {
    /// Every metric, in score-set order.
    pub const ALL: [Self; 13] = [
        Self::FleschKincaidReadingEase,
        Self::FleschKincaidGradeLevel,
        Self::GunningFogScore,
        Self::ColemanLiauIndex,
        Self::SmogIndex,
        Self::AutomatedReadabilityIndex,
        Self::DaleChallReadabilityScore,
        Self::DaleChallDifficultWordCount,
        Self::SpacheReadabilityScore,
        Self::SpacheDifficultWordCount,
        Self::WordCount,
        Self::AverageWordsPerSentence,
        Self::ReadingTime,
    ];

    /// The metric's key in the score set.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FleschKincaidReadingEase => "fleschkincaidreadingease",
            Self::FleschKincaidGradeLevel => "fleschkincaidgradelevel",
            Self::GunningFogScore => "gunningfogscore",
            Self::ColemanLiauIndex => "colemanliauindex",
            Self::SmogIndex => "smogindex",
            Self::AutomatedReadabilityIndex => "automatedreadabilityindex",
            Self::DaleChallReadabilityScore => "dalechallreadabilityscore",
            Self::DaleChallDifficultWordCount => "dalechalldifficultwordcount",
            Self::SpacheReadabilityScore => "spachereadabilityscore",
            Self::SpacheDifficultWordCount => "spachedifficultwordcount",
            Self::WordCount => "wordcount",
            Self::AverageWordsPerSentence => "averagewordspersentence",
            Self::ReadingTime => "readingtime",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FleschKincaidReadingEase => "Flesch-Kincaid reading ease",
            Self::FleschKincaidGradeLevel => "Flesch-Kincaid grade level",
            Self::GunningFogScore => "Gunning Fog score",
            Self::ColemanLiauIndex => "Coleman-Liau index",
            Self::SmogIndex => "SMOG index",
            Self::AutomatedReadabilityIndex => "Automated readability index",
            Self::DaleChallReadabilityScore => "Dale-Chall readability score",
            Self::DaleChallDifficultWordCount => "Dale-Chall difficult words",
            Self::SpacheReadabilityScore => "Spache readability score",
            Self::SpacheDifficultWordCount => "Spache difficult words",
            Self::WordCount => "Word count",
            Self::AverageWordsPerSentence => "Average words per sentence",
            Self::ReadingTime => "Reading time (seconds)",
        }
    }

    /// Published range for formula scores; counts are unbounded.
    pub const fn range(self) -> Option<(f64, f64)> {
        match self {
            Self::FleschKincaidReadingEase => Some((0.0, 100.0)),
            Self::FleschKincaidGradeLevel
            | Self::ColemanLiauIndex
            | Self::SmogIndex
            | Self::AutomatedReadabilityIndex => Some((0.0, 12.0)),
            Self::GunningFogScore => Some((0.0, 19.0)),
            Self::DaleChallReadabilityScore => Some((0.0, 10.0)),
            Self::SpacheReadabilityScore => Some((0.0, 5.0)),
            Self::DaleChallDifficultWordCount
            | Self::SpacheDifficultWordCount
            | Self::WordCount
            | Self::AverageWordsPerSentence
            | Self::ReadingTime => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single score value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
    /// A formula result or average.
    Float(f64),
    /// A count or a number of seconds.
    Integer(u64),
}

impl Score {
    /// The value as a float, whichever variant it is.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Float(value) => value,
            Self::Integer(value) => value as f64,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// Every metric for one text, under its fixed key.
///
/// Serializes as a flat object whose keys follow [`Metric::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreSet {
    /// Flesch-Kincaid reading ease, 0 to 100.
    #[serde(rename = "fleschkincaidreadingease")]
    pub flesch_kincaid_reading_ease: f64,
    /// Flesch-Kincaid grade level, 0 to 12.
    #[serde(rename = "fleschkincaidgradelevel")]
    pub flesch_kincaid_grade_level: f64,
    /// Gunning Fog score, 0 to 19.
    #[serde(rename = "gunningfogscore")]
    pub gunning_fog_score: f64,
    /// Coleman-Liau index, 0 to 12.
    #[serde(rename = "colemanliauindex")]
    pub coleman_liau_index: f64,
    /// SMOG index, 0 to 12.
    #[serde(rename = "smogindex")]
    pub smog_index: f64,
    /// Automated Readability Index, 0 to 12.
    #[serde(rename = "automatedreadabilityindex")]
    pub automated_readability_index: f64,
    /// Dale-Chall readability score, 0 to 10.
    #[serde(rename = "dalechallreadabilityscore")]
    pub dale_chall_readability_score: f64,
    /// Words missing from the Dale-Chall list.
    #[serde(rename = "dalechalldifficultwordcount")]
    pub dale_chall_difficult_word_count: u64,
    /// Revised Spache readability score, 0 to 5.
    #[serde(rename = "spachereadabilityscore")]
    pub spache_readability_score: f64,
    /// Distinct words missing from the Spache list.
    #[serde(rename = "spachedifficultwordcount")]
    pub spache_difficult_word_count: u64,
    /// Number of words.
    #[serde(rename = "wordcount")]
    pub word_count: u64,
    /// Rounded to one decimal place.
    #[serde(rename = "averagewordspersentence")]
    pub average_words_per_sentence: f64,
    /// Estimated reading time in whole seconds.
    #[serde(rename = "readingtime")]
    pub reading_time: u64,
}

impl ScoreSet {
    /// Look up one metric.
    pub fn get(&self, metric: Metric) -> Score {
        match metric {
            Metric::FleschKincaidReadingEase => Score::Float(self.flesch_kincaid_reading_ease),
            Metric::FleschKincaidGradeLevel => Score::Float(self.flesch_kincaid_grade_level),
            Metric::GunningFogScore => Score::Float(self.gunning_fog_score),
            Metric::ColemanLiauIndex => Score::Float(self.coleman_liau_index),
            Metric::SmogIndex => Score::Float(self.smog_index),
            Metric::AutomatedReadabilityIndex => Score::Float(self.automated_readability_index),
            Metric::DaleChallReadabilityScore => Score::Float(self.dale_chall_readability_score),
            Metric::DaleChallDifficultWordCount => {
                Score::Integer(self.dale_chall_difficult_word_count)
            }
            Metric::SpacheReadabilityScore => Score::Float(self.spache_readability_score),
            Metric::SpacheDifficultWordCount => Score::Integer(self.spache_difficult_word_count),
            Metric::WordCount => Score::Integer(self.word_count),
            Metric::AverageWordsPerSentence => Score::Float(self.average_words_per_sentence),
            Metric::ReadingTime => Score::Integer(self.reading_time),
        }
    }

    /// All metrics with their values, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (Metric, Score)> + '_ {
        Metric::ALL.into_iter().map(|metric| (metric, self.get(metric)))
    }
}

/// Round to the published precision and clamp to the metric's range.
fn publish(metric: Metric, raw: f64) -> f64 {
    let rounded = round_to(raw, SCORE_PRECISION);
    match metric.range() {
        Some((min, max)) => rounded.clamp(min, max),
        None => rounded,
    }
}

/// Seconds needed to read `words` at `speed` words per minute, truncated.
fn reading_seconds(words: usize, speed: u32) -> u64 {
    words as u64 * 60 / u64::from(speed.max(1))
}

/// Format seconds as `H:MM:SS`. Hours are not padded and have no upper bound.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let seconds = seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// The public entry point for readability calculations.
///
/// Holds a [`ReadingSpeedProvider`]; the reading speed is read once per call.
#[derive(Debug, Clone, Default)]
pub struct Calculator<P = Option<i64>> {
    speed: P,
}

impl<P: ReadingSpeedProvider> Calculator<P> {
    /// Create a calculator reading its speed from `speed`.
    pub const fn new(speed: P) -> Self {
        Self { speed }
    }

    /// The configured reading speed in words per minute.
    ///
    /// Missing, zero and negative values silently fall back to
    /// [`DEFAULT_READING_SPEED`].
    pub fn reading_speed(&self) -> u32 {
        match self.speed.configured_reading_speed() {
            Some(speed) if speed > 0 => u32::try_from(speed).unwrap_or(u32::MAX),
            _ => DEFAULT_READING_SPEED,
        }
    }

    /// Replace tabs and whitespace runs with single spaces.
    pub fn clean_for_calculation(&self, text: &str) -> String {
        text::clean_for_calculation(text)
    }

    /// Estimated reading time in whole seconds: `floor(words / speed * 60)`.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn calculate_reading_time(&self, text: &str) -> u64 {
        let words = statistics::word_count(&self.clean_for_calculation(text));
        reading_seconds(words, self.reading_speed())
    }

    /// Format seconds as `H:MM:SS`. See [`format_time`].
    pub fn format_time(&self, seconds: u64) -> String {
        format_time(seconds)
    }

    /// Compute the full score set for a text.
    ///
    /// The text is cleaned and measured once; every metric comes from the
    /// same measurement.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn calculate_scores(&self, text: &str) -> ScoreSet {
        let cleaned = self.clean_for_calculation(text);
        let stats = TextStatistics::new(&cleaned);
        let speed = self.reading_speed();

        let scores = ScoreSet {
            flesch_kincaid_reading_ease: publish(
                Metric::FleschKincaidReadingEase,
                stats.flesch_kincaid_reading_ease(),
            ),
            flesch_kincaid_grade_level: publish(
                Metric::FleschKincaidGradeLevel,
                stats.flesch_kincaid_grade_level(),
            ),
            gunning_fog_score: publish(Metric::GunningFogScore, stats.gunning_fog_score()),
            coleman_liau_index: publish(Metric::ColemanLiauIndex, stats.coleman_liau_index()),
            smog_index: publish(Metric::SmogIndex, stats.smog_index()),
            automated_readability_index: publish(
                Metric::AutomatedReadabilityIndex,
                stats.automated_readability_index(),
            ),
            dale_chall_readability_score: publish(
                Metric::DaleChallReadabilityScore,
                stats.dale_chall_readability_score(),
            ),
            dale_chall_difficult_word_count: stats.dale_chall_difficult_word_count() as u64,
            spache_readability_score: publish(
                Metric::SpacheReadabilityScore,
                stats.spache_readability_score(),
            ),
            spache_difficult_word_count: stats.spache_difficult_word_count() as u64,
            word_count: stats.word_count() as u64,
            average_words_per_sentence: publish(
                Metric::AverageWordsPerSentence,
                stats.average_words_per_sentence(),
            ),
            reading_time: reading_seconds(stats.word_count(), speed),
        };

        tracing::debug!(
            words = scores.word_count,
            grade = scores.flesch_kincaid_grade_level,
            speed,
            "calculated scores"
        );
        scores
    }
}
