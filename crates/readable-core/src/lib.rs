//! Core library for readable.
//!
//! Computes readability metrics (Flesch-Kincaid, Gunning Fog, Coleman-Liau,
//! SMOG, Automated Readability Index, Dale-Chall, Spache) and an estimated
//! reading time for a block of text, and packages the result as metadata for
//! a file or URL resource.
//!
//! # Modules
//!
//! - [`statistics`] - Text statistics engine (counts and raw formulas)
//! - [`calculator`] - Reading speed, reading time and the score set
//! - [`extractor`] - Resource validation and metadata extraction
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use readable_core::calculator::{Calculator, Metric};
//!
//! let calculator = Calculator::new(None::<i64>);
//! let scores = calculator.calculate_scores("The cat sat on the mat. The dog ran fast.");
//!
//! println!("{:?}", scores.get(Metric::FleschKincaidGradeLevel));
//! ```
#![deny(unsafe_code)]

pub mod calculator;
pub mod config;
pub mod dictionaries;
pub mod error;
pub mod extractor;
pub mod inflection;
pub mod markdown;
pub mod mimetype;
pub mod statistics;
pub mod text;

pub use calculator::{
    Calculator, DEFAULT_READING_SPEED, Metric, ReadingSpeedProvider, Score, ScoreSet,
};
pub use config::{Config, ConfigLoader, LogLevel};
pub use error::{ConfigError, ConfigResult, ExtractionError, ExtractionResult};
pub use extractor::{ContentExtractor, ReadabilityMetadata, ReadableExtractor};
pub use statistics::TextStatistics;

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
