//! Dictionaries for text analysis.
//!
//! Provides curated word sets used by sentence splitting, syllable counting,
//! and the familiar-word formulas (Dale-Chall and Spache).

pub mod abbreviations;
pub mod dale_chall;
pub mod spache;
pub mod syllable_dict;
