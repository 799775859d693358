//! Abbreviations that do not end a sentence when followed by a period.
//!
//! Everyday words that double as abbreviations ("in", "no", "sat", "mass")
//! are left out: a sentence ending in one of them is far more common in
//! extracted prose than the abbreviation itself.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Abbreviations, lowercased, without their trailing period.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Titles and honorifics
    set.extend([
        "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "messrs", "mmes", "msgr", "hon",
        "esq", "capt", "col", "gen", "lt", "maj", "sgt", "cpl", "pvt", "adm", "cmdr", "sen", "gov",
        "pres",
    ]);

    // Academic degrees
    set.extend([
        "b.a", "b.s", "m.a", "m.s", "m.b.a", "ph.d", "phd", "m.d", "j.d", "ll.b", "ll.m", "d.d.s",
        "ed.d", "psy.d",
    ]);

    // Latin and reference abbreviations
    set.extend([
        "etc", "vs", "e.g", "i.e", "et al", "cf", "viz", "ibid", "n.b", "p.s", "r.s.v.p", "approx",
        "vol", "nos", "pp", "fig", "eq", "ch", "ref", "refs", "eds", "encl", "misc",
    ]);

    // Time and dates
    set.extend([
        "a.m", "p.m", "b.c", "a.d", "c.e", "b.c.e", "jan", "feb", "mar", "apr", "jun", "jul",
        "aug", "sep", "sept", "oct", "nov", "dec", "mon", "tue", "tues", "wed", "thu", "thur",
        "thurs", "fri",
    ]);

    // Places and organisations
    set.extend([
        "ave", "blvd", "rd", "apt", "ste", "bldg", "dept", "u.s", "u.k", "u.s.a", "e.u", "n.y",
        "calif", "inc", "corp", "ltd", "llc", "bros", "assn", "mfg", "intl",
    ]);

    // Units of measurement
    set.extend([
        "oz", "lb", "lbs", "kg", "mg", "ml", "cm", "mm", "km", "ft", "yd", "sq", "mph", "kph",
        "rpm",
    ]);

    set
});

/// Check if a word is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    let word_lower = word.to_lowercase();
    let trimmed = word_lower.trim_matches('.');
    ABBREVIATIONS.contains(trimmed)
}
