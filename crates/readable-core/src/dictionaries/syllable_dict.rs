//! Syllable dictionary for word-level syllable counting.
//!
//! Known counts for common words and for words the vowel-group heuristic
//! routinely gets wrong, plus the heuristic itself as a fallback.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Dictionary of words with known syllable counts.
pub static SYLLABLE_DICT: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    let groups: [(usize, &[&str]); 5] = [
        (
            1,
            &[
                "the", "be", "to", "of", "and", "a", "in", "that", "have", "it", "for", "not", "on",
                "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they",
                "we", "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there",
                "their", "what", "so", "up", "out", "if", "who", "get", "which", "some", "time",
                "make", "like", "where", "here", "more", "come", "gone", "done", "give", "live",
                "love", "move", "none", "once", "whole", "were", "eyes", "aisle", "fire",
                "hour", "our", "sure", "rhythm", "through", "though", "friend", "built", "does",
                "goes", "clothes", "months", "breathe", "laughed", "worked", "used", "loved",
            ],
        ),
        (
            2,
            &[
                "people", "about", "other", "into", "over", "after", "also", "any", "only", "very",
                "even", "every", "many", "because", "before", "little", "table", "simple", "able",
                "being", "going", "doing", "seeing", "skiing", "real", "poem", "poet", "giant",
                "quiet", "diet", "science", "patient", "lion", "evening", "police", "orange",
                "business", "answer", "island", "listen", "often", "castle", "whistle", "wanted",
                "needed", "minute", "promise", "purpose", "surface", "welcome", "somewhere",
                "someone", "something", "sometimes", "movement", "statement", "engine", "nature",
                "picture", "future", "include", "presence", "create", "cruel", "fuel", "jewel",
                "prayer", "lower", "power", "tower", "flower", "higher", "ruin",
            ],
        ),
        (
            3,
            &[
                "area", "idea", "video", "radio", "violet", "separate", "diamond", "chocolate",
                "family", "several", "different", "interest", "average", "beautiful", "camera",
                "company", "general", "natural", "probably", "remember", "together", "however",
                "animal", "another", "actual", "alien", "audience", "medium", "delicious",
                "period", "piano", "recipe", "sesame", "apostrophe", "catastrophe", "coyote",
                "anyone", "everyone", "poetry", "quietly", "reality", "usual", "violence",
            ],
        ),
        (
            4,
            &[
                "information", "education", "situation", "especially", "available", "experience",
                "definitely", "apparently", "community", "everybody", "material", "political",
                "particular", "society", "variety", "ability", "activity", "american", "category",
                "ordinary", "necessary", "usually", "actually", "relationship", "phosphorescent",
            ],
        ),
        (
            5,
            &[
                "organization", "necessarily", "administration", "communication", "individual",
                "immediately", "university", "vocabulary", "opportunity", "personality",
            ],
        ),
    ];

    let mut map = HashMap::new();
    for (count, words) in groups {
        map.extend(words.iter().map(|&word| (word, count)));
    }

    map
});

static HIATUS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // media, various, radio (but not special, nation, million)
        r"[^cgstx]ia",
        r"[^cgstx]io([^n]|$)",
        r"iu",
        r"eo($|[nrulgm])",
        r"[^gq]ua",
        r"[^tc]ien([^d]|$)",
        r"iet",
        r"ie(r|st)$",
        r"[eou]ing",
        r"sm$",
        r"^mc",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Look up syllable count in dictionary.
pub fn lookup_syllables(word: &str) -> Option<usize> {
    SYLLABLE_DICT.get(word.to_lowercase().as_str()).copied()
}

const fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Estimate syllables using vowel-group heuristic with adjustments.
///
/// Used as fallback when a word is not in the dictionary. Only ASCII letters
/// take part; a word without any returns 0.
pub fn estimate_syllables(word: &str) -> usize {
    let word: String = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if word.is_empty() {
        return 0;
    }

    let bytes = word.as_bytes();
    let len = bytes.len();

    // 'y' is a vowel except at the start of a word or in front of another vowel.
    let vowel_at = |i: usize| -> bool {
        let b = bytes[i];
        if b == b'y' {
            return i > 0 && !bytes.get(i + 1).is_some_and(|&next| is_vowel(next));
        }
        is_vowel(b)
    };
    let consonant_at = |i: usize| !vowel_at(i);

    let mut syllables: usize = 0;
    let mut previous_was_vowel = false;
    for i in 0..len {
        let is_vowel = vowel_at(i);
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    // Silent trailing e (make, include), keeping consonant + le (table).
    if len >= 3 && word.ends_with('e') && consonant_at(len - 2) && syllables > 1 {
        let consonant_le = word.ends_with("le") && consonant_at(len - 3);
        if !consonant_le {
            syllables -= 1;
        }
    }

    // -es only adds a syllable after a sibilant (boxes, places, tables).
    if len >= 4 && word.ends_with("es") && consonant_at(len - 3) && syllables > 1 {
        let sibilant = matches!(bytes[len - 3], b's' | b'x' | b'z' | b'c' | b'g')
            || word.ends_with("ches")
            || word.ends_with("shes");
        let consonant_les = bytes[len - 3] == b'l' && consonant_at(len - 4);
        if !sibilant && !consonant_les {
            syllables -= 1;
        }
    }

    // -ed only adds a syllable after t or d (wanted, needed).
    if len >= 4
        && word.ends_with("ed")
        && consonant_at(len - 3)
        && !matches!(bytes[len - 3], b't' | b'd')
        && syllables > 1
    {
        syllables -= 1;
    }

    // -ely (lovely, namely)
    if word.ends_with("ely") && syllables > 2 {
        syllables -= 1;
    }

    syllables += HIATUS_PATTERNS
        .iter()
        .filter(|pattern| pattern.is_match(&word))
        .count();

    syllables.max(1)
}

/// Count syllables: dictionary lookup with estimation fallback.
///
/// Any non-empty word counts at least one syllable. Each part of a
/// hyphenated compound is counted on its own.
pub fn count_syllables(word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }
    if word.contains('-') {
        let parts = word.split('-').filter(|part| !part.is_empty());
        return parts.map(count_syllables).sum::<usize>().max(1);
    }
    if let Some(count) = lookup_syllables(word) {
        return count;
    }
    estimate_syllables(word).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_lookup() {
        assert_eq!(lookup_syllables("chocolate"), Some(3));
        assert_eq!(lookup_syllables("area"), Some(3));
        assert_eq!(lookup_syllables("The"), Some(1));
        assert_eq!(lookup_syllables("science"), Some(2));
        assert_eq!(lookup_syllables("chlorofluorocarbonation"), None);
    }

    #[test]
    fn silent_e() {
        assert_eq!(estimate_syllables("make"), 1);
        assert_eq!(estimate_syllables("include"), 2);
        assert_eq!(estimate_syllables("presence"), 2);
        assert_eq!(estimate_syllables("table"), 2);
        assert_eq!(estimate_syllables("the"), 1);
    }

    #[test]
    fn inflection_endings() {
        assert_eq!(estimate_syllables("jumped"), 1);
        assert_eq!(estimate_syllables("wanted"), 2);
        assert_eq!(estimate_syllables("makes"), 1);
        assert_eq!(estimate_syllables("boxes"), 2);
        assert_eq!(estimate_syllables("tables"), 2);
        assert_eq!(estimate_syllables("playing"), 2);
    }

    #[test]
    fn split_vowel_pairs() {
        assert_eq!(estimate_syllables("audience"), 3);
        assert_eq!(estimate_syllables("alien"), 3);
        assert_eq!(estimate_syllables("medium"), 3);
        assert_eq!(estimate_syllables("delicious"), 3);
        assert_eq!(estimate_syllables("video"), 3);
        assert_eq!(estimate_syllables("actual"), 3);
        assert_eq!(estimate_syllables("happier"), 3);
        assert_eq!(estimate_syllables("tourism"), 3);
    }

    #[test]
    fn long_words() {
        assert_eq!(estimate_syllables("phosphorescent"), 4);
        assert_eq!(estimate_syllables("antidisestablishmentarianism"), 12);
        assert!(count_syllables("chlorofluorocarbonation") >= 3);
    }

    #[test]
    fn compounds_count_each_part() {
        assert_eq!(count_syllables("well-known"), 2);
        assert_eq!(
            count_syllables("self-evident"),
            count_syllables("self") + count_syllables("evident")
        );
        assert_eq!(count_syllables("-"), 1);
    }

    #[test]
    fn never_zero_for_words() {
        assert_eq!(count_syllables(""), 0);
        assert_eq!(count_syllables("hmm"), 1);
        assert_eq!(count_syllables("2024"), 1);
        assert_eq!(estimate_syllables("2024"), 0);
    }
}
