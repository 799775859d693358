//! English singular/plural forms for word-list lookups.
//!
//! The familiar-word lists only carry one form of most nouns, so the
//! Dale-Chall and Spache checks try a word, its singular, and its plural.
//! The rules cover regular English plurals, a table of irregular pairs, and
//! nouns that do not change.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Irregular (singular, plural) pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("person", "people"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("ox", "oxen"),
    ("die", "dice"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("wolf", "wolves"),
    ("calf", "calves"),
    ("shelf", "shelves"),
    ("loaf", "loaves"),
    ("thief", "thieves"),
    ("self", "selves"),
    ("elf", "elves"),
    ("datum", "data"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("cactus", "cacti"),
    ("fungus", "fungi"),
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("thesis", "theses"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("hero", "heroes"),
    ("echo", "echoes"),
    ("movie", "movies"),
    ("cookie", "cookies"),
    ("shoe", "shoes"),
    ("toe", "toes"),
    ("canoe", "canoes"),
];

/// Nouns whose singular and plural are the same.
static UNCOUNTABLE: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "sheep", "fish", "deer", "moose", "series", "species", "news", "information", "rice",
        "equipment", "money", "furniture", "luggage", "advice", "music", "police", "aircraft",
        "salmon", "trout", "bison", "offspring",
    ])
});

static SINGULAR_TO_PLURAL: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR.iter().copied().collect());

static PLURAL_TO_SINGULAR: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR.iter().map(|&(s, p)| (p, s)).collect());

fn ends_with_consonant_y(word: &str) -> bool {
    let mut chars = word.chars().rev();
    chars.next() == Some('y')
        && chars
            .next()
            .is_some_and(|c| c.is_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

/// Singular form of a lowercased word.
///
/// Words that already look singular come back unchanged.
pub fn singular(word: &str) -> String {
    if UNCOUNTABLE.contains(word) {
        return word.to_string();
    }
    if let Some(&single) = PLURAL_TO_SINGULAR.get(word) {
        return single.to_string();
    }
    if SINGULAR_TO_PLURAL.contains_key(word) {
        return word.to_string();
    }

    if word.len() > 4
        && let Some(stem) = word.strip_suffix("ies")
    {
        return format!("{stem}y");
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes", "oes"] {
        if word.len() > suffix.len()
            && let Some(stem) = word.strip_suffix("es")
            && word.ends_with(suffix)
        {
            return stem.to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if word.len() > 2
        && let Some(stem) = word.strip_suffix('s')
    {
        return stem.to_string();
    }

    word.to_string()
}

/// Plural form of a lowercased word.
pub fn plural(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(word) {
        return word.to_string();
    }
    if let Some(&many) = SINGULAR_TO_PLURAL.get(word) {
        return many.to_string();
    }
    if PLURAL_TO_SINGULAR.contains_key(word) {
        return word.to_string();
    }

    if ends_with_consonant_y(word) {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_singulars() {
        assert_eq!(singular("others"), "other");
        assert_eq!(singular("words"), "word");
        assert_eq!(singular("cities"), "city");
        assert_eq!(singular("boxes"), "box");
        assert_eq!(singular("classes"), "class");
        assert_eq!(singular("places"), "place");
    }

    #[test]
    fn singular_leaves_singular_words_alone() {
        assert_eq!(singular("class"), "class");
        assert_eq!(singular("bus"), "bus");
        assert_eq!(singular("is"), "is");
        assert_eq!(singular("word"), "word");
    }

    #[test]
    fn irregular_and_uncountable() {
        assert_eq!(singular("children"), "child");
        assert_eq!(singular("shoes"), "shoe");
        assert_eq!(singular("sheep"), "sheep");
        assert_eq!(plural("child"), "children");
        assert_eq!(plural("sheep"), "sheep");
        assert_eq!(plural("knife"), "knives");
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(plural("city"), "cities");
        assert_eq!(plural("day"), "days");
        assert_eq!(plural("box"), "boxes");
        assert_eq!(plural("church"), "churches");
        assert_eq!(plural("word"), "words");
    }
}
