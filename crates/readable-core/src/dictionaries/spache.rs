//! Word list for the revised Spache formula, aimed at primary-grade text.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::inflection;

/// Familiar words, lowercased.
pub static SPACHE_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| WORDS.iter().copied().collect());

const WORDS: &[&str] = &[
    "a", "able", "about", "above", "across", "act", "afraid", "after", "afternoon", "again",
    "against", "ago", "air", "airplane", "alike", "all", "almost", "alone", "along", "already",
    "also", "always", "am", "among", "an", "and", "angry", "animal", "another", "answer", "any",
    "anyone", "anything", "anyway", "anywhere", "apple", "are", "around", "arrow", "as", "ask",
    "asleep", "at", "ate", "away", "baby", "back", "bad", "bag", "baker", "ball", "balloon", "band",
    "bank", "bark", "barn", "basket", "be", "bear", "beat", "beautiful", "became", "because", "bed",
    "bee", "been", "before", "began", "begin", "behind", "being", "believe", "bell", "belong",
    "best", "better", "between", "big", "bill", "bird", "birthday", "bite", "black", "blanket",
    "blow", "blue", "board", "boat", "body", "book", "both", "bottom", "bought", "bow", "box",
    "boy", "branch", "brave", "bread", "break", "breakfast", "bright", "bring", "broke", "brother",
    "brought", "brown", "build", "building", "built", "bump", "bunny", "burn", "bus", "busy", "but",
    "butter", "buy", "by", "cage", "cake", "call", "came", "camp", "can", "can't", "candy", "cap",
    "captain", "car", "care", "careful", "carry", "cat", "catch", "caught", "cent", "chair",
    "chicken", "child", "children", "christmas", "circus", "city", "class", "clean", "clear",
    "climb", "clock", "close", "cloth", "clothes", "clown", "coat", "cold", "color", "come",
    "coming", "cook", "cookie", "corn", "corner", "could", "couldn't", "count", "country", "cow",
    "cowboy", "cross", "cry", "cup", "cut", "dark", "day", "dear", "deep", "deer", "desk", "did",
    "didn't", "dinner", "do", "does", "dog", "doll", "don't", "done", "door", "down", "draw",
    "dream", "dress", "drink", "drive", "drop", "dry", "duck", "each", "ear", "early", "earth",
    "easy", "eat", "egg", "eight", "else", "end", "enough", "evening", "ever", "every", "everyone",
    "everything", "eye", "face", "fair", "fall", "family", "far", "farm", "farmer", "fast", "fat",
    "father", "feed", "feel", "feet", "fell", "felt", "fence", "few", "field", "fight", "fill",
    "find", "fine", "finger", "finish", "fire", "first", "fish", "five", "fix", "flag", "floor",
    "flower", "fly", "follow", "food", "foot", "for", "forest", "forget", "found", "four", "fox",
    "free", "friend", "frog", "from", "front", "fruit", "full", "fun", "funny", "game", "garden",
    "gate", "gave", "get", "girl", "give", "glad", "glass", "go", "goat", "goes", "going", "gold",
    "gone", "good", "good-by", "got", "grade", "grandfather", "grandmother", "grass", "gray",
    "great", "green", "grew", "ground", "grow", "guess", "had", "hair", "half", "hand", "hang",
    "happen", "happy", "hard", "has", "hat", "have", "he", "head", "hear", "heard", "help", "hen",
    "her", "here", "hid", "hide", "high", "hill", "him", "himself", "his", "hit", "hold", "hole",
    "home", "hop", "hope", "horse", "hot", "house", "how", "hungry", "hunt", "hurry", "hurt", "i",
    "ice", "if", "in", "inside", "into", "is", "it", "its", "jump", "just", "keep", "kept", "kick",
    "kind", "king", "kitten", "knew", "know", "lady", "laid", "lake", "land", "large", "last",
    "late", "laugh", "lay", "lazy", "lead", "leaf", "learn", "leave", "left", "leg", "let",
    "letter", "light", "like", "line", "lion", "listen", "little", "live", "long", "look", "lost",
    "lot", "loud", "love", "low", "lunch", "made", "mail", "make", "man", "many", "may", "maybe",
    "me", "mean", "meet", "men", "met", "middle", "might", "milk", "mind", "minute", "miss",
    "money", "monkey", "month", "moon", "more", "morning", "most", "mother", "mouse", "mouth",
    "move", "much", "must", "my", "myself", "name", "near", "neck", "need", "nest", "never", "new",
    "next", "nice", "night", "nine", "no", "noise", "none", "noon", "nose", "not", "nothing", "now",
    "number", "nut", "o'clock", "of", "off", "often", "oh", "old", "on", "once", "one", "only",
    "open", "or", "other", "our", "out", "outside", "over", "own", "page", "paint", "pair", "paper",
    "park", "part", "party", "pass", "pay", "peanut", "pen", "penny", "people", "pet", "pick",
    "picture", "pie", "piece", "pig", "place", "plant", "play", "please", "pocket", "point",
    "policeman", "pond", "pony", "poor", "pretty", "pull", "pumpkin", "puppy", "push", "put",
    "queen", "quick", "quiet", "quite", "rabbit", "race", "rain", "ran", "rang", "rat", "reach",
    "read", "ready", "real", "red", "rest", "ride", "right", "ring", "river", "road", "rock",
    "rode", "roll", "roof", "room", "rope", "round", "row", "run", "said", "sail", "same", "sang",
    "sat", "saw", "say", "school", "sea", "seat", "second", "see", "seed", "seem", "seen", "sell",
    "send", "set", "seven", "shall", "she", "sheep", "ship", "shoe", "shop", "short", "should",
    "show", "shut", "sick", "side", "sign", "sing", "sister", "sit", "six", "sky", "sleep", "slow",
    "small", "smile", "snow", "so", "soft", "some", "something", "sometime", "soon", "sound",
    "space", "spot", "spring", "squirrel", "stand", "star", "start", "stay", "step", "stick",
    "still", "stood", "stop", "store", "story", "street", "strong", "such", "sugar", "summer",
    "sun", "supper", "suppose", "sure", "surprise", "swim", "table", "tail", "take", "talk", "tall",
    "teacher", "teeth", "tell", "ten", "than", "thank", "that", "the", "their", "them", "then",
    "there", "these", "they", "thing", "think", "third", "this", "those", "though", "thought",
    "three", "threw", "through", "throw", "tie", "time", "tiny", "to", "today", "together", "told",
    "too", "took", "top", "toy", "train", "tree", "trick", "tried", "truck", "try", "turn",
    "turtle", "two", "under", "until", "up", "upon", "us", "use", "very", "visit", "wait", "wake",
    "walk", "wall", "want", "warm", "was", "wash", "watch", "water", "way", "we", "wear", "weather",
    "well", "went", "were", "wet", "what", "wheel", "when", "where", "which", "while", "white",
    "who", "why", "wide", "will", "wind", "window", "winter", "wish", "with", "without", "woman",
    "wonder", "wood", "word", "work", "world", "would", "write", "yard", "year", "yellow", "yes",
    "yet", "you", "young", "your",
];

/// Check whether a lowercased word (or its singular or plural form) is on the
/// Spache list.
pub fn is_familiar(word: &str) -> bool {
    SPACHE_WORDS.contains(word)
        || SPACHE_WORDS.contains(inflection::singular(word).as_str())
        || SPACHE_WORDS.contains(inflection::plural(word).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_words_are_familiar() {
        for word in ["a", "the", "hard", "word", "read", "learn", "easy", "other", "others"] {
            assert!(is_familiar(word), "{word}");
        }
    }

    #[test]
    fn deal_is_not_a_spache_word() {
        assert!(!is_familiar("deal"));
        assert!(!is_familiar("gem"));
    }
}
