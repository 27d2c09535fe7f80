// WHY: expansion matches abbreviation occurrences by morphological root, so "ROIs"
// and "ROI" both expand; stemming is a pure function with no state across calls

use rust_stemmers::{Algorithm, Stemmer};

/// Reduce a word to its stem (lowercased, Snowball English / Porter2 rules)
pub fn stem(word: &str) -> String {
    let lowered = word.to_lowercase();
    Stemmer::create(Algorithm::English).stem(&lowered).into_owned()
}

/// Compare two words by stem
///
/// Words without any alphanumeric character never match; this covers the empty
/// string and stray punctuation, so a failed stem can't make two words "equal".
pub fn stems_equal(word_a: &str, word_b: &str) -> bool {
    if !has_word_content(word_a) || !has_word_content(word_b) {
        return false;
    }
    stem(word_a) == stem(word_b)
}

fn has_word_content(word: &str) -> bool {
    word.chars().any(char::is_alphanumeric)
}
