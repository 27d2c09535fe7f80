// WHY: connective words that may sit between letter-matched words of a full term
// without consuming an abbreviation letter ("region of interest (ROI)")

/// Stopwords permitted between the words of a full term
pub const STOPWORDS: &[&str] = &["a", "of", "are", "with", "the", "in", "to"];

/// Check if a word is one of the permitted connective stopwords
/// Matching is exact and lowercase, the same way the term pattern matches them
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Render the stopword set as a regex alternation (non-capturing)
pub fn stopword_alternation() -> String {
    format!("(?:{})", STOPWORDS.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopword_membership() {
        for word in ["a", "of", "are", "with", "the", "in", "to"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
        assert!(!is_stopword("pars"));
        assert!(!is_stopword("Of"), "Stopwords are matched lowercase only");
        assert!(!is_stopword(""));
    }

    #[test]
    fn test_stopword_alternation() {
        assert_eq!(stopword_alternation(), "(?:a|of|are|with|the|in|to)");
    }
}
