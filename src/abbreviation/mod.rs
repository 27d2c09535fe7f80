// WHY: orchestration layer tying detection, term resolution and rewriting together;
// every entry point takes its own text and returns a new value

pub mod detector;
pub mod pattern;
pub mod resolver;
pub mod rewriter;
pub mod stem;
pub mod stopwords;

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::debug;

pub use detector::{AbbreviationDetector, DetectedAbbreviation, DEFAULT_MAX_ABBREVIATION_LEN};
pub use pattern::{TermPattern, TermPatternBuilder};
pub use resolver::{TermCandidate, TermResolver, Unresolved};
pub use rewriter::RewriteDirection;

/// Configuration for abbreviation detection
#[derive(Debug, Clone)]
pub struct AbbreviationConfig {
    /// Spellings longer than this (in characters) are skipped before resolution
    pub max_abbreviation_len: usize,
}

impl Default for AbbreviationConfig {
    fn default() -> Self {
        Self {
            max_abbreviation_len: DEFAULT_MAX_ABBREVIATION_LEN,
        }
    }
}

/// Insertion-ordered mapping from abbreviation spelling to its term, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTermMap {
    entries: Vec<(String, Option<String>)>,
    // spelling -> position in `entries`
    index: HashMap<String, usize>,
}

impl AbbreviationTermMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an abbreviation; an existing spelling keeps its first entry
    /// Returns false when the spelling was already present
    pub fn insert(&mut self, abbreviation: &str, term: Option<String>) -> bool {
        if self.contains_key(abbreviation) {
            return false;
        }
        self.index.insert(abbreviation.to_string(), self.entries.len());
        self.entries.push((abbreviation.to_string(), term));
        true
    }

    pub fn contains_key(&self, abbreviation: &str) -> bool {
        self.index.contains_key(abbreviation)
    }

    /// `None` when the spelling is absent, `Some(None)` when it is unresolved
    pub fn get(&self, abbreviation: &str) -> Option<Option<&str>> {
        self.index
            .get(abbreviation)
            .map(|&position| self.entries[position].1.as_deref())
    }

    /// All entries in detection order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(abb, term)| (abb.as_str(), term.as_deref()))
    }

    /// Entries that carry a term, in detection order
    pub fn resolved(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(abb, term)| term.as_deref().map(|t| (abb.as_str(), t)))
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<AbbreviationTermMap> for HashMap<String, Option<String>> {
    fn from(map: AbbreviationTermMap) -> Self {
        map.entries.into_iter().collect()
    }
}

impl FromIterator<(String, Option<String>)> for AbbreviationTermMap {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (abbreviation, term) in iter {
            map.insert(&abbreviation, term);
        }
        map
    }
}

// JSON object in detection order; unresolved abbreviations serialize as null
impl Serialize for AbbreviationTermMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (abbreviation, term) in &self.entries {
            map.serialize_entry(abbreviation, term)?;
        }
        map.end()
    }
}

/// Detects abbreviations, resolves their terms and rewrites documents
#[derive(Debug, Clone, Default)]
pub struct AbbreviationEngine {
    detector: AbbreviationDetector,
    resolver: TermResolver,
}

impl AbbreviationEngine {
    pub fn new(config: AbbreviationConfig) -> Self {
        Self {
            detector: AbbreviationDetector::new(config.max_abbreviation_len),
            resolver: TermResolver::new(),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(AbbreviationConfig::default())
    }

    pub fn detector(&self) -> &AbbreviationDetector {
        &self.detector
    }

    /// Find, but don't rewrite, abbreviations and their terms
    ///
    /// The first detection of a spelling decides its entry. The term pattern depends
    /// only on the spelling, so a later detection would resolve to the same match.
    pub fn findall(&self, text: &str) -> AbbreviationTermMap {
        let mut map = AbbreviationTermMap::new();

        for detected in self.detector.detect(text) {
            if map.contains_key(detected.spelling) {
                debug!("Abbreviation {} already recorded, skipping repeat", detected.spelling);
                continue;
            }
            let term = match self.resolver.resolve_abbreviation(text, detected.spelling) {
                Ok(candidate) => Some(candidate.text),
                Err(reason) => {
                    debug!("Unresolved: {}", reason);
                    None
                }
            };
            map.insert(detected.spelling, term);
        }

        debug!("Found {} abbreviations, {} resolved", map.len(), map.resolved_count());
        map
    }

    /// Replace every occurrence of each resolved abbreviation with its term
    pub fn expandall(&self, text: &str) -> String {
        expand_with(text, &self.findall(text))
    }

    /// Replace every occurrence of each resolved term with its abbreviation
    pub fn compressall(&self, text: &str) -> String {
        compress_with(text, &self.findall(text))
    }

    /// Rewrite in the given direction using this engine's detections
    pub fn rewrite_all(&self, text: &str, direction: RewriteDirection) -> String {
        rewrite_with(text, &self.findall(text), direction)
    }
}

/// Apply every resolved pair of a map, in map order, to an evolving text
pub fn rewrite_with(text: &str, map: &AbbreviationTermMap, direction: RewriteDirection) -> String {
    map.resolved().fold(text.to_string(), |current, (abbreviation, term)| {
        rewriter::rewrite(&current, abbreviation, term, direction)
    })
}

/// Expand with a caller-supplied map
pub fn expand_with(text: &str, map: &AbbreviationTermMap) -> String {
    rewrite_with(text, map, RewriteDirection::Expand)
}

/// Compress with a caller-supplied map
pub fn compress_with(text: &str, map: &AbbreviationTermMap) -> String {
    rewrite_with(text, map, RewriteDirection::Compress)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "This is a test string (TS). I hope it is informative (inf).";

    #[test]
    fn test_findall_sample() {
        let map = AbbreviationEngine::with_default_config().findall(SAMPLE);
        let expected: HashMap<String, Option<String>> = [
            ("TS".to_string(), Some("test string".to_string())),
            ("inf".to_string(), Some("informative".to_string())),
        ]
        .into_iter()
        .collect();
        let actual: HashMap<String, Option<String>> = map.clone().into();
        assert_eq!(actual, expected);
        assert_eq!(map.iter().map(|(abb, _)| abb).collect::<Vec<_>>(), vec!["TS", "inf"]);
    }

    #[test]
    fn test_expandall_sample() {
        assert_eq!(
            AbbreviationEngine::with_default_config().expandall(SAMPLE),
            "This is a test string (test string). I hope it is informative (informative)."
        );
    }

    #[test]
    fn test_compressall_sample() {
        assert_eq!(
            AbbreviationEngine::with_default_config().compressall(SAMPLE),
            "This is a TS (TS). I hope it is inf (inf)."
        );
    }

    #[test]
    fn test_unresolved_entries_are_kept() {
        let text = "(xyz) opens the document. A test string (TS) follows.";
        let map = AbbreviationEngine::with_default_config().findall(text);
        assert_eq!(map.get("xyz"), Some(None));
        assert_eq!(map.get("TS"), Some(Some("test string")));
        assert_eq!(map.get("QQ"), None);
        assert_eq!(map.resolved_count(), 1);
    }

    #[test]
    fn test_oversized_abbreviation_absent() {
        let text = "some noise (ABCDEFGHIJKLMNOPQRST) here";
        let map = AbbreviationEngine::with_default_config().findall(text);
        assert!(map.is_empty());

        let config = AbbreviationConfig { max_abbreviation_len: 3 };
        let map = AbbreviationEngine::new(config).findall("a region of interest (ROI) and more (MORE)");
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("ROI"));
    }

    #[test]
    fn test_map_first_entry_wins() {
        let mut map = AbbreviationTermMap::new();
        assert!(map.insert("TS", Some("test string".to_string())));
        assert!(!map.insert("TS", Some("time series".to_string())));
        assert_eq!(map.get("TS"), Some(Some("test string")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_map_lookup_with_many_entries() {
        let mut map = AbbreviationTermMap::new();
        for i in 0..2000 {
            assert!(map.insert(&format!("A{i}"), Some(format!("term {i}"))));
        }
        assert!(!map.insert("A1999", None));
        assert_eq!(map.len(), 2000);
        assert_eq!(map.get("A1234"), Some(Some("term 1234")));
        assert_eq!(map.iter().next(), Some(("A0", Some("term 0"))));
        assert_eq!(map.iter().last(), Some(("A1999", Some("term 1999"))));
    }

    #[test]
    fn test_expandall_plural_and_separator_abbreviations() {
        let engine = AbbreviationEngine::with_default_config();

        let text = "We kept the principal components (PCs). Two PCs remained.";
        assert_eq!(engine.findall(text).get("PC"), Some(Some("principal components")));
        let expanded = engine.expandall(text);
        assert!(!expanded.contains("PCs"), "{expanded}");

        let text = "magnetic resonance images (MRIs) were read. Each MRI was scored.";
        assert_eq!(
            engine.expandall(text),
            "magnetic resonance images (magnetic resonance images) were read. \
             Each magnetic resonance images was scored."
        );

        let text = "the anterior/posterior (A/P) axis; A/P values";
        assert_eq!(engine.findall(text).get("A/P"), Some(Some("anterior/posterior")));
        assert_eq!(
            engine.expandall(text),
            "the anterior/posterior (anterior/posterior) axis; anterior/posterior values"
        );
    }

    #[test]
    fn test_map_serializes_in_order() {
        let map: AbbreviationTermMap = vec![
            ("TS".to_string(), Some("test string".to_string())),
            ("xyz".to_string(), None),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"TS":"test string","xyz":null}"#);
    }

    #[test]
    fn test_rewrite_all_directions() {
        let engine = AbbreviationEngine::with_default_config();
        assert_eq!(engine.rewrite_all(SAMPLE, RewriteDirection::Expand), engine.expandall(SAMPLE));
        assert_eq!(engine.rewrite_all(SAMPLE, RewriteDirection::Compress), engine.compressall(SAMPLE));
    }
}
