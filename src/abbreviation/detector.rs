// WHY: single left-to-right scan for parenthetical abbreviation candidates;
// the length bound keeps per-abbreviation pattern synthesis small

use regex_automata::meta::{CapturesMatches, Regex};
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

/// Character that joins the parts of a multi-part abbreviation ("A/B")
pub const SEPARATOR: char = '/';

/// Default upper bound on abbreviation spelling length (characters)
pub const DEFAULT_MAX_ABBREVIATION_LEN: usize = 8;

// "(ROIs)" strips the plural only after an uppercase letter; "(ms)" keeps its s
static ABBREVIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?:(?P<plural>[A-Za-z/]*[A-Z])s|(?P<bare>[A-Za-z/]+))[);]")
        .expect("valid abbreviation regex")
});

/// One parenthetical abbreviation candidate, borrowed from the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedAbbreviation<'h> {
    /// Spelling as it appears in the text, plural `s` removed
    pub spelling: &'h str,
    /// Byte range of the whole marker, from `(` through `)` or `;`
    pub span: Range<usize>,
    /// Whether a trailing plural `s` was stripped from the spelling
    pub plural: bool,
}

impl<'h> DetectedAbbreviation<'h> {
    /// Letters of the abbreviation, separators removed
    pub fn letters(&self) -> impl Iterator<Item = char> + 'h {
        self.spelling.chars().filter(|&c| c != SEPARATOR)
    }
}

/// Scanner for parenthetical abbreviations
#[derive(Debug, Clone)]
pub struct AbbreviationDetector {
    max_len: usize,
}

impl AbbreviationDetector {
    /// Create a detector that skips spellings longer than `max_len` characters
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Lazily detect abbreviations in document order
    pub fn detect<'h>(&self, text: &'h str) -> Detections<'h> {
        Detections {
            matches: ABBREVIATION_RE.captures_iter(text),
            text,
            max_len: self.max_len,
        }
    }
}

impl Default for AbbreviationDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ABBREVIATION_LEN)
    }
}

/// Iterator over detected abbreviations (one-shot, finite)
pub struct Detections<'h> {
    matches: CapturesMatches<'static, 'h>,
    text: &'h str,
    max_len: usize,
}

impl<'h> Iterator for Detections<'h> {
    type Item = DetectedAbbreviation<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        for caps in self.matches.by_ref() {
            let Some(whole) = caps.get_match() else {
                continue;
            };
            let (group, plural) = match caps.get_group_by_name("plural") {
                Some(span) => (span, true),
                None => match caps.get_group_by_name("bare") {
                    Some(span) => (span, false),
                    None => continue,
                },
            };

            let spelling = &self.text[group.range()];
            let len = spelling.chars().count();
            if len > self.max_len {
                debug!("Skipping oversized abbreviation {} ({} > {} chars)", spelling, len, self.max_len);
                continue;
            }

            return Some(DetectedAbbreviation {
                spelling,
                span: whole.range(),
                plural,
            });
        }
        None
    }
}
