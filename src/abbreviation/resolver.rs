// WHY: the term grammar is permissive (optional letters, stopwords, an extra word),
// so every pattern hit is checked against the abbreviation's letters before use

use std::ops::Range;
use thiserror::Error;
use tracing::{info, warn};

use super::detector::SEPARATOR;
use super::pattern::{TermPattern, TermPatternBuilder};

/// Why an abbreviation has no term; callers see both as "no term"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unresolved {
    #[error("no full term found for abbreviation {abbreviation}")]
    NoTermFound { abbreviation: String },

    #[error("candidate {candidate:?} for abbreviation {abbreviation} lacks letter {missing:?}")]
    ValidationFailed {
        abbreviation: String,
        candidate: String,
        missing: char,
    },
}

/// Validated full term for an abbreviation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCandidate {
    /// Byte range of the term in the document
    pub span: Range<usize>,
    /// Term text, surrounding whitespace removed
    pub text: String,
}

/// Find the first abbreviation letter missing from a phrase (case-insensitive)
pub fn missing_letter(abbreviation: &str, phrase: &str) -> Option<char> {
    let phrase = phrase.to_lowercase();
    abbreviation
        .chars()
        .filter(|&c| c != SEPARATOR)
        .find(|letter| !phrase.contains(letter.to_ascii_lowercase()))
}

/// Locates and validates full terms for detected abbreviations
#[derive(Debug, Clone, Default)]
pub struct TermResolver {
    builder: TermPatternBuilder,
}

impl TermResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the pattern for an abbreviation and resolve it against the text
    pub fn resolve_abbreviation(&self, text: &str, abbreviation: &str) -> Result<TermCandidate, Unresolved> {
        match self.builder.build(abbreviation) {
            Ok(pattern) => self.resolve(text, abbreviation, &pattern),
            Err(e) => {
                warn!("Term pattern rejected for {}: {:#}", abbreviation, e);
                Err(Unresolved::NoTermFound {
                    abbreviation: abbreviation.to_string(),
                })
            }
        }
    }

    /// Apply a term pattern and validate the leftmost candidate
    pub fn resolve(
        &self,
        text: &str,
        abbreviation: &str,
        pattern: &TermPattern,
    ) -> Result<TermCandidate, Unresolved> {
        let Some(found) = pattern.first_match(text) else {
            info!("No full term detected for abbreviation {}", abbreviation);
            return Err(Unresolved::NoTermFound {
                abbreviation: abbreviation.to_string(),
            });
        };

        let span = trimmed_span(text, found.term);
        let candidate = &text[span.clone()];

        if let Some(missing) = missing_letter(abbreviation, candidate) {
            info!(
                "Rejected term {:?} for abbreviation {}: letter {:?} not present",
                candidate, abbreviation, missing
            );
            return Err(Unresolved::ValidationFailed {
                abbreviation: abbreviation.to_string(),
                candidate: candidate.to_string(),
                missing,
            });
        }

        Ok(TermCandidate {
            text: candidate.to_string(),
            span,
        })
    }
}

/// Shrink a byte range so it excludes leading and trailing whitespace
fn trimmed_span(text: &str, span: Range<usize>) -> Range<usize> {
    let slice = &text[span.clone()];
    let start = span.start + (slice.len() - slice.trim_start().len());
    let end = span.end - (slice.len() - slice.trim_end().len());
    start..end.max(start)
}
