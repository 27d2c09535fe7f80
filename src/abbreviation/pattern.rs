// WHY: the term search pattern is assembled from typed constraints so letter handling
// can be tested without running the matching engine

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use std::fmt;
use std::ops::Range;
use tracing::debug;

use super::detector::SEPARATOR;
use super::stopwords::stopword_alternation;

/// Characters allowed to continue a word after its leading letter
const WORD_TAIL: &str = "[A-Za-z/]*";

/// A single piece of the term pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// A word whose first character is the letter, in either case
    WordStartingWith(char),
    /// Optional `'s` directly after a word
    PossessiveSuffix,
    /// Optional gap before the next word: whitespace with any number of
    /// stopwords, or a hyphen-joined continuation
    OptionalStopwordRun,
    /// One word with no letter requirement, placed just before the parenthesis
    ExtraWord,
}

impl Constraint {
    /// Regex source for this constraint
    pub fn render(&self) -> String {
        match self {
            Constraint::WordStartingWith(letter) => format!(
                "[{}{}]{}",
                letter.to_ascii_uppercase(),
                letter.to_ascii_lowercase(),
                WORD_TAIL
            ),
            Constraint::PossessiveSuffix => "(?:'s)?".to_string(),
            Constraint::OptionalStopwordRun => format!(
                r"(?:\s+(?:{}\s+)*|-{}\s*)?",
                stopword_alternation(),
                WORD_TAIL
            ),
            Constraint::ExtraWord => format!(
                "{}{}{}",
                WORD_TAIL,
                Constraint::PossessiveSuffix.render(),
                Constraint::OptionalStopwordRun.render()
            ),
        }
    }
}

/// The constraints for one abbreviation letter: word, possessive, gap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterConstraint {
    pub letter: char,
    pub parts: [Constraint; 3],
}

impl LetterConstraint {
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            parts: [
                Constraint::WordStartingWith(letter),
                Constraint::PossessiveSuffix,
                Constraint::OptionalStopwordRun,
            ],
        }
    }

    pub fn render(&self) -> String {
        self.parts.iter().map(Constraint::render).collect()
    }
}

/// Where a term pattern matched in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Byte range from the first letter-matched word up to the parenthesis
    pub term: Range<usize>,
    /// Byte range of the parenthetical marker, `(` through `)` or `;`
    pub marker: Range<usize>,
}

/// Compiled search pattern for the full term of one abbreviation
pub struct TermPattern {
    abbreviation: String,
    letters: Vec<LetterConstraint>,
    source: String,
    regex: Regex,
}

impl TermPattern {
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn letters(&self) -> &[LetterConstraint] {
        &self.letters
    }

    /// Regex source the pattern was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Leftmost match of the pattern in the text
    pub fn first_match(&self, text: &str) -> Option<PatternMatch> {
        let mut caps = self.regex.create_captures();
        self.regex.captures(text, &mut caps);
        let term = caps.get_group_by_name("term")?;
        let marker = caps.get_group_by_name("marker")?;
        Some(PatternMatch {
            term: term.range(),
            marker: marker.range(),
        })
    }
}

impl fmt::Debug for TermPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermPattern")
            .field("abbreviation", &self.abbreviation)
            .field("source", &self.source)
            .finish()
    }
}

/// Synthesizes term search patterns from abbreviation letters
#[derive(Debug, Clone, Default)]
pub struct TermPatternBuilder;

impl TermPatternBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One letter constraint per abbreviation letter, separators skipped
    pub fn letter_constraints(&self, abbreviation: &str) -> Vec<LetterConstraint> {
        abbreviation
            .chars()
            .filter(|&c| c != SEPARATOR)
            .map(LetterConstraint::new)
            .collect()
    }

    /// Assemble the regex source for an abbreviation
    ///
    /// Shape: `(?:^|\s)(?P<term>L1(?:L2)?…(?:Ln(?:EXTRA)?)?)(?P<marker>\(ABBRs?[);])`.
    /// The first letter is required. The extra word nests inside the last letter's
    /// optional group, so it is only available once every letter position up to
    /// the last has been offered a word and the final one matched.
    pub fn render(&self, abbreviation: &str) -> String {
        let letters = self.letter_constraints(abbreviation);
        let extra = format!("(?:{})?", Constraint::ExtraWord.render());

        let mut term = String::new();
        let last = letters.len().saturating_sub(1);
        for (index, letter) in letters.iter().enumerate() {
            match (index == 0, index == last) {
                (true, true) => {
                    term.push_str(&letter.render());
                    term.push_str(&extra);
                }
                (true, false) => term.push_str(&letter.render()),
                (false, true) => term.push_str(&format!("(?:{}{})?", letter.render(), extra)),
                (false, false) => term.push_str(&format!("(?:{})?", letter.render())),
            }
        }

        format!(
            r"(?:^|\s)(?P<term>{})(?P<marker>\({}s?[);])",
            term, abbreviation
        )
    }

    /// Build and compile the term pattern for an abbreviation
    pub fn build(&self, abbreviation: &str) -> Result<TermPattern> {
        let letters = self.letter_constraints(abbreviation);
        if letters.is_empty() {
            anyhow::bail!("Abbreviation {abbreviation:?} has no letters");
        }
        if let Some(bad) = abbreviation
            .chars()
            .find(|&c| c != SEPARATOR && !c.is_ascii_alphabetic())
        {
            anyhow::bail!("Abbreviation {abbreviation:?} contains unsupported character {bad:?}");
        }

        let source = self.render(abbreviation);
        debug!("Term pattern for {}: {}", abbreviation, source);

        let regex = Regex::new(&source)
            .with_context(|| format!("Failed to compile term pattern for {abbreviation}"))?;

        Ok(TermPattern {
            abbreviation: abbreviation.to_string(),
            letters,
            source,
            regex,
        })
    }
}
