// WHY: rewrites scan an immutable snapshot and emit a fresh buffer span-by-span,
// so inserted text is never re-scanned and offsets never shift under the cursor

use regex_automata::meta::Regex;
use std::ops::Range;
use tracing::{debug, warn};

use super::detector::SEPARATOR;
use super::stem::stems_equal;

/// Direction of a rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteDirection {
    /// Abbreviation occurrences become the full term
    Expand,
    /// Full term occurrences become the abbreviation
    Compress,
}

/// One word of the document with its possessive and trailing gap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    /// Maximal run of alphanumeric/hyphen characters
    pub word: Range<usize>,
    /// `'s`, or `'` after a word ending in `s`; empty when absent
    pub possessive: Range<usize>,
    /// Run of non-word characters up to the next word (possibly empty)
    pub trailing: Range<usize>,
}

/// Cursor-driven word tokenizer over a borrowed text
pub struct Words<'h> {
    text: &'h str,
    cursor: usize,
    /// `/` continues a word instead of ending it ("A/P" is one token)
    join_separator: bool,
}

/// Tokenize a text into words, left to right
pub fn words(text: &str) -> Words<'_> {
    Words { text, cursor: 0, join_separator: false }
}

/// Tokenize with `/`-joined runs kept as single words
pub fn joined_words(text: &str) -> Words<'_> {
    Words { text, cursor: 0, join_separator: true }
}

impl<'h> Iterator for Words<'h> {
    type Item = WordToken;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        let join = self.join_separator;
        let is_word_char = move |c: char| c.is_alphanumeric() || c == '-' || (join && c == SEPARATOR);
        let start = self.cursor + text[self.cursor..].find(is_word_char)?;
        let end = text[start..]
            .find(|c: char| !is_word_char(c))
            .map_or(text.len(), |offset| start + offset);

        let after = &text[end..];
        let possessive_len = if after.starts_with("'s") && !after[2..].starts_with(is_word_char) {
            2
        } else if after.starts_with('\'') && text[start..end].ends_with(['s', 'S']) {
            1
        } else {
            0
        };
        let possessive_end = end + possessive_len;

        let trailing_end = text[possessive_end..]
            .find(is_word_char)
            .map_or(text.len(), |offset| possessive_end + offset);

        self.cursor = trailing_end;
        Some(WordToken {
            word: start..end,
            possessive: end..possessive_end,
            trailing: possessive_end..trailing_end,
        })
    }
}

/// The abbreviation with a plural `s`, as the detector strips it ("PCs", "MRIs")
fn is_plural_of(word: &str, abbreviation: &str) -> bool {
    word.strip_suffix('s')
        .is_some_and(|base| !base.is_empty() && base.eq_ignore_ascii_case(abbreviation))
}

/// Whether a word of the text is an occurrence of the abbreviation
pub fn is_occurrence(word: &str, abbreviation: &str) -> bool {
    is_plural_of(word, abbreviation) || stems_equal(word, abbreviation)
}

/// Replace every occurrence of the abbreviation with the term
///
/// A word is an occurrence when its stem equals the abbreviation's stem or when it
/// is the abbreviation plus a plural `s`. Abbreviations containing `/` are matched
/// against `/`-joined words. A possessive suffix after a replaced word is kept
/// ("TS's" becomes "test string's"). Terminates once the tokenizer runs out of
/// words, including when the abbreviation is the final token of the text.
pub fn expand(text: &str, abbreviation: &str, term: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut replaced = 0usize;

    let tokens = if abbreviation.contains(SEPARATOR) {
        joined_words(text)
    } else {
        words(text)
    };

    for token in tokens {
        if is_occurrence(&text[token.word.clone()], abbreviation) {
            output.push_str(&text[copied..token.word.start]);
            output.push_str(term);
            copied = token.word.end;
            replaced += 1;
        }
    }
    output.push_str(&text[copied..]);

    debug!("Expanded {} occurrence(s) of {} to {:?}", replaced, abbreviation, term);
    output
}

/// Replace every whole-word occurrence of the term with the abbreviation
///
/// Literal match between Unicode word boundaries: morphological variants of the
/// term are left alone.
pub fn compress(text: &str, abbreviation: &str, term: &str) -> String {
    if term.is_empty() {
        return text.to_string();
    }

    let source = format!(r"\b{}\b", regex_syntax::escape(term));
    let regex = match Regex::new(&source) {
        Ok(regex) => regex,
        Err(e) => {
            warn!("Failed to compile term matcher for {:?}: {}", term, e);
            return text.to_string();
        }
    };

    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut replaced = 0usize;

    for found in regex.find_iter(text) {
        output.push_str(&text[copied..found.start()]);
        output.push_str(abbreviation);
        copied = found.end();
        replaced += 1;
    }
    output.push_str(&text[copied..]);

    debug!("Compressed {} occurrence(s) of {:?} to {}", replaced, term, abbreviation);
    output
}

/// Apply one rewrite in the given direction
pub fn rewrite(text: &str, abbreviation: &str, term: &str, direction: RewriteDirection) -> String {
    match direction {
        RewriteDirection::Expand => expand(text, abbreviation, term),
        RewriteDirection::Compress => compress(text, abbreviation, term),
    }
}
