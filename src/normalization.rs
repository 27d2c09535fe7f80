// WHY: cleanup runs before detection so hyphenated line wraps and stray encodings
// don't split terms or abbreviations across tokens

/// Whitespace as understood by the cleaner; non-ASCII characters count since they
/// collapse into a single space
fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C') || !ch.is_ascii()
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\r' | '\n' | '\t')
}

/// Length in bytes of a blank run that ends a hyphenated line wrap, measured up to
/// and including its last line break or tab
fn line_wrap_len(text: &str) -> Option<usize> {
    let mut wrap_end = None;
    for (idx, ch) in text.char_indices() {
        if !is_blank(ch) {
            break;
        }
        if is_line_break(ch) {
            wrap_end = Some(idx + ch.len_utf8());
        }
    }
    wrap_end
}

/// Clean a document before abbreviation detection
///
/// Runs of non-ASCII characters become one space, a hyphen followed by a line break
/// is joined with the next line, and remaining whitespace runs collapse to one space.
/// Leading and trailing whitespace is collapsed but not trimmed.
pub fn clean_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    clean_text_into(text, &mut result);
    result
}

/// Clean into a supplied buffer so batch callers can reuse one allocation
pub fn clean_text_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut pending_space = false;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        let width = ch.len_utf8();

        if ch == '-' {
            if let Some(wrap) = line_wrap_len(&rest[width..]) {
                rest = &rest[width + wrap..];
                continue;
            }
        }

        if is_blank(ch) {
            pending_space = true;
        } else {
            if pending_space {
                buffer.push(' ');
                pending_space = false;
            }
            buffer.push(ch);
        }
        rest = &rest[width..];
    }

    if pending_space {
        buffer.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        assert_eq!(clean_text("I am  a \nbad\r\n\tstr-\ning."), "I am a bad string.");
    }

    #[test]
    fn test_clean_text_into_buffer_reuse() {
        let mut buffer = String::new();

        clean_text_into("Line one.\nLine two.", &mut buffer);
        assert_eq!(buffer, "Line one. Line two.");

        clean_text_into("Different\r\ncontent.", &mut buffer);
        assert_eq!(buffer, "Different content.");
    }

    #[test]
    fn test_clean_text_non_ascii() {
        assert_eq!(clean_text("café au lait"), "caf au lait");
        assert_eq!(clean_text("na\u{ef}ve"), "na ve");
        assert_eq!(clean_text("crab \u{1F980}\u{1F980} here"), "crab here");
    }

    #[test]
    fn test_clean_text_no_trim() {
        assert_eq!(clean_text("  Leading and trailing  "), " Leading and trailing ");
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("\n\n"), " ");
    }

    #[test]
    fn test_clean_text_hyphen_without_break_kept() {
        assert_eq!(clean_text("T-cell - receptor"), "T-cell - receptor");
        assert_eq!(clean_text("ends with -"), "ends with -");
    }

    #[test]
    fn test_clean_text_wrap_keeps_indent_space() {
        // Blanks after the last line break stay and collapse to one space
        assert_eq!(clean_text("well-\n   known"), "well known");
        assert_eq!(clean_text("well- \r\n\tknown"), "wellknown");
    }

    #[test]
    fn test_clean_text_consecutive_wraps() {
        assert_eq!(clean_text("a-\n-\nb"), "ab");
    }
}
