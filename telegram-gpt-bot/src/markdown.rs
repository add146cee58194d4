//! MarkdownV2 escaping.
//!
//! One policy for all formatted sends: [`escape_preserving_styles`] keeps
//! balanced `*bold*`, `_italic_`, `~strike~`, and `` `code` `` spans
//! verbatim and escapes every special character outside them. Model output
//! and hand-formatted flow texts both go through it; transient wait
//! messages are sent without any parse mode instead.

const SPECIALS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    '\\',
];

const STYLE_DELIMITERS: &[char] = &['*', '_', '~', '`'];

/// Escapes special characters while keeping balanced style spans intact.
///
/// A span is a non-empty run delimited by the same style character on both
/// ends, not crossing a line break. An unpaired delimiter is escaped like
/// any other special character.
pub fn escape_preserving_styles(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if STYLE_DELIMITERS.contains(&c) {
            if let Some(close) = find_closing(&chars, i) {
                for &span_char in &chars[i..=close] {
                    out.push(span_char);
                }
                i = close + 1;
                continue;
            }
        }
        if SPECIALS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Position of the matching delimiter on the same line, skipping the empty
/// span case (`**`).
fn find_closing(chars: &[char], open: usize) -> Option<usize> {
    let delimiter = chars[open];
    let mut j = open + 1;
    while j < chars.len() && chars[j] != '\n' {
        if chars[j] == delimiter {
            return if j > open + 1 { Some(j) } else { None };
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_span_is_preserved_and_rest_escaped() {
        assert_eq!(
            escape_preserving_styles("*Результат:* готово (1.0)"),
            "*Результат:* готово \\(1\\.0\\)"
        );
    }

    #[test]
    fn unpaired_delimiter_is_escaped() {
        assert_eq!(escape_preserving_styles("2 * 3 = 6"), "2 \\* 3 \\= 6");
    }

    #[test]
    fn spans_do_not_cross_line_breaks() {
        assert_eq!(escape_preserving_styles("*a\nb*"), "\\*a\nb\\*");
    }

    #[test]
    fn code_and_italic_spans_survive() {
        assert_eq!(
            escape_preserving_styles("`code.x` та _курсив_!"),
            "`code.x` та _курсив_\\!"
        );
    }

    #[test]
    fn empty_span_delimiters_are_escaped() {
        assert_eq!(escape_preserving_styles("**"), "\\*\\*");
    }
}
