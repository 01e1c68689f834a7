//! Text heuristics for signatures scraped out of free-form markup.
//!
//! These are not a grammar: parameter types containing a
//! top-level comma (generics) are split incorrectly.
use std::sync::LazyLock;

use regex::Regex;

use crate::ParamEntry;

static CALL_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w*\(.*\)").expect("static call signature pattern"));

/// Trims the text and drops every `;`.
pub fn strip_semicolons(raw: &str) -> String {
    raw.trim().replace(';', "")
}

/// Parameter names of a constructor signature such as `Foo(int x, string y);`.
///
/// The list between the first `(` and the last `)` is split on commas and the
/// last whitespace-delimited token of each piece is taken as the name. Text
/// without a `(` is split as a whole.
pub fn constructor_params(signature: &str) -> Vec<ParamEntry> {
    let list = match signature.find('(') {
        None => signature,
        Some(open) => match signature.rfind(')') {
            Some(close) if close > open => &signature[open + 1..close],
            _ => &signature[open + 1..],
        },
    };

    list.split(',')
        .filter_map(|piece| piece.split_whitespace().last())
        .map(|token| token.trim_end_matches([')', ';']))
        .filter(|name| !name.is_empty())
        .map(ParamEntry::named)
        .collect()
}

/// Isolates `name(args)` from a raw signature block.
///
/// Line breaks are removed first so signatures wrapped by the markup still
/// match. Returns `None` when no call-shaped substring exists.
pub fn extract_call_signature(raw: &str) -> Option<String> {
    let joined: String = raw.chars().filter(|c| !is_line_break(*c)).collect();
    CALL_SIGNATURE
        .find(&joined)
        .map(|found| found.as_str().to_string())
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::is_line_break;

    #[test]
    fn unicode_separators_count_as_line_breaks() {
        assert!(is_line_break('\u{2028}'));
        assert!(is_line_break('\r'));
        assert!(!is_line_break(' '));
        assert!(!is_line_break('\t'));
    }
}
