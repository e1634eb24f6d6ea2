//! Text rewriting primitives for the digestion passes.
//!
//! Every pass over the working text has the same shape: find what the pass
//! owns, and hand back the text with those spans removed so later passes
//! cannot re-claim them. These two helpers are that shape.

use regex::Regex;

/// Find every match of `pattern`, returning the captured text of each match
/// and the input with the full matches removed.
///
/// When the pattern has a capture group, group 1 is collected; otherwise the
/// whole match is. The removal always covers the whole match.
#[must_use]
pub fn find_and_strip(pattern: &Regex, text: &str) -> (Vec<String>, String) {
    let mut found = Vec::new();
    for caps in pattern.captures_iter(text) {
        let matched = caps.get(1).or_else(|| caps.get(0));
        if let Some(matched) = matched {
            found.push(matched.as_str().to_string());
        }
    }
    let remainder = pattern.replace_all(text, "").into_owned();
    (found, remainder)
}

/// Locate the first region between an `open` and a `close` match, returning
/// the region's interior and the input with the whole region (tags included)
/// removed.
///
/// Returns `(None, input)` when no complete region exists; an opening tag
/// with no closing tag is left in place.
#[must_use]
pub fn extract_bounded(text: &str, open: &Regex, close: &Regex) -> (Option<String>, String) {
    let Some(open_match) = open.find(text) else {
        return (None, text.to_string());
    };
    let after_open = &text[open_match.end()..];
    let Some(close_match) = close.find(after_open) else {
        return (None, text.to_string());
    };

    let interior = after_open[..close_match.start()].to_string();
    let mut remainder = String::with_capacity(text.len());
    remainder.push_str(&text[..open_match.start()]);
    remainder.push_str(&after_open[close_match.end()..]);
    (Some(interior), remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{CATEGORY, HTML_BLOCK, TABLE_CLOSE, TABLE_OPEN};

    #[test]
    fn find_and_strip_collects_group_and_removes_match() {
        let (found, rest) = find_and_strip(&CATEGORY, "a [[Category:Fan]] b [[Category:Pro]] c");
        assert_eq!(found, ["Fan", "Pro"]);
        assert_eq!(rest, "a  b  c");
    }

    #[test]
    fn find_and_strip_without_group_collects_whole_match() {
        let (found, rest) = find_and_strip(&HTML_BLOCK, "x[[html]]<b>y</b>[[/html]]z");
        assert_eq!(found, ["[[html]]<b>y</b>[[/html]]"]);
        assert_eq!(rest, "xz");
    }

    #[test]
    fn find_and_strip_leaves_unmatched_text_untouched() {
        let (found, rest) = find_and_strip(&CATEGORY, "no categories here");
        assert!(found.is_empty());
        assert_eq!(rest, "no categories here");
    }

    #[test]
    fn extract_bounded_returns_interior_and_remainder() {
        let (interior, rest) =
            extract_bounded("before <tab>A||B\n1||2</tab> after", &TABLE_OPEN, &TABLE_CLOSE);
        assert_eq!(interior.as_deref(), Some("A||B\n1||2"));
        assert_eq!(rest, "before  after");
    }

    #[test]
    fn extract_bounded_without_close_leaves_text_alone() {
        let (interior, rest) = extract_bounded("x <tab>A||B", &TABLE_OPEN, &TABLE_CLOSE);
        assert!(interior.is_none());
        assert_eq!(rest, "x <tab>A||B");
    }

    #[test]
    fn extract_bounded_takes_only_first_region() {
        let text = "<tab>one</tab> mid <tab>two</tab>";
        let (interior, rest) = extract_bounded(text, &TABLE_OPEN, &TABLE_CLOSE);
        assert_eq!(interior.as_deref(), Some("one"));
        assert_eq!(rest, " mid <tab>two</tab>");
    }
}
