//! Page-name canonicalization and link splitting.
//!
//! Wiki exports carry the same page identity in several spellings: the URL
//! name (spaces as underscores), the canonical page name, the wikidot-style
//! unit name of the older mirror, and the raw interior of a `[[...]]` span.
//! These helpers convert between them.

/// Convert a URL-style wiki name to a canonical page name.
///
/// The markup encodes spaces as underscores; nothing else is altered.
#[must_use]
pub fn url_name_to_page_name(name: &str) -> String {
    name.replace('_', " ").trim().to_string()
}

/// Canonicalize the raw bracket interior of a redirect directive into the
/// target page name.
///
/// A `|display` part and a `#anchor` suffix are dropped, underscores become
/// spaces, and the first letter is uppercased (page names are first-letter
/// case-insensitive).
#[must_use]
pub fn redirect_to_page_name(raw: &str) -> String {
    let target = raw.split('|').next().unwrap_or(raw);
    let target = target.split('#').next().unwrap_or(target);
    let target = target.replace('_', " ");
    uppercase_first(target.trim())
}

/// Wikidot-style canonical form of a name: lowercased, with alphanumeric
/// runs joined by single hyphens and everything else discarded.
#[must_use]
pub fn wikidot_unit_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}

/// The three parts of a wiki link's bracket interior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// Link target as written (before page-name canonicalization).
    pub target: String,
    /// In-page fragment target, when a `#anchor` suffix was present.
    pub anchor: Option<String>,
    /// Text displayed for the link; defaults to the target as written.
    pub display_text: String,
}

/// Split the interior of a `[[...]]` span into target, anchor, and display
/// text.
///
/// `target|display` separates an explicit display text; without one the
/// display text is the target as written (anchor included). A `#anchor`
/// suffix on the target becomes the anchor. Extra `|` components beyond the
/// first two are dropped; the caller decides whether that is worth a
/// diagnostic.
#[must_use]
pub fn split_wiki_link(inner: &str) -> WikiLink {
    let (target_part, display_part) = match inner.split_once('|') {
        Some((target, display)) => (target.trim(), Some(display)),
        None => (inner.trim(), None),
    };

    let display_text = display_part
        .map(|d| d.split('|').next().unwrap_or(d).trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| target_part.to_string());

    let (target, anchor) = match target_part.split_once('#') {
        Some((target, anchor)) => {
            let anchor = anchor.trim();
            (
                target.trim().to_string(),
                (!anchor.is_empty()).then(|| anchor.to_string()),
            )
        }
        None => (target_part.to_string(), None),
    };

    WikiLink {
        target,
        anchor,
        display_text,
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_name_rewrites_underscores_to_spaces() {
        assert_eq!(url_name_to_page_name("Now_Is_the_Time"), "Now Is the Time");
        assert_eq!(url_name_to_page_name("Solacon"), "Solacon");
    }

    #[test]
    fn redirect_target_drops_display_and_anchor() {
        assert_eq!(redirect_to_page_name("Fanzine"), "Fanzine");
        assert_eq!(redirect_to_page_name("fanzine#History"), "Fanzine");
        assert_eq!(redirect_to_page_name("Big_Name_Fan|BNF"), "Big Name Fan");
        assert_eq!(redirect_to_page_name("  fanzine  "), "Fanzine");
    }

    #[test]
    fn wikidot_name_joins_alphanumeric_runs() {
        assert_eq!(wikidot_unit_name("Now Is the Time"), "now-is-the-time");
        assert_eq!(wikidot_unit_name("A.  Merritt's (Fantasy)"), "a-merritt-s-fantasy");
        assert_eq!(wikidot_unit_name("--x--"), "x");
    }

    #[test]
    fn split_simple_link_defaults_display_to_target() {
        let link = split_wiki_link("Solacon");
        assert_eq!(link.target, "Solacon");
        assert_eq!(link.anchor, None);
        assert_eq!(link.display_text, "Solacon");
    }

    #[test]
    fn split_piped_link_separates_display_text() {
        let link = split_wiki_link("South Gate|South Gate, CA");
        assert_eq!(link.target, "South Gate");
        assert_eq!(link.display_text, "South Gate, CA");
    }

    #[test]
    fn split_anchored_link_extracts_fragment() {
        let link = split_wiki_link("Worldcon#1958");
        assert_eq!(link.target, "Worldcon");
        assert_eq!(link.anchor.as_deref(), Some("1958"));
        assert_eq!(link.display_text, "Worldcon#1958");
    }

    #[test]
    fn split_over_separated_link_keeps_first_two_parts() {
        let link = split_wiki_link("Target|Display|Extra");
        assert_eq!(link.target, "Target");
        assert_eq!(link.display_text, "Display");
    }
}
