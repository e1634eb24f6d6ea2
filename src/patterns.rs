//! Compiled regex patterns for the wiki-markup digestion passes.
//!
//! All patterns are compiled once at startup using `LazyLock`. The digestion
//! passes depend on one another having already removed matched text, so these
//! patterns are deliberately narrow: each one claims exactly the markup its
//! pass owns and nothing more.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Matches a `{{DISPLAYTITLE: ...}}` directive at the start of a line.
/// The captured group is the display title text.
pub static DISPLAY_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\{\{displaytitle:\s*(.+?)\}\}").expect("DISPLAY_TITLE regex")
});

/// Matches a redirect directive: a line beginning `#redirect [[Target]]`.
/// The captured group is the raw bracket interior.
pub static REDIRECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^#redirect\s*\[\[(.+?)\]\]").expect("REDIRECT regex"));

/// Matches a category tag `[[Category: Name]]` anywhere in the source.
/// The captured group is the category name, which may still carry a
/// `|sortkey` suffix.
pub static CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[\[category:\s*(.+?)\s*\]\]").expect("CATEGORY regex"));

/// Matches a template-style `|locale=Value` parameter. The value runs up to
/// the next `|` or `}` and is restricted to letters, whitespace, periods,
/// commas, and hyphens.
pub static LOCALE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\|\s*locale\s*=\s*([a-z\s.,\-]+)").expect("LOCALE_PARAM regex")
});

/// Matches an inert `[[html]] ... [[/html]]` passthrough block, spanning
/// newlines. No capture group: the whole block is discarded.
pub static HTML_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\[\[html\]\].*?\[\[/html\]\]").expect("HTML_BLOCK regex")
});

/// Matches the opening tag of a table region: `<tab>` or `<tab head="top">`
/// (attribute optional, quoting and case of the value not enforced).
pub static TABLE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<tab(\s+head=["']?top["']?)?>"#).expect("TABLE_OPEN regex")
});

/// Matches the closing tag of a table region.
pub static TABLE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</tab>").expect("TABLE_CLOSE regex"));

/// Matches any remaining double-bracket span `[[...]]`. Runs after the
/// redirect, category, and html-block passes have removed their own bracket
/// syntax, so whatever is left is an outgoing link.
pub static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]+?)\]\]").expect("WIKI_LINK regex"));

/// Matches one entry of the descriptor's embedded category list:
/// `Category('Category:Name')`, repeated.
pub static DESCRIPTOR_CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Category\('Category:(.+?)'\)").expect("DESCRIPTOR_CATEGORY regex"));
