//! The structured page record produced by digestion.
//!
//! A record is populated once by the assembler and treated as complete after
//! it is returned; nothing mutates it afterwards. Everything derives
//! `Serialize` so downstream cataloguing tools can consume records as JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tags::TagSet;

/// One outgoing link found on a page.
///
/// Identity is the full field tuple: a page's outgoing references are
/// deduplicated by comparing every field, so two links differing only in
/// display text remain distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    /// Canonical name of the wiki page linked to.
    pub wiki_name: String,
    /// In-page fragment target, when the link carried a `#anchor` suffix.
    pub anchor: Option<String>,
    /// Text displayed for the link; equals the target for simple links.
    pub display_text: String,
    /// Name of the page the link appears on.
    pub parent_page: String,
    /// URL of an externally-mirrored copy, when one is known.
    pub external_url: Option<String>,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.display_text, self.wiki_name)
    }
}

/// A data table extracted from a page.
///
/// Only tables with a header line and at least one data row are retained;
/// rows are not required to match the header's column count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Column headers, in document order.
    pub headers: Vec<String>,
    /// Data rows, in document order; one cell per column position.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The digested form of one wiki page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageRecord {
    /// The page's canonical name (the descriptor's title field).
    pub name: String,
    /// Display-title override from a `{{DISPLAYTITLE:...}}` directive.
    pub display_title: Option<String>,
    /// The page's URL-style file name in the wiki, e.g. `Now_Is_the_Time`.
    pub wiki_filename: Option<String>,
    /// The page's URL name from the descriptor.
    pub wiki_urlname: Option<String>,
    /// Revision count recorded in the descriptor.
    pub num_revisions: Option<i64>,
    /// Numeric page id.
    pub page_id: Option<i64>,
    /// Numeric revision id.
    pub rev_id: Option<i64>,
    /// Last edit time as the descriptor spells it.
    pub edit_time: Option<String>,
    /// Permanent link recorded in the descriptor.
    pub permalink: Option<String>,
    /// Descriptor timestamp, when it parses as a date-time.
    pub timestamp: Option<DateTime<Utc>>,
    /// User who made the recorded edit.
    pub user: Option<String>,
    /// Whether the descriptor itself marked the page as a redirect. The
    /// authoritative redirect target comes from the markup, not this flag.
    pub marked_as_redirect: Option<bool>,
    /// Base name of the locally-mirrored files this record was built from.
    pub local_filename: String,
    /// Target page name when this page is a redirect.
    pub redirect: Option<String>,
    /// Locale annotation extracted from a `|locale=` template parameter.
    pub locale: Option<String>,
    /// Tags with case normalized for deduplication.
    pub tags: TagSet,
    /// Tags exactly as they appear on the page and in the descriptor.
    pub raw_tags: TagSet,
    /// Data tables, in document order.
    pub tables: Vec<Table>,
    /// Outgoing references, deduplicated by full identity.
    pub references: Vec<Reference>,
    /// The full raw source text.
    pub source: String,
}

impl PageRecord {
    /// A fresh record for the page mirrored under `local_filename`, with an
    /// empty normalized tag set and an empty raw-case tag set.
    #[must_use]
    pub fn new(local_filename: &str) -> Self {
        Self {
            local_filename: local_filename.to_string(),
            raw_tags: TagSet::raw(),
            ..Self::default()
        }
    }

    /// The title shown for the page: the display-title override when
    /// present, otherwise the page name.
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_title.as_deref().unwrap_or(&self.name)
    }

    /// Whether this page's entire content is an alias for another page.
    #[must_use]
    pub fn is_redirect_page(&self) -> bool {
        self.redirect.as_deref().is_some_and(|target| !target.is_empty())
    }

    /// Where this page ultimately points: the redirect target for a redirect
    /// page, otherwise the page's own name.
    #[must_use]
    pub fn ultimate_redirect(&self) -> &str {
        if self.is_redirect_page() {
            self.redirect.as_deref().unwrap_or(&self.name)
        } else {
            &self.name
        }
    }

    /// Whether the tag set marks this page as a person. Publisher pages are
    /// organizations, unless the page is also explicitly marked Person.
    #[must_use]
    pub fn is_person(&self) -> bool {
        (self.tags.contains("Fan") || self.tags.contains("Pro"))
            && (self.tags.contains("Person") || !self.tags.contains("Publisher"))
    }
}
