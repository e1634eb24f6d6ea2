//! The page assembler: ordered digestion passes over one page's inputs.
//!
//! Digesting a page loads its two input files concurrently, applies the
//! descriptor fields, then runs the markup passes strictly in order. The
//! order is a hard contract, not an accident: every pass both collects its
//! matches and removes them from the working text, and later passes rely on
//! that removal — link extraction, for example, would otherwise re-capture
//! the bracket spans already claimed by redirects and categories.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::descriptor;
use crate::diag::{DiagnosticSink, TracingSink};
use crate::encoding;
use crate::error::{Error, Result};
use crate::names;
use crate::patterns;
use crate::record::{PageRecord, Reference, Table};
use crate::textutil;

/// Digest one page, logging diagnostics through the default `tracing` sink.
///
/// `site_path` is the export directory; the page's inputs are
/// `<page_name>.xml` (descriptor) and `<page_name>.txt` (raw source).
/// Returns `None` when either input is missing or unreadable, the descriptor
/// is malformed, or the decoded source is empty. No error is ever raised.
#[must_use]
pub fn digest_page(site_path: &Path, page_name: &str) -> Option<PageRecord> {
    digest_page_with_sink(site_path, page_name, &TracingSink)
}

/// Digest one page with an explicit diagnostic sink.
#[must_use]
pub fn digest_page_with_sink(
    site_path: &Path,
    page_name: &str,
    sink: &dyn DiagnosticSink,
) -> Option<PageRecord> {
    match try_digest_page(site_path, page_name, sink) {
        Ok(record) => Some(record),
        Err(err) => {
            sink.log(&format!("page '{page_name}' skipped: {err}"), false);
            None
        }
    }
}

/// Digest many pages, in parallel at page granularity.
///
/// Each page is an independent unit of work; nothing is shared across pages
/// except the sink. The result vector is index-aligned with `page_names`,
/// with `None` for every page whose digestion was skipped.
#[must_use]
pub fn digest_pages(
    site_path: &Path,
    page_names: &[String],
    sink: &dyn DiagnosticSink,
) -> Vec<Option<PageRecord>> {
    page_names
        .par_iter()
        .map(|page_name| digest_page_with_sink(site_path, page_name, sink))
        .collect()
}

fn try_digest_page(
    site_path: &Path,
    page_name: &str,
    sink: &dyn DiagnosticSink,
) -> Result<PageRecord> {
    let descriptor_path = site_path.join(format!("{page_name}.xml"));
    let source_path = site_path.join(format!("{page_name}.txt"));

    if !source_path.is_file() {
        return Err(Error::MissingInput(source_path));
    }
    if !descriptor_path.is_file() {
        return Err(Error::MissingInput(descriptor_path));
    }

    // The two loads have no data dependency on each other; overlap them.
    let (fields, source) = rayon::join(
        || load_descriptor(&descriptor_path),
        || load_source(&source_path),
    );
    let fields = fields?;
    let source = source?;
    if source.is_empty() {
        return Err(Error::EmptySource);
    }

    let mut record = PageRecord::new(page_name);
    descriptor::apply_fields(&mut record, &fields, sink);
    digest_markup(&mut record, &source, sink);
    Ok(record)
}

fn load_descriptor(path: &Path) -> Result<Vec<(String, String)>> {
    let bytes = fs::read(path).map_err(|_| Error::MissingInput(path.to_path_buf()))?;
    descriptor::parse_descriptor(&encoding::decode_source(&bytes))
}

fn load_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|_| Error::MissingInput(path.to_path_buf()))?;
    Ok(encoding::decode_source(&bytes))
}

/// Run the ordered markup passes over `source`, populating `record`.
///
/// Order: display-title strip, redirect detection, category extraction,
/// then — for non-redirect pages only — locale extraction, inert-block
/// stripping, table extraction, link extraction. A redirect page returns
/// right after categories, because a page can redirect *to* a category and
/// its category tags still count; its tables and links do not.
pub fn digest_markup(record: &mut PageRecord, source: &str, sink: &dyn DiagnosticSink) {
    record.source = source.to_string();

    let (titles, text) = textutil::find_and_strip(&patterns::DISPLAY_TITLE, source);
    if let Some(title) = titles.first() {
        record.display_title = Some(title.trim().to_string());
    }

    let (redirects, text) = textutil::find_and_strip(&patterns::REDIRECT, &text);
    if let Some(target) = redirects.first() {
        record.redirect = Some(names::redirect_to_page_name(target));
    }

    let (categories, text) = textutil::find_and_strip(&patterns::CATEGORY, &text);
    // A '|' marks an explicit sort key; it and everything after are not part
    // of the category name.
    let category_tags: Vec<&str> = categories
        .iter()
        .map(|raw| raw.split('|').next().unwrap_or(raw).trim())
        .collect();
    for tag in &category_tags {
        // Cross-check against the tags the descriptor already provided. This
        // never reconciles the two sources; the mismatch is only reported.
        if !record.tags.contains(tag) {
            sink.log(
                &format!(
                    "page '{}': tag '{tag}' appears in [[Category:]] but not in the descriptor metadata",
                    record.name
                ),
                false,
            );
        }
    }
    for tag in category_tags {
        record.tags.add_one(tag);
        record.raw_tags.add_one(tag);
    }

    if record.is_redirect_page() {
        return;
    }

    // Capture-only: the first locale parameter annotates the page, and its
    // value cannot form link or table markup, so nothing is stripped.
    if let Some(value) = patterns::LOCALE_PARAM
        .captures(&text)
        .and_then(|caps| caps.get(1))
    {
        let value = value.as_str().trim();
        if !value.is_empty() {
            record.locale = Some(value.to_string());
        }
    }

    let (_, text) = textutil::find_and_strip(&patterns::HTML_BLOCK, &text);

    let text = extract_tables(record, text);
    extract_links(record, &text, sink);
}

/// Pull every `<tab> ... </tab>` region out of the text, in document order.
fn extract_tables(record: &mut PageRecord, mut text: String) -> String {
    loop {
        let (region, remainder) =
            textutil::extract_bounded(&text, &patterns::TABLE_OPEN, &patterns::TABLE_CLOSE);
        text = remainder;
        let Some(region) = region else { break };
        if let Some(table) = parse_table_region(&region) {
            record.tables.push(table);
        }
    }
    text
}

/// Parse one table region: first non-blank line is the header row, the rest
/// are data rows, all split on `||` with cells trimmed. Blank lines never
/// become rows. A region without both a header and at least one data row
/// yields nothing.
fn parse_table_region(region: &str) -> Option<Table> {
    let mut lines = region.lines().filter(|line| !line.trim().is_empty());
    let headers = split_table_row(lines.next()?);
    let rows: Vec<Vec<String>> = lines.map(split_table_row).collect();
    if rows.is_empty() {
        return None;
    }
    Some(Table { headers, rows })
}

fn split_table_row(line: &str) -> Vec<String> {
    line.split("||").map(|cell| cell.trim().to_string()).collect()
}

/// Collect every remaining `[[...]]` span as an outgoing reference,
/// deduplicated by full identity.
fn extract_links(record: &mut PageRecord, text: &str, sink: &dyn DiagnosticSink) {
    let mut seen: HashSet<Reference> = HashSet::new();
    for caps in patterns::WIKI_LINK.captures_iter(text) {
        let Some(inner) = caps.get(1) else { continue };
        let inner = inner.as_str();
        if inner.matches('|').count() > 1 {
            sink.log(
                &format!(
                    "page '{}': link '{inner}' has more than two components",
                    record.name
                ),
                true,
            );
        }
        let link = names::split_wiki_link(inner);
        seen.insert(Reference {
            wiki_name: names::url_name_to_page_name(&link.target),
            anchor: link.anchor,
            display_text: link.display_text,
            parent_page: record.name.clone(),
            external_url: None,
        });
    }
    record.references = seen.into_iter().collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CapturingSink;

    fn digest(source: &str) -> (PageRecord, CapturingSink) {
        let sink = CapturingSink::new();
        let mut record = PageRecord::new("test-page");
        record.name = "Test Page".to_string();
        digest_markup(&mut record, source, &sink);
        (record, sink)
    }

    #[test]
    fn display_title_directive_is_stripped_and_recorded() {
        let (record, _) = digest("{{DISPLAYTITLE: the Title}}\nBody text");
        assert_eq!(record.display_title.as_deref(), Some("the Title"));
        assert!(!record.source.is_empty());
    }

    #[test]
    fn plain_page_keeps_name_as_title() {
        let (record, _) = digest("Body text only");
        assert_eq!(record.display_title, None);
        assert_eq!(record.title(), "Test Page");
    }

    #[test]
    fn redirect_page_skips_tables_and_links() {
        let (record, _) = digest("#redirect [[Big_Name_Fan]]\n[[Other]]\n<tab>A||B\n1||2</tab>");
        assert_eq!(record.redirect.as_deref(), Some("Big Name Fan"));
        assert!(record.tables.is_empty());
        assert!(record.references.is_empty());
    }

    #[test]
    fn redirect_page_still_collects_categories() {
        let (record, _) = digest("#redirect [[Fanzine]]\n[[Category:Fanspeak]]");
        assert!(record.is_redirect_page());
        assert!(record.tags.contains("Fanspeak"));
    }

    #[test]
    fn category_sort_key_is_discarded() {
        let (record, _) = digest("[[Category:Fan|F]]");
        assert!(record.tags.contains("Fan"));
        assert!(!record.tags.contains("Fan|F"));
    }

    #[test]
    fn markup_only_category_logs_a_diagnostic() {
        let (record, sink) = digest("[[Category:Fanzine]]");
        assert!(record.tags.contains("Fanzine"));
        assert!(sink.contains("not in the descriptor metadata"));
    }

    #[test]
    fn category_known_from_descriptor_is_silent() {
        let sink = CapturingSink::new();
        let mut record = PageRecord::new("p");
        record.tags.add_one("Fanzine");
        record.raw_tags.add_one("Fanzine");
        digest_markup(&mut record, "[[Category:fanzine]]", &sink);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn locale_takes_first_match_only() {
        let (record, _) = digest("{{con|locale=South Gate, CA}}\n{{other|locale=Chicago}}");
        assert_eq!(record.locale.as_deref(), Some("South Gate, CA"));
    }

    #[test]
    fn locale_is_absent_without_parameter() {
        let (record, _) = digest("no locale here");
        assert_eq!(record.locale, None);
    }

    #[test]
    fn html_block_contents_are_invisible_to_later_passes() {
        let (record, _) = digest("[[html]]\n[[NotALink]]\n<tab>A||B\n1||2</tab>\n[[/html]]\nreal [[Link]]");
        assert!(record.tables.is_empty());
        assert_eq!(record.references.len(), 1);
        assert_eq!(record.references[0].wiki_name, "Link");
    }

    #[test]
    fn table_with_header_and_rows_is_parsed() {
        let (record, _) = digest("<tab head=top>\nA||B\n1||2\n</tab>");
        assert_eq!(record.tables.len(), 1);
        assert_eq!(record.tables[0].headers, ["A", "B"]);
        assert_eq!(record.tables[0].rows, [["1", "2"]]);
    }

    #[test]
    fn header_only_table_is_discarded() {
        let (record, _) = digest("<tab>\nA||B\n</tab>");
        assert!(record.tables.is_empty());
    }

    #[test]
    fn blank_lines_in_tables_are_skipped() {
        let (record, _) = digest("<tab>\n\nName||Year\n\nSolacon||1958\n\nLoncon||1957\n\n</tab>");
        assert_eq!(record.tables.len(), 1);
        assert_eq!(record.tables[0].rows.len(), 2);
    }

    #[test]
    fn multiple_tables_appear_in_document_order() {
        let (record, _) = digest("<tab>\nA\none\n</tab>\ntext\n<tab>\nB\ntwo\n</tab>");
        assert_eq!(record.tables.len(), 2);
        assert_eq!(record.tables[0].headers, ["A"]);
        assert_eq!(record.tables[1].headers, ["B"]);
    }

    #[test]
    fn duplicate_links_collapse_to_one_reference() {
        let (record, _) = digest("[[Target]] and again [[Target]]");
        assert_eq!(record.references.len(), 1);
    }

    #[test]
    fn piped_link_carries_display_text() {
        let (record, _) = digest("[[South_Gate|South Gate, CA]]");
        assert_eq!(record.references.len(), 1);
        let reference = &record.references[0];
        assert_eq!(reference.wiki_name, "South Gate");
        assert_eq!(reference.display_text, "South Gate, CA");
        assert_eq!(reference.parent_page, "Test Page");
    }

    #[test]
    fn anchored_link_carries_fragment() {
        let (record, _) = digest("[[Worldcon#1958]]");
        assert_eq!(record.references[0].wiki_name, "Worldcon");
        assert_eq!(record.references[0].anchor.as_deref(), Some("1958"));
    }

    #[test]
    fn over_separated_link_logs_an_error() {
        let (_, sink) = digest("[[A|B|C]]");
        assert!(sink
            .entries()
            .iter()
            .any(|entry| entry.is_error && entry.message.contains("more than two components")));
    }

    #[test]
    fn links_differing_in_display_text_stay_distinct() {
        let (record, _) = digest("[[Target|one]] [[Target|two]]");
        assert_eq!(record.references.len(), 2);
    }
}
