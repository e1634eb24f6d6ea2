//! Descriptor ingestion.
//!
//! Each page's companion descriptor is a flat XML document: one root element
//! whose children are field elements with text values. Parsing happens in two
//! steps: the XML becomes a flat list of (name, value) pairs, and the pairs
//! are then applied to a [`PageRecord`] with per-field typing. Unknown fields
//! are ignored; missing fields leave record defaults in place.

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::diag::DiagnosticSink;
use crate::error::{Error, Result};
use crate::patterns::DESCRIPTOR_CATEGORY;
use crate::record::PageRecord;

/// Parse a descriptor document into a flat list of (field, value) pairs.
///
/// Field elements are the direct children of the root; nesting deeper than
/// that is not expected and is ignored. A document with no root element, or
/// one that is not well-formed, is a structural failure.
pub fn parse_descriptor(xml: &str) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);

    let mut fields = Vec::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut current_name: Option<String> = None;
    let mut current_value = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) => {
                depth += 1;
                if depth == 1 {
                    saw_root = true;
                } else if depth == 2 {
                    current_name = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                    current_value.clear();
                }
            }
            Ok(Event::Text(text)) => {
                if depth == 2 && current_name.is_some() {
                    let value = text
                        .unescape()
                        .map_err(|err| Error::MalformedDescriptor(err.to_string()))?;
                    current_value.push_str(&value);
                }
            }
            Ok(Event::CData(cdata)) => {
                if depth == 2 && current_name.is_some() {
                    current_value.push_str(&String::from_utf8_lossy(&cdata));
                }
            }
            Ok(Event::End(_)) => {
                if depth == 2 {
                    if let Some(name) = current_name.take() {
                        // Exports sometimes pretty-print; surrounding
                        // whitespace is never part of a field value.
                        fields.push((name, current_value.trim().to_string()));
                        current_value.clear();
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Empty(empty)) => {
                if depth == 1 {
                    let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                    fields.push((name, String::new()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(Error::MalformedDescriptor(err.to_string())),
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::MalformedDescriptor("no root element".to_string()));
    }
    Ok(fields)
}

/// Apply descriptor fields to a page record.
///
/// Field names match the export's metadata writer. Anomalous values
/// (non-integer ids, unparseable timestamps) log a diagnostic and leave the
/// record field unset; they never fail the page.
pub fn apply_fields(record: &mut PageRecord, fields: &[(String, String)], sink: &dyn DiagnosticSink) {
    for (name, value) in fields {
        match name.as_str() {
            "title" => record.name = value.clone(),
            "filename" => record.wiki_filename = Some(value.clone()),
            "urlname" => record.wiki_urlname = Some(value.clone()),
            "isredirectpage" => record.marked_as_redirect = parse_flag(value),
            "numrevisions" => record.num_revisions = parse_int_field(name, value, sink),
            "pageid" => record.page_id = parse_int_field(name, value, sink),
            "revid" => record.rev_id = parse_int_field(name, value, sink),
            "editTime" | "edittime" => record.edit_time = Some(value.clone()),
            "permalink" => record.permalink = Some(value.clone()),
            "categories" => ingest_categories(record, value),
            "timestamp" => record.timestamp = parse_timestamp(value, sink),
            "user" => record.user = Some(value.clone()),
            _ => {}
        }
    }
}

/// Pull every `Category('Category:Name')` entry out of the descriptor's
/// category list and seed both tag sets with it.
fn ingest_categories(record: &mut PageRecord, value: &str) {
    for caps in DESCRIPTOR_CATEGORY.captures_iter(value) {
        if let Some(name) = caps.get(1) {
            record.tags.add_one(name.as_str());
            record.raw_tags.add_one(name.as_str());
        }
    }
}

fn parse_int_field(field: &str, value: &str, sink: &dyn DiagnosticSink) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            sink.log(
                &format!("descriptor field '{field}' is not an integer: '{value}'"),
                true,
            );
            None
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Timestamps arrive either as RFC 3339 or as the export's compact
/// `YYYYMMDDHHMMSS` form.
fn parse_timestamp(value: &str, sink: &dyn DiagnosticSink) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y%m%d%H%M%S") {
        return Some(parsed.and_utc());
    }
    sink.log(
        &format!("descriptor timestamp not understood: '{value}'"),
        true,
    );
    None
}
