//! # fanwiki-digest
//!
//! Digestion of a wiki export into structured page records.
//!
//! Each exported page is a pair of files sharing a base name: an XML
//! metadata descriptor and the page's raw wiki markup. Digesting a page
//! loads both (concurrently), then runs an ordered set of extraction passes
//! over the markup: display-title directive, redirect detection, category
//! tags, a locale annotation, inert HTML-passthrough blocks, data tables,
//! and outgoing links. The passes share one working text and each removes
//! the markup it claims, so the order is a hard contract — redirects,
//! categories, tables, and links all use overlapping bracket and tag syntax.
//!
//! ## Quick Start
//!
//! ```rust
//! use fanwiki_digest::{digest_markup, CapturingSink, PageRecord};
//!
//! let mut record = PageRecord::new("solacon");
//! record.name = "Solacon".to_string();
//!
//! let sink = CapturingSink::new();
//! let source = "[[Category:Conventions]]\nHeld in [[South Gate|South Gate, CA]].";
//! digest_markup(&mut record, source, &sink);
//!
//! assert!(record.tags.contains("conventions"));
//! assert_eq!(record.references.len(), 1);
//! ```
//!
//! File-based digestion goes through [`digest_page`] (or
//! [`digest_page_with_sink`] / [`digest_pages`]); a page whose inputs are
//! missing, malformed, or empty yields `None` and a diagnostic, never an
//! error.

mod digest;
mod error;

/// Descriptor ingestion: XML to flat field pairs to typed record fields.
pub mod descriptor;

/// Diagnostic sink capability and the default `tracing`-backed sink.
pub mod diag;

/// Tolerant byte decoding for raw page sources.
pub mod encoding;

/// Page-name canonicalization and link splitting.
pub mod names;

/// Compiled regex patterns for the digestion passes.
pub mod patterns;

/// The structured page record and its components.
pub mod record;

/// Tag collections with canonicalizing membership.
pub mod tags;

/// Text rewriting primitives shared by the passes.
pub mod textutil;

// Public API - re-exports
pub use diag::{CapturingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use digest::{digest_markup, digest_page, digest_page_with_sink, digest_pages};
pub use error::{Error, Result};
pub use record::{PageRecord, Reference, Table};
pub use tags::{normalize_certain_names, TagSet};
