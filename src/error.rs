//! Error types for page digestion.
//!
//! Every variant is fatal to a single page's digestion only. The public
//! digestion entry points convert these into an absent result plus a
//! diagnostic; no error ever propagates to the caller.

use std::path::PathBuf;

/// Error type for digestion operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input file (descriptor or source) is absent or unreadable.
    #[error("input file missing or unreadable: {0}")]
    MissingInput(PathBuf),

    /// The descriptor file is not structurally valid XML.
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(String),

    /// The decoded page source is empty.
    #[error("page source is empty")]
    EmptySource,
}

/// Result type alias for digestion operations.
pub type Result<T> = std::result::Result<T, Error>;
