//! Crate-wide error taxonomy.
//!
//! Transport and decode failures propagate unmodified to the caller; the
//! library performs no retries and installs no top-level handler. The only
//! locally recovered failure is the missing-revisions lookup in
//! [`crate::api::MediaWikiApi::revisions`].

use thiserror::Error;

use crate::response::ShapeError;

/// Errors returned by session and facade operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection, DNS resolution or timeout failure.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not valid JSON where JSON was expected, or a
    /// revision entry did not match the expected record layout.
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// An expected key, singleton or array was absent from an otherwise
    /// well-formed JSON response.
    #[error("unexpected response shape: {0}")]
    Shape(#[from] ShapeError),

    /// A move-comment pattern template failed to compile.
    #[error("invalid move pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A move-comment pattern compiled but does not have exactly two
    /// capture groups (old title, new title).
    #[error("move pattern must capture exactly two titles, found {groups} groups")]
    PatternArity { groups: usize },
}
