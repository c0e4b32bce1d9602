//! Error types for the pagemark library.

use std::io;
use thiserror::Error;

/// Result type alias for pagemark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during annotation extraction.
///
/// Nothing here is fatal to a batch: callers are expected to log the
/// failing page and continue with the next one.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a layout dump or writing a record.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a layout dump.
    #[error("layout dump parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The page reports zero width or height.
    #[error("page {0} has no usable geometry ({1}x{2})")]
    MissingPageGeometry(usize, f32, f32),

    /// The layout tree is structurally unusable.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A user-supplied caption or marker pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
