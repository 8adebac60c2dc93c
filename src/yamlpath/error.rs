//! Error types for dot-path parsing and resolution.

use thiserror::Error;

/// Errors that can occur while parsing or resolving a dot-path.
///
/// Every variant that concerns a concrete path carries the path expression so
/// that callers can surface it as a configuration error pointing at the
/// offending expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum YamlPathError {
    #[error("key '{key}' not found while resolving '{path}'")]
    KeyNotFound { key: String, path: String },

    #[error("index {index} is out of range for a sequence of length {len} in '{path}'")]
    IndexOutOfRange { index: i64, len: usize, path: String },

    #[error("segment '{segment}' of '{path}' expects a {expected} but found a {found}")]
    TypeMismatch {
        segment: String,
        expected: &'static str,
        found: &'static str,
        path: String,
    },

    #[error("malformed path segment '{segment}' in '{path}': expected [N] or [N:M]")]
    MalformedPathSegment { segment: String, path: String },

    #[error("path expression is empty")]
    EmptyPath,

    #[error("'{path}' ends in a slice and does not address a single key or list item")]
    SliceNotAddressable { path: String },
}

impl YamlPathError {
    /// The path expression the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::KeyNotFound { path, .. }
            | Self::IndexOutOfRange { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::MalformedPathSegment { path, .. }
            | Self::SliceNotAddressable { path } => Some(path),
            Self::EmptyPath => None,
        }
    }
}
