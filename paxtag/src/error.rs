use thiserror::Error;

/// Errors raised when a caller hands the crate input it cannot work with.
///
/// Missing attributes, empty content and similar situations are not errors;
/// they are modelled as [`AttributeValue::Null`](crate::AttributeValue::Null) or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Content was built from a value that is neither a string nor null.
    #[error("content must be a string or null, got {found}")]
    InvalidContent {
        /// Description of the offending value's type.
        found: &'static str,
    },
    /// A sequence was required but a scalar was supplied.
    #[error("expected a string or a collection of strings, got {found}")]
    NotIterable {
        /// Description of the offending value's type.
        found: &'static str,
    },
    /// A regular expression could not be turned into an HTML `pattern` value.
    #[error("incorrect regular expression: {0}")]
    InvalidPattern(String),
    /// A custom tag name is empty or contains characters that can't appear in markup.
    #[error("invalid tag name {0:?}")]
    InvalidTagName(String),
}

/// Result type alias for fallible `paxtag` operations.
pub type Result<T> = std::result::Result<T, Error>;
