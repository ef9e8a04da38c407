//! Error types for relsql.

use thiserror::Error;

/// The main error type for rendering operations.
///
/// Rendering is a total function over well-formed trees except where a
/// dialect has no syntax for a construct at all; those arms are the only
/// source of errors in this crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The node kind cannot be expressed in the target dialect.
    #[error("{dialect} has no syntax for {node}")]
    Unsupported {
        node: &'static str,
        dialect: &'static str,
    },
}

impl Error {
    /// Create an unsupported-node error.
    pub fn unsupported(node: &'static str, dialect: &'static str) -> Self {
        Self::Unsupported { node, dialect }
    }
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unsupported("Regexp", "standard SQL");
        assert_eq!(err.to_string(), "standard SQL has no syntax for Regexp");
    }
}
