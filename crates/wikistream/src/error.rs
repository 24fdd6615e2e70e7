//! Error type for parse operations.

use wikistream_core::BuilderError;

/// Error type for parse operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unknown markup language: {0}")]
    UnknownLanguage(String),

    #[error("markup language already registered: {0}")]
    DuplicateLanguage(String),

    #[error("invalid inline pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Builder(#[from] BuilderError),
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_error_converts() {
        let err: ParseError = BuilderError::unsupported("image").into();
        assert!(matches!(err, ParseError::Builder(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::UnknownLanguage("creole".into());
        assert_eq!(err.to_string(), "unknown markup language: creole");
    }
}
