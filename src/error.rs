//! Error types for the tokenscope library.
//!
//! All failures are represented by the [`TokenscopeError`] enum. The variants
//! follow the stages of building an analyzer: a definition that cannot be
//! parsed, a name that cannot be resolved, and a parameter that is present
//! but unusable each get their own variant so that callers can report them
//! differently.
//!
//! # Examples
//!
//! ```
//! use tokenscope::error::{Result, TokenscopeError};
//!
//! fn check_min_gram(min_gram: usize) -> Result<()> {
//!     if min_gram == 0 {
//!         return Err(TokenscopeError::validation("minGram must be at least 1"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_min_gram(0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tokenscope operations.
#[derive(Error, Debug)]
pub enum TokenscopeError {
    /// I/O errors (reading definition or text files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A definition document is not well-formed or does not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// A named analyzer, language, tokenizer or filter could not be found
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// A parameter is present but semantically invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TokenscopeError.
pub type Result<T> = std::result::Result<T, TokenscopeError>;

impl TokenscopeError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        TokenscopeError::Parse(msg.into())
    }

    /// Create a new lookup error.
    pub fn lookup<S: Into<String>>(msg: S) -> Self {
        TokenscopeError::Lookup(msg.into())
    }

    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        TokenscopeError::Validation(msg.into())
    }

    /// Whether this error came from an unknown name.
    pub fn is_lookup(&self) -> bool {
        matches!(self, TokenscopeError::Lookup(_))
    }

    /// Whether this error came from an invalid parameter value.
    pub fn is_validation(&self) -> bool {
        matches!(self, TokenscopeError::Validation(_))
    }

    /// Whether this error came from a malformed or unreadable document.
    pub fn is_parse(&self) -> bool {
        matches!(self, TokenscopeError::Parse(_) | TokenscopeError::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TokenscopeError::parse("unexpected end of input");
        assert_eq!(error.to_string(), "Parse error: unexpected end of input");

        let error = TokenscopeError::lookup("no such analyzer");
        assert_eq!(error.to_string(), "Lookup error: no such analyzer");
        assert!(error.is_lookup());

        let error = TokenscopeError::validation("maxGram too small");
        assert_eq!(error.to_string(), "Validation error: maxGram too small");
        assert!(error.is_validation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TokenscopeError::from(io_error);

        match error {
            TokenscopeError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_is_parse() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = TokenscopeError::from(json_error);
        assert!(error.is_parse());
    }
}
