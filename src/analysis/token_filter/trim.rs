//! Trim filter implementation.

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that removes leading and trailing whitespace from tokens.
///
/// Tokens that become empty are kept.
#[derive(Clone, Debug, Default)]
pub struct TrimFilter;

impl TrimFilter {
    /// Create a new trim filter.
    pub fn new() -> Self {
        TrimFilter
    }
}

impl Filter for TrimFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let trimmed = token.text.trim().to_string();
                token.with_text(trimmed)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "trim"
    }
}
