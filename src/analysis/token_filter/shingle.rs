//! Shingle filter implementation.
//!
//! Shingles are word n-grams: runs of adjacent tokens joined into a single
//! token. Each unigram is emitted followed by the shingles that start at it.

use super::Filter;
use crate::analysis::token::{Token, TokenStream, TokenType, reposition};
use crate::error::{Result, TokenscopeError};

pub const DEFAULT_SHINGLE_SIZE: usize = 2;

const TOKEN_SEPARATOR: &str = " ";

/// A filter that adds shingles of `min_shingle_size..=max_shingle_size`
/// tokens to the stream.
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    min_shingle_size: usize,
    max_shingle_size: usize,
}

impl ShingleFilter {
    pub fn new(min_shingle_size: usize, max_shingle_size: usize) -> Result<Self> {
        if min_shingle_size < 2 {
            return Err(TokenscopeError::validation(format!(
                "minShingleSize ({min_shingle_size}) must be at least 2"
            )));
        }
        if max_shingle_size < min_shingle_size {
            return Err(TokenscopeError::validation(format!(
                "maxShingleSize ({max_shingle_size}) must be greater than or equal to minShingleSize ({min_shingle_size})"
            )));
        }
        Ok(Self {
            min_shingle_size,
            max_shingle_size,
        })
    }
}

impl Default for ShingleFilter {
    fn default() -> Self {
        Self {
            min_shingle_size: DEFAULT_SHINGLE_SIZE,
            max_shingle_size: DEFAULT_SHINGLE_SIZE,
        }
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let tokens: Vec<Token> = tokens.collect();
        let mut output = Vec::with_capacity(tokens.len() * 2);

        for (i, token) in tokens.iter().enumerate() {
            output.push(token.clone());

            let window = &tokens[i..];
            for size in self.min_shingle_size..=self.max_shingle_size.min(window.len()) {
                let parts = &window[..size];
                let text = parts
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(TOKEN_SEPARATOR);
                let last = &parts[size - 1];

                output.push(
                    Token::with_offsets(text, token.position, token.start_offset, last.end_offset)
                        .with_token_type(TokenType::Shingle)
                        .with_position_increment(0),
                );
            }
        }

        Ok(Box::new(reposition(output).into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
