//! Standard tokenizer implementation.
//!
//! This module provides a tokenizer that splits text using Unicode word boundary
//! rules (UAX #29). Segments without any letter or digit (punctuation and
//! whitespace) are dropped.
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::tokenizer::Tokenizer;
//! use tokenscope::analysis::tokenizer::standard::StandardTokenizer;
//!
//! let tokenizer = StandardTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world! 你好").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "你");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenType};
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Longest token, in characters, before it is split.
pub const MAX_TOKEN_LENGTH: usize = 255;

/// A tokenizer that splits text on Unicode word boundaries.
///
/// CJK ideographs become one token each, as UAX #29 places a boundary
/// between every pair of them.
#[derive(Clone, Debug)]
pub struct StandardTokenizer {
    max_token_length: usize,
}

impl StandardTokenizer {
    /// Create a new standard tokenizer.
    pub fn new() -> Self {
        Self {
            max_token_length: MAX_TOKEN_LENGTH,
        }
    }

    /// Split at most `max_token_length` characters into each token.
    pub fn with_max_token_length(max_token_length: usize) -> Self {
        Self {
            max_token_length: max_token_length.max(1),
        }
    }

    /// Word segments of `text` as `(start, end)` byte ranges, long words split.
    pub(crate) fn segments(&self, text: &str) -> Vec<(usize, usize)> {
        let mut segments = Vec::new();

        for (start, word) in text.split_word_bound_indices() {
            if !word.chars().any(char::is_alphanumeric) {
                continue;
            }

            let mut chunk_start = start;
            for (count, (i, _)) in word.char_indices().enumerate() {
                if count > 0 && count % self.max_token_length == 0 {
                    segments.push((chunk_start, start + i));
                    chunk_start = start + i;
                }
            }
            segments.push((chunk_start, start + word.len()));
        }

        segments
    }
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .segments(text)
            .into_iter()
            .enumerate()
            .map(|(position, (start, end))| {
                let word = &text[start..end];
                Token::with_offsets(word, position, start, end)
                    .with_token_type(TokenType::detect(word))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
