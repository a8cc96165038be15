//! Length filter implementation.

use super::Filter;
use crate::analysis::token::{Token, TokenStream, reposition};
use crate::error::{Result, TokenscopeError};

/// Upper bound used when only a lower bound is declared.
pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Lower bound used when only an upper bound is declared.
pub const DEFAULT_MIN_LENGTH: usize = 0;

/// A filter that keeps tokens whose length in characters lies within
/// `[min, max]`, both inclusive.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min: usize,
    max: usize,
}

impl LengthFilter {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if max < min {
            return Err(TokenscopeError::validation(format!(
                "length filter max ({max}) must be greater than or equal to min ({min})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut pending_increment = 0;
        let kept: Vec<Token> = tokens
            .filter_map(|token| {
                let len = token.char_len();
                if (self.min..=self.max).contains(&len) {
                    let increment = token.position_increment + pending_increment;
                    pending_increment = 0;
                    Some(token.with_position_increment(increment))
                } else {
                    pending_increment += token.position_increment;
                    None
                }
            })
            .collect();

        Ok(Box::new(reposition(kept).into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_filter() {
        let filter = LengthFilter::new(2, 4).unwrap();
        let tokens = vec![
            Token::new("a", 0),
            Token::new("ab", 1),
            Token::new("abcd", 2),
            Token::new("abcde", 3),
            Token::new("日本", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "abcd", "日本"]);
        assert_eq!(result[0].position, 0);
        assert_eq!(result[1].position, 1);
        assert_eq!(result[2].position, 3);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(LengthFilter::new(5, 2).unwrap_err().is_validation());
    }
}
