//! N-gram tokenizer implementations.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{Result, TokenscopeError};

/// Reported when the lower gram bound is zero.
pub const MIN_GRAM_HELP: &str = "minGram value must be an integer greater than or equal to 1";

/// Reported when the upper gram bound is below the lower one.
pub const MAX_GRAM_HELP: &str =
    "maxGram value must be greater than or equal to the value of minGram";

/// Check that `1 <= min_gram <= max_gram`.
pub fn validate_gram_bounds(min_gram: usize, max_gram: usize) -> Result<()> {
    if min_gram == 0 {
        return Err(TokenscopeError::validation(MIN_GRAM_HELP));
    }
    if max_gram < min_gram {
        return Err(TokenscopeError::validation(MAX_GRAM_HELP));
    }
    Ok(())
}

/// Byte offset of every char boundary in `text`, including the end.
pub(crate) fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// A tokenizer that generates character n-grams.
///
/// Grams are emitted for every start character, shortest first. Whitespace
/// is not treated specially.
///
/// # Examples
///
/// ```
/// use tokenscope::analysis::tokenizer::ngram::NGramTokenizer;
/// use tokenscope::analysis::tokenizer::Tokenizer;
///
/// let tokenizer = NGramTokenizer::new(2, 3).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("abc").unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, vec!["ab", "abc", "bc"]);
/// ```
#[derive(Clone, Debug)]
pub struct NGramTokenizer {
    /// Minimum n-gram size
    min_gram: usize,
    /// Maximum n-gram size
    max_gram: usize,
}

impl NGramTokenizer {
    /// Default bounds, 1 and 2.
    pub const DEFAULT_MIN_GRAM: usize = 1;
    pub const DEFAULT_MAX_GRAM: usize = 2;

    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `min_gram` is 0 or `max_gram` is less
    /// than `min_gram`.
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        validate_gram_bounds(min_gram, max_gram)?;
        Ok(Self { min_gram, max_gram })
    }

}

impl Default for NGramTokenizer {
    fn default() -> Self {
        Self {
            min_gram: Self::DEFAULT_MIN_GRAM,
            max_gram: Self::DEFAULT_MAX_GRAM,
        }
    }
}

impl Tokenizer for NGramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let bounds = char_boundaries(text);
        let char_count = bounds.len() - 1;
        let mut tokens = Vec::new();

        for start in 0..char_count {
            for gram_size in self.min_gram..=self.max_gram.min(char_count - start) {
                let end = start + gram_size;
                let (start_offset, end_offset) = (bounds[start], bounds[end]);
                tokens.push(Token::with_offsets(
                    &text[start_offset..end_offset],
                    tokens.len(),
                    start_offset,
                    end_offset,
                ));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

/// A tokenizer that generates n-grams anchored at the start of the input.
///
/// # Examples
///
/// ```
/// use tokenscope::analysis::tokenizer::ngram::EdgeNGramTokenizer;
/// use tokenscope::analysis::tokenizer::Tokenizer;
///
/// let tokenizer = EdgeNGramTokenizer::new(2, 3).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("cat").unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, vec!["ca", "cat"]);
/// ```
#[derive(Clone, Debug)]
pub struct EdgeNGramTokenizer {
    min_gram: usize,
    max_gram: usize,
}

impl EdgeNGramTokenizer {
    /// Default bounds, 1 and 1.
    pub const DEFAULT_MIN_GRAM: usize = 1;
    pub const DEFAULT_MAX_GRAM: usize = 1;

    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        validate_gram_bounds(min_gram, max_gram)?;
        Ok(Self { min_gram, max_gram })
    }
}

impl Default for EdgeNGramTokenizer {
    fn default() -> Self {
        Self {
            min_gram: Self::DEFAULT_MIN_GRAM,
            max_gram: Self::DEFAULT_MAX_GRAM,
        }
    }
}

impl Tokenizer for EdgeNGramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let bounds = char_boundaries(text);
        let char_count = bounds.len() - 1;

        let tokens: Vec<Token> = (self.min_gram..=self.max_gram.min(char_count))
            .enumerate()
            .map(|(position, size)| {
                Token::with_offsets(&text[..bounds[size]], position, 0, bounds[size])
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "edge_ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokenizer: &dyn Tokenizer, input: &str) -> Vec<String> {
        tokenizer.tokenize(input).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_ngram_creation() {
        assert!(NGramTokenizer::new(2, 3).is_ok());

        let err = NGramTokenizer::new(0, 2).unwrap_err();
        assert_eq!(err.to_string(), format!("Validation error: {MIN_GRAM_HELP}"));

        let err = NGramTokenizer::new(3, 2).unwrap_err();
        assert_eq!(err.to_string(), format!("Validation error: {MAX_GRAM_HELP}"));
    }

    #[test]
    fn test_bigram() {
        let tokenizer = NGramTokenizer::new(2, 2).unwrap();
        assert_eq!(texts(&tokenizer, "hello"), vec!["he", "el", "ll", "lo"]);
    }

    #[test]
    fn test_default_bounds() {
        let tokenizer = NGramTokenizer::default();
        assert_eq!(texts(&tokenizer, "ab"), vec!["a", "ab", "b"]);
    }

    #[test]
    fn test_variable_ngram_keeps_whitespace() {
        let tokenizer = NGramTokenizer::new(2, 3).unwrap();
        assert_eq!(texts(&tokenizer, "a b"), vec!["a ", "a b", " b"]);
    }

    #[test]
    fn test_unicode_offsets() {
        let tokenizer = NGramTokenizer::new(2, 2).unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("日本語").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "日本");
        assert_eq!(tokens[1].text, "本語");

        // Each of these characters is 3 bytes in UTF-8
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 6);
        assert_eq!(tokens[1].start_offset, 3);
        assert_eq!(tokens[1].end_offset, 9);
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_short_text() {
        let tokenizer = NGramTokenizer::new(3, 5).unwrap();
        assert!(texts(&tokenizer, "ab").is_empty());
        assert!(texts(&tokenizer, "").is_empty());
    }

    #[test]
    fn test_huge_gram_bounds() {
        let tokenizer = NGramTokenizer::new(usize::MAX, usize::MAX).unwrap();
        assert!(texts(&tokenizer, "ab").is_empty());

        let tokenizer = NGramTokenizer::new(1, usize::MAX).unwrap();
        assert_eq!(texts(&tokenizer, "ab"), vec!["a", "ab", "b"]);

        let tokenizer = EdgeNGramTokenizer::new(usize::MAX, usize::MAX).unwrap();
        assert!(texts(&tokenizer, "ab").is_empty());
    }

    #[test]
    fn test_edge_ngram() {
        let tokenizer = EdgeNGramTokenizer::new(2, 3).unwrap();
        assert_eq!(texts(&tokenizer, "cat"), vec!["ca", "cat"]);
        assert_eq!(texts(&tokenizer, "category"), vec!["ca", "cat"]);
        assert_eq!(texts(&tokenizer, "c"), Vec::<String>::new());
    }

    #[test]
    fn test_edge_ngram_whole_input() {
        let tokenizer = EdgeNGramTokenizer::new(1, 4).unwrap();
        assert_eq!(texts(&tokenizer, "to be"), vec!["t", "to", "to ", "to b"]);
    }

    #[test]
    fn test_edge_ngram_default() {
        let tokenizer = EdgeNGramTokenizer::default();
        assert_eq!(texts(&tokenizer, "über"), vec!["ü"]);
    }

    #[test]
    fn test_tokenizer_names() {
        assert_eq!(NGramTokenizer::default().name(), "ngram");
        assert_eq!(EdgeNGramTokenizer::default().name(), "edge_ngram");
    }
}
