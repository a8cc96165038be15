//! N-gram token filters.
//!
//! Both filters break every token into character grams. The first gram of a
//! token keeps the token's position increment and the rest stack on the same
//! position, with the original offsets.

use super::Filter;
use crate::analysis::token::{Token, TokenStream, reposition};
use crate::analysis::tokenizer::ngram::{char_boundaries, validate_gram_bounds};
use crate::error::Result;

/// Which grams of a token are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    /// Every start position.
    Anywhere,
    /// Only the start of the token.
    Edge,
}

fn expand(
    tokens: TokenStream,
    min_gram: usize,
    max_gram: usize,
    preserve_original: bool,
    anchor: Anchor,
) -> Vec<Token> {
    let mut output = Vec::new();

    for token in tokens {
        let bounds = char_boundaries(&token.text);
        let char_count = bounds.len() - 1;
        let last_start = match anchor {
            Anchor::Anywhere => char_count,
            Anchor::Edge => char_count.min(1),
        };

        let mut grams = Vec::new();
        for start in 0..last_start {
            for size in min_gram..=max_gram.min(char_count - start) {
                let end = start + size;
                grams.push(&token.text[bounds[start]..bounds[end]]);
            }
        }

        let out_of_bounds = char_count < min_gram || char_count > max_gram;
        let mut increment = token.position_increment;
        for gram in grams {
            output.push(token.with_text(gram).with_position_increment(increment));
            increment = 0;
        }
        if preserve_original && out_of_bounds {
            output.push(token.with_position_increment(increment));
        }
    }

    reposition(output)
}

/// A filter that emits all character n-grams of each token, grouped by
/// start position and shortest first.
///
/// # Examples
///
/// ```
/// use tokenscope::analysis::token_filter::Filter;
/// use tokenscope::analysis::token_filter::ngram::NGramFilter;
/// use tokenscope::analysis::token::Token;
///
/// let filter = NGramFilter::new(1, 2).unwrap();
/// let grams: Vec<_> = filter.filter(Box::new(vec![Token::new("abc", 0)].into_iter()))
///     .unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(grams, vec!["a", "ab", "b", "bc", "c"]);
/// ```
#[derive(Clone, Debug)]
pub struct NGramFilter {
    min_gram: usize,
    max_gram: usize,
    preserve_original: bool,
}

impl NGramFilter {
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        validate_gram_bounds(min_gram, max_gram)?;
        Ok(Self {
            min_gram,
            max_gram,
            preserve_original: false,
        })
    }

    /// Also emit tokens whose length falls outside the gram bounds.
    pub fn preserve_original(mut self, preserve: bool) -> Self {
        self.preserve_original = preserve;
        self
    }
}

impl Filter for NGramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let output = expand(
            tokens,
            self.min_gram,
            self.max_gram,
            self.preserve_original,
            Anchor::Anywhere,
        );
        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

/// A filter that emits the leading n-grams of each token.
#[derive(Clone, Debug)]
pub struct EdgeNGramFilter {
    min_gram: usize,
    max_gram: usize,
    preserve_original: bool,
}

impl EdgeNGramFilter {
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        validate_gram_bounds(min_gram, max_gram)?;
        Ok(Self {
            min_gram,
            max_gram,
            preserve_original: false,
        })
    }

    /// Also emit tokens whose length falls outside the gram bounds.
    pub fn preserve_original(mut self, preserve: bool) -> Self {
        self.preserve_original = preserve;
        self
    }
}

impl Filter for EdgeNGramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let output = expand(
            tokens,
            self.min_gram,
            self.max_gram,
            self.preserve_original,
            Anchor::Edge,
        );
        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "edge_ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(filter: &dyn Filter, words: &[&str]) -> Vec<Token> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        filter.filter(Box::new(tokens.into_iter())).unwrap().collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_ngram_filter() {
        let filter = NGramFilter::new(2, 3).unwrap();
        let result = run(&filter, &["abcd", "xy"]);

        assert_eq!(texts(&result), vec!["ab", "abc", "bc", "bcd", "cd", "xy"]);
        assert_eq!(result[0].position, 0);
        assert_eq!(result[4].position, 0);
        assert_eq!(result[5].position, 1);
    }

    #[test]
    fn test_ngram_drops_short_tokens() {
        let filter = NGramFilter::new(3, 3).unwrap();
        let result = run(&filter, &["ab", "abc"]);
        assert_eq!(texts(&result), vec!["abc"]);
    }

    #[test]
    fn test_preserve_original() {
        let filter = NGramFilter::new(2, 2).unwrap().preserve_original(true);
        let result = run(&filter, &["a", "abc", "ab"]);
        assert_eq!(texts(&result), vec!["a", "ab", "bc", "abc", "ab"]);
    }

    #[test]
    fn test_edge_ngram_filter() {
        let filter = EdgeNGramFilter::new(1, 3).unwrap();
        let result = run(&filter, &["quick", "go"]);
        assert_eq!(texts(&result), vec!["q", "qu", "qui", "g", "go"]);
        assert_eq!(result[3].position, 1);
    }

    #[test]
    fn test_edge_ngram_preserve_original() {
        let filter = EdgeNGramFilter::new(2, 3).unwrap().preserve_original(true);
        let result = run(&filter, &["quick", "a"]);
        assert_eq!(texts(&result), vec!["qu", "qui", "quick", "a"]);
    }

    #[test]
    fn test_huge_gram_bounds() {
        let filter = NGramFilter::new(usize::MAX, usize::MAX).unwrap();
        assert!(run(&filter, &["ab", "xyz"]).is_empty());

        let filter = NGramFilter::new(2, usize::MAX).unwrap();
        assert_eq!(texts(&run(&filter, &["abc"])), vec!["ab", "abc", "bc"]);

        let filter = EdgeNGramFilter::new(usize::MAX, usize::MAX).unwrap();
        assert!(run(&filter, &["ab"]).is_empty());
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(NGramFilter::new(0, 1).unwrap_err().is_validation());
        assert!(EdgeNGramFilter::new(4, 3).unwrap_err().is_validation());
    }
}
