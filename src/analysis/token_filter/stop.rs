//! Stop filter implementation.
//!
//! This module provides a filter that removes common words (stop words). The
//! word list is given inline, either as a comma-separated list or in the
//! Snowball list format, and falls back to a built-in English set.
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::token_filter::Filter;
//! use tokenscope::analysis::token_filter::stop::StopFilter;
//! use tokenscope::analysis::token::Token;
//!
//! let filter = StopFilter::new(); // Uses default English stop words
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("quick", 1),
//!     Token::new("brown", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "quick");
//! assert_eq!(result[1].text, "brown");
//! ```

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream, reposition};
use crate::analysis::token_filter::Filter;
use crate::error::{Result, TokenscopeError};

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// How an inline word list is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WordListFormat {
    /// Comma-separated words.
    #[default]
    Wordset,
    /// Whitespace-separated words, `|` starts a comment.
    Snowball,
}

impl FromStr for WordListFormat {
    type Err = TokenscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wordset" => Ok(WordListFormat::Wordset),
            "snowball" => Ok(WordListFormat::Snowball),
            _ => Err(TokenscopeError::validation(format!(
                "Unknown stopword list format '{s}' -- must be one of [wordset, snowball]"
            ))),
        }
    }
}

impl WordListFormat {
    /// Split an inline list into words.
    pub fn parse_words(&self, words: &str) -> Vec<String> {
        match self {
            WordListFormat::Wordset => words
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect(),
            WordListFormat::Snowball => words
                .lines()
                .flat_map(|line| {
                    let content = line.split('|').next().unwrap_or_default();
                    content.split_whitespace().map(str::to_string).collect::<Vec<_>>()
                })
                .collect(),
        }
    }
}

/// A filter that removes stop words from the token stream.
///
/// Matching is case-sensitive unless `ignore_case` is set. Removed tokens
/// carry their position increment over to the next surviving token.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove, as given
    stop_words: Arc<HashSet<String>>,
    /// Lowercased copy of the set, present while matching ignores case
    folded: Option<Arc<HashSet<String>>>,
}

impl StopFilter {
    /// Create a new stop filter with the default English stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
            folded: None,
        }
    }

    /// Create a new stop filter from a list of stop words.
    ///
    /// ```
    /// use tokenscope::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::from_words(vec!["foo", "bar", "baz"]);
    /// assert_eq!(filter.len(), 3);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Create a stop filter from inline parameters.
    ///
    /// `words` is read according to `format` (`wordset` when absent). With no
    /// `words` the default English set is used, and a `format` without
    /// `words` is rejected.
    pub fn from_params(words: Option<&str>, format: Option<&str>, ignore_case: bool) -> Result<Self> {
        let filter = match (words, format) {
            (None, Some(format)) => {
                return Err(TokenscopeError::validation(format!(
                    "Stopword list format '{format}' was given without a word list"
                )));
            }
            (None, None) => Self::new(),
            (Some(words), format) => {
                let format = format
                    .map(str::parse::<WordListFormat>)
                    .transpose()?
                    .unwrap_or_default();
                Self::from_words(format.parse_words(words))
            }
        };

        Ok(filter.ignore_case(ignore_case))
    }

    /// Set whether matching ignores case.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.folded = match (ignore_case, self.folded.take()) {
            (false, _) => None,
            (true, Some(folded)) => Some(folded),
            (true, None) => Some(Arc::new(
                self.stop_words.iter().map(|w| w.to_lowercase()).collect(),
            )),
        };
        self
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        match &self.folded {
            Some(folded) => folded.contains(&word.to_lowercase()),
            None => self.stop_words.contains(word),
        }
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut pending_increment = 0;
        let filtered_tokens: Vec<Token> = tokens
            .filter_map(|token| {
                if self.is_stop_word(&token.text) {
                    pending_increment += token.position_increment;
                    None
                } else {
                    let increment = token.position_increment + pending_increment;
                    pending_increment = 0;
                    Some(token.with_position_increment(increment))
                }
            })
            .collect();

        Ok(Box::new(reposition(filtered_tokens).into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(filter: &StopFilter, words: &[&str]) -> Vec<Token> {
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
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]);
        let result = run(&filter, &["hello", "the", "world", "and", "test"]);

        assert_eq!(texts(&result), vec!["hello", "world", "test"]);
        assert_eq!(result[1].position, 2);
        assert_eq!(result[2].position, 4);
    }

    #[test]
    fn test_ignore_case_can_be_cleared() {
        let filter = StopFilter::from_words(vec!["The"]).ignore_case(true);
        assert!(filter.is_stop_word("THE"));

        let filter = filter.ignore_case(false);
        assert!(filter.is_stop_word("The"));
        assert!(!filter.is_stop_word("the"));
        assert_eq!(texts(&run(&filter, &["The", "the"])), vec!["the"]);
    }

    #[test]
    fn test_default_english_set() {
        let filter = StopFilter::new();
        assert_eq!(filter.len(), 33);
        assert!(filter.is_stop_word("the"));
        assert!(!filter.is_stop_word("The"));
    }

    #[test]
    fn test_from_params_wordset() {
        let filter = StopFilter::from_params(Some("foo, bar,baz"), None, false).unwrap();
        assert_eq!(filter.len(), 3);
        assert!(filter.is_stop_word("bar"));
        assert!(!filter.is_stop_word("Bar"));
    }

    #[test]
    fn test_from_params_ignore_case() {
        let filter = StopFilter::from_params(Some("The,AND"), None, true).unwrap();
        let result = run(&filter, &["THE", "cat", "and", "dog"]);
        assert_eq!(texts(&result), vec!["cat", "dog"]);
    }

    #[test]
    fn test_from_params_snowball_format() {
        let words = "| a comment line\nfoo bar | trailing comment\n  baz\n";
        let filter = StopFilter::from_params(Some(words), Some("snowball"), false).unwrap();
        assert_eq!(filter.len(), 3);
        assert!(filter.is_stop_word("baz"));
        assert!(!filter.is_stop_word("comment"));
    }

    #[test]
    fn test_from_params_defaults_to_english() {
        let filter = StopFilter::from_params(None, None, false).unwrap();
        assert!(filter.is_stop_word("with"));
    }

    #[test]
    fn test_from_params_errors() {
        let err = StopFilter::from_params(Some("a"), Some("csv"), false).unwrap_err();
        assert!(err.is_validation());

        let err = StopFilter::from_params(None, Some("wordset"), false).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_format_ignores_case() {
        assert_eq!("WordSet".parse::<WordListFormat>().unwrap(), WordListFormat::Wordset);
        assert_eq!("SNOWBALL".parse::<WordListFormat>().unwrap(), WordListFormat::Snowball);

        let filter = StopFilter::from_params(Some("foo bar"), Some("Snowball"), false).unwrap();
        assert_eq!(filter.len(), 2);
    }
}
