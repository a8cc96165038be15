//! Tokenizer implementations for text analysis.
//!
//! This module provides various tokenization strategies for breaking text into tokens.
//! Tokenizers sit between the char filters and the token filters in the analysis
//! pipeline, and every pipeline has exactly one.
//!
//! # Available Tokenizers
//!
//! - [`standard::StandardTokenizer`] - Unicode word boundaries (UAX #29)
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`letter::LetterTokenizer`] - Maximal runs of letters
//! - [`keyword::KeywordTokenizer`] - Treats entire text as single token
//! - [`uax_url_email::UaxUrlEmailTokenizer`] - Standard rules, but keeps URLs and e-mails whole
//! - [`ngram::NGramTokenizer`] / [`ngram::EdgeNGramTokenizer`] - Character n-grams
//! - [`pattern::PatternTokenizer`] - Regex split or capture-group extraction
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::tokenizer::Tokenizer;
//! use tokenscope::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::error::Result;

use self::keyword::KeywordTokenizer;
use self::letter::LetterTokenizer;
use self::ngram::{EdgeNGramTokenizer, NGramTokenizer};
use self::pattern::PatternTokenizer;
use self::standard::StandardTokenizer;
use self::uax_url_email::UaxUrlEmailTokenizer;
use self::whitespace::WhitespaceTokenizer;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so that a built pipeline can be handed
/// across threads.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use tokenscope::analysis::token::{Token, TokenStream};
/// use tokenscope::analysis::tokenizer::Tokenizer;
/// use tokenscope::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split(',')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod keyword;
pub mod letter;
pub mod ngram;
pub mod pattern;
pub mod standard;
pub mod uax_url_email;
pub mod whitespace;

/// The `type` tags accepted for tokenizers in an index definition.
pub const TOKENIZER_TYPES: &[&str] = &[
    "standard",
    "whitespace",
    "simple",
    "keyword",
    "uaxUrlEmail",
    "edgeGram",
    "nGram",
    "regexCaptureGroup",
    "regexSplit",
];

/// The tokenizer of a pipeline, with parameters already validated and
/// converted to the execution vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenizerSpec {
    Standard,
    Whitespace,
    Simple,
    Keyword,
    UaxUrlEmail,
    EdgeGram { min_gram: usize, max_gram: usize },
    NGram { min_gram: usize, max_gram: usize },
    RegexCaptureGroup { pattern: String, group: usize },
    /// `None` splits on [`pattern::DEFAULT_SPLIT_PATTERN`].
    RegexSplit { pattern: Option<String> },
}

impl TokenizerSpec {
    /// The definition vocabulary `type` of this tokenizer.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenizerSpec::Standard => "standard",
            TokenizerSpec::Whitespace => "whitespace",
            TokenizerSpec::Simple => "simple",
            TokenizerSpec::Keyword => "keyword",
            TokenizerSpec::UaxUrlEmail => "uaxUrlEmail",
            TokenizerSpec::EdgeGram { .. } => "edgeGram",
            TokenizerSpec::NGram { .. } => "nGram",
            TokenizerSpec::RegexCaptureGroup { .. } => "regexCaptureGroup",
            TokenizerSpec::RegexSplit { .. } => "regexSplit",
        }
    }

    /// The execution name this tokenizer runs under.
    pub fn execution_name(&self) -> &'static str {
        match self {
            TokenizerSpec::Standard => "standard",
            TokenizerSpec::Whitespace => "whitespace",
            TokenizerSpec::Simple => "letter",
            TokenizerSpec::Keyword => "keyword",
            TokenizerSpec::UaxUrlEmail => "uax29UrlEmail",
            TokenizerSpec::EdgeGram { .. } => "edgeNGram",
            TokenizerSpec::NGram { .. } => "nGram",
            TokenizerSpec::RegexCaptureGroup { .. } | TokenizerSpec::RegexSplit { .. } => {
                "pattern"
            }
        }
    }

    /// Parameters in the execution vocabulary.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            TokenizerSpec::EdgeGram { min_gram, max_gram }
            | TokenizerSpec::NGram { min_gram, max_gram } => vec![
                ("minGramSize", min_gram.to_string()),
                ("maxGramSize", max_gram.to_string()),
            ],
            TokenizerSpec::RegexCaptureGroup { pattern, group } => vec![
                ("pattern", pattern.clone()),
                ("group", group.to_string()),
            ],
            TokenizerSpec::RegexSplit {
                pattern: Some(pattern),
            } => vec![("pattern", pattern.clone())],
            _ => Vec::new(),
        }
    }

    /// Construct the executable tokenizer.
    pub fn build(&self) -> Result<Arc<dyn Tokenizer>> {
        Ok(match self {
            TokenizerSpec::Standard => Arc::new(StandardTokenizer::new()),
            TokenizerSpec::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerSpec::Simple => Arc::new(LetterTokenizer::new()),
            TokenizerSpec::Keyword => Arc::new(KeywordTokenizer::new()),
            TokenizerSpec::UaxUrlEmail => Arc::new(UaxUrlEmailTokenizer::new()),
            TokenizerSpec::EdgeGram { min_gram, max_gram } => {
                Arc::new(EdgeNGramTokenizer::new(*min_gram, *max_gram)?)
            }
            TokenizerSpec::NGram { min_gram, max_gram } => {
                Arc::new(NGramTokenizer::new(*min_gram, *max_gram)?)
            }
            TokenizerSpec::RegexCaptureGroup { pattern, group } => {
                Arc::new(PatternTokenizer::capture_group(pattern, *group)?)
            }
            TokenizerSpec::RegexSplit { pattern } => Arc::new(PatternTokenizer::split(
                pattern.as_deref().unwrap_or(pattern::DEFAULT_SPLIT_PATTERN),
            )?),
        })
    }
}
