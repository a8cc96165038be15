//! Token filter implementations for token transformation.
//!
//! This module provides filters that transform token streams produced by
//! tokenizers. Filters can modify, remove, or add tokens, and run in the
//! order they were declared.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`ascii_folding::AsciiFoldingFilter`] - Folds Latin diacritics to ASCII
//! - [`icu_folding::IcuFoldingFilter`] - Accent and case folding for all scripts
//! - [`icu_normalizer::IcuNormalizerFilter`] - Unicode normalization
//! - [`length::LengthFilter`] - Keeps tokens within a length range
//! - [`ngram::NGramFilter`] / [`ngram::EdgeNGramFilter`] - Character n-grams per token
//! - [`shingle::ShingleFilter`] - Word n-grams across tokens
//! - [`pattern_replace::PatternReplaceFilter`] - Regex replacement
//! - [`stem::StemFilter`] - Reduces words to their stem form
//! - [`trim::TrimFilter`] - Removes surrounding whitespace
//! - [`reverse::ReverseFilter`] - Reverses token text
//! - [`daitch_mokotoff::DaitchMokotoffSoundexFilter`] - Phonetic codes
//! - [`stop::StopFilter`] - Removes stop words
//! - [`cjk_bigram::CjkBigramFilter`] - Pairs adjacent CJK characters
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::token_filter::Filter;
//! use tokenscope::analysis::token_filter::lowercase::LowercaseFilter;
//! use tokenscope::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Stemmer
//! ```

use std::sync::Arc;

use crate::analysis::char_filter::icu_normalize::NormalizationForm;
use crate::analysis::token::TokenStream;
use crate::error::Result;

use self::ascii_folding::AsciiFoldingFilter;
use self::cjk_bigram::CjkBigramFilter;
use self::daitch_mokotoff::DaitchMokotoffSoundexFilter;
use self::icu_folding::IcuFoldingFilter;
use self::icu_normalizer::IcuNormalizerFilter;
use self::length::LengthFilter;
use self::lowercase::LowercaseFilter;
use self::ngram::{EdgeNGramFilter, NGramFilter};
use self::pattern_replace::{PatternReplaceFilter, ReplaceMode};
use self::reverse::ReverseFilter;
use self::shingle::ShingleFilter;
use self::stem::StemFilter;
use self::stem::snowball::SnowballStemmer;
use self::stop::StopFilter;
use self::trim::TrimFilter;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use tokenscope::analysis::token::{Token, TokenStream};
/// use tokenscope::analysis::token_filter::Filter;
/// use tokenscope::error::Result;
///
/// struct UppercaseFilter;
///
/// impl Filter for UppercaseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let upper: Vec<Token> = tokens
///             .map(|t| {
///                 let text = t.text.to_uppercase();
///                 t.with_text(text)
///             })
///             .collect();
///         Ok(Box::new(upper.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "uppercase"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod ascii_folding;
pub mod cjk_bigram;
pub mod daitch_mokotoff;
pub mod icu_folding;
pub mod icu_normalizer;
pub mod length;
pub mod lowercase;
pub mod ngram;
pub mod pattern_replace;
pub mod reverse;
pub mod shingle;
pub mod stem;
pub mod stop;
pub mod trim;

/// The `type` tags accepted for token filters in an index definition.
pub const TOKEN_FILTER_TYPES: &[&str] = &[
    "lowercase",
    "asciiFolding",
    "icuFolding",
    "icuNormalizer",
    "length",
    "nGram",
    "edgeGram",
    "shingle",
    "regex",
    "snowballStemming",
    "trim",
    "reverse",
    "daitchMokotoffSoundex",
    "stopword",
];

/// A token filter as declared in a pipeline, with its parameters already
/// validated and converted to the execution vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenFilterSpec {
    Lowercase,
    AsciiFolding,
    IcuFolding,
    IcuNormalizer {
        form: NormalizationForm,
    },
    Length {
        min: usize,
        max: usize,
    },
    NGram {
        min_gram: usize,
        max_gram: usize,
        preserve_original: bool,
    },
    EdgeGram {
        min_gram: usize,
        max_gram: usize,
        preserve_original: bool,
    },
    Shingle {
        min_shingle_size: usize,
        max_shingle_size: usize,
    },
    Regex {
        pattern: String,
        replacement: String,
        replace: ReplaceMode,
    },
    /// `language` is the capitalized stemmer name, e.g. `English`.
    SnowballStemming {
        language: String,
    },
    Trim,
    Reverse,
    DaitchMokotoffSoundex {
        inject: bool,
    },
    /// `words` is a comma-joined list; `None` selects the default English set.
    Stopword {
        words: Option<String>,
        format: Option<String>,
        ignore_case: bool,
    },
    /// Bigrams over runs of CJK tokens, used by the CJK language presets.
    CjkBigram,
}

impl TokenFilterSpec {
    /// The `type` of this filter in definition vocabulary.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenFilterSpec::Lowercase => "lowercase",
            TokenFilterSpec::AsciiFolding => "asciiFolding",
            TokenFilterSpec::IcuFolding => "icuFolding",
            TokenFilterSpec::IcuNormalizer { .. } => "icuNormalizer",
            TokenFilterSpec::Length { .. } => "length",
            TokenFilterSpec::NGram { .. } => "nGram",
            TokenFilterSpec::EdgeGram { .. } => "edgeGram",
            TokenFilterSpec::Shingle { .. } => "shingle",
            TokenFilterSpec::Regex { .. } => "regex",
            TokenFilterSpec::SnowballStemming { .. } => "snowballStemming",
            TokenFilterSpec::Trim => "trim",
            TokenFilterSpec::Reverse => "reverse",
            TokenFilterSpec::DaitchMokotoffSoundex { .. } => "daitchMokotoffSoundex",
            TokenFilterSpec::Stopword { .. } => "stopword",
            TokenFilterSpec::CjkBigram => "cjkBigram",
        }
    }

    /// Parameters in the execution vocabulary.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            TokenFilterSpec::IcuNormalizer { form } => vec![("name", form.as_str().to_string())],
            TokenFilterSpec::Length { min, max } => {
                vec![("min", min.to_string()), ("max", max.to_string())]
            }
            TokenFilterSpec::NGram {
                min_gram,
                max_gram,
                preserve_original,
            }
            | TokenFilterSpec::EdgeGram {
                min_gram,
                max_gram,
                preserve_original,
            } => vec![
                ("minGramSize", min_gram.to_string()),
                ("maxGramSize", max_gram.to_string()),
                ("preserveOriginal", preserve_original.to_string()),
            ],
            TokenFilterSpec::Shingle {
                min_shingle_size,
                max_shingle_size,
            } => vec![
                ("minShingleSize", min_shingle_size.to_string()),
                ("maxShingleSize", max_shingle_size.to_string()),
            ],
            TokenFilterSpec::Regex {
                pattern,
                replacement,
                replace,
            } => vec![
                ("pattern", pattern.clone()),
                ("replacement", replacement.clone()),
                ("replace", replace.as_str().to_string()),
            ],
            TokenFilterSpec::SnowballStemming { language } => {
                vec![("language", language.clone())]
            }
            TokenFilterSpec::DaitchMokotoffSoundex { inject } => {
                vec![("inject", inject.to_string())]
            }
            TokenFilterSpec::Stopword {
                words,
                format,
                ignore_case,
            } => {
                let mut params = Vec::new();
                if let Some(words) = words {
                    params.push(("words", words.clone()));
                }
                if let Some(format) = format {
                    params.push(("format", format.clone()));
                }
                params.push(("ignoreCase", ignore_case.to_string()));
                params
            }
            _ => Vec::new(),
        }
    }

    /// Construct the executable filter.
    pub fn build(&self) -> Result<Arc<dyn Filter>> {
        Ok(match self {
            TokenFilterSpec::Lowercase => Arc::new(LowercaseFilter::new()),
            TokenFilterSpec::AsciiFolding => Arc::new(AsciiFoldingFilter::new()),
            TokenFilterSpec::IcuFolding => Arc::new(IcuFoldingFilter::new()),
            TokenFilterSpec::IcuNormalizer { form } => Arc::new(IcuNormalizerFilter::new(*form)),
            TokenFilterSpec::Length { min, max } => Arc::new(LengthFilter::new(*min, *max)?),
            TokenFilterSpec::NGram {
                min_gram,
                max_gram,
                preserve_original,
            } => Arc::new(
                NGramFilter::new(*min_gram, *max_gram)?.preserve_original(*preserve_original),
            ),
            TokenFilterSpec::EdgeGram {
                min_gram,
                max_gram,
                preserve_original,
            } => Arc::new(
                EdgeNGramFilter::new(*min_gram, *max_gram)?.preserve_original(*preserve_original),
            ),
            TokenFilterSpec::Shingle {
                min_shingle_size,
                max_shingle_size,
            } => Arc::new(ShingleFilter::new(*min_shingle_size, *max_shingle_size)?),
            TokenFilterSpec::Regex {
                pattern,
                replacement,
                replace,
            } => Arc::new(PatternReplaceFilter::new(pattern, replacement, *replace)?),
            TokenFilterSpec::SnowballStemming { language } => Arc::new(StemFilter::with_stemmer(
                Box::new(SnowballStemmer::for_language(language)?),
            )),
            TokenFilterSpec::Trim => Arc::new(TrimFilter::new()),
            TokenFilterSpec::Reverse => Arc::new(ReverseFilter::new()),
            TokenFilterSpec::DaitchMokotoffSoundex { inject } => {
                Arc::new(DaitchMokotoffSoundexFilter::new().inject(*inject))
            }
            TokenFilterSpec::Stopword {
                words,
                format,
                ignore_case,
            } => Arc::new(StopFilter::from_params(
                words.as_deref(),
                format.as_deref(),
                *ignore_case,
            )?),
            TokenFilterSpec::CjkBigram => Arc::new(CjkBigramFilter::new()),
        })
    }
}
