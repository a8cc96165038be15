//! Snowball stemmers backed by `rust-stemmers`.

use rust_stemmers::{Algorithm, Stemmer as AlgorithmStemmer};

use crate::analysis::token_filter::stem::Stemmer;
use crate::error::{Result, TokenscopeError};

/// Stemmer names accepted by [`SnowballStemmer::for_language`].
pub const SNOWBALL_LANGUAGES: &[&str] = &[
    "Arabic",
    "Danish",
    "Dutch",
    "English",
    "Finnish",
    "French",
    "German",
    "Greek",
    "Hungarian",
    "Italian",
    "Norwegian",
    "Portuguese",
    "Romanian",
    "Russian",
    "Spanish",
    "Swedish",
    "Tamil",
    "Turkish",
];

/// Stemmer used when none is named.
pub const DEFAULT_SNOWBALL_LANGUAGE: &str = "English";

fn algorithm(language: &str) -> Option<Algorithm> {
    Some(match language {
        "Arabic" => Algorithm::Arabic,
        "Danish" => Algorithm::Danish,
        "Dutch" => Algorithm::Dutch,
        "English" => Algorithm::English,
        "Finnish" => Algorithm::Finnish,
        "French" => Algorithm::French,
        "German" => Algorithm::German,
        "Greek" => Algorithm::Greek,
        "Hungarian" => Algorithm::Hungarian,
        "Italian" => Algorithm::Italian,
        "Norwegian" => Algorithm::Norwegian,
        "Portuguese" => Algorithm::Portuguese,
        "Romanian" => Algorithm::Romanian,
        "Russian" => Algorithm::Russian,
        "Spanish" => Algorithm::Spanish,
        "Swedish" => Algorithm::Swedish,
        "Tamil" => Algorithm::Tamil,
        "Turkish" => Algorithm::Turkish,
        _ => return None,
    })
}

/// A Snowball stemmer for one language.
pub struct SnowballStemmer {
    language: &'static str,
    stemmer: AlgorithmStemmer,
}

impl SnowballStemmer {
    /// Create the stemmer named `language` (capitalized, e.g. `English`).
    pub fn for_language(language: &str) -> Result<Self> {
        let (name, algorithm) = SNOWBALL_LANGUAGES
            .iter()
            .find(|name| **name == language)
            .and_then(|name| algorithm(name).map(|a| (*name, a)))
            .ok_or_else(|| {
                TokenscopeError::lookup(format!(
                    "Unknown snowball stemmer '{language}' -- must be one of [{}]",
                    SNOWBALL_LANGUAGES.join(", ")
                ))
            })?;

        Ok(Self {
            language: name,
            stemmer: AlgorithmStemmer::create(algorithm),
        })
    }

    pub fn language(&self) -> &'static str {
        self.language
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    fn name(&self) -> &'static str {
        "snowball"
    }
}
