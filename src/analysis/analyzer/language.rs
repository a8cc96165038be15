//! Per-language analyzers.
//!
//! Every supported language code resolves to a [`Language`] entry, which
//! describes how its pipeline is assembled: the standard tokenizer, lower
//! casing, the language's stop words when a built-in list exists and its
//! Snowball stemmer when one exists. Persian additionally runs the persian
//! char filter, and the CJK family pairs characters into bigrams instead of
//! stemming.
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::analyzer::language::find_language;
//! use tokenscope::analysis::pipeline::analyze;
//!
//! let english = find_language("lucene.english").unwrap();
//! assert_eq!(english.code, "en");
//!
//! let terms: Vec<String> = analyze(&english.pipeline(), "The dogs chased cats")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(terms, vec!["dog", "chase", "cat"]);
//! ```

use std::sync::LazyLock;

use crate::analysis::char_filter::CharFilterSpec;
use crate::analysis::pipeline::Pipeline;
use crate::analysis::token_filter::TokenFilterSpec;
use crate::analysis::tokenizer::TokenizerSpec;
use crate::error::{Result, TokenscopeError};

/// Script-specific steps of a language pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Script {
    Default,
    /// Persian char filter before tokenization.
    Persian,
    /// CJK bigrams instead of stemming.
    Cjk,
}

/// A supported language analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Language {
    /// Short code, e.g. `en`.
    pub code: &'static str,
    /// Lower-case language name, used by the `lucene.<name>` alias.
    pub name: &'static str,
    /// Snowball stemmer, when one exists.
    pub stemmer: Option<&'static str>,
    /// Code of the built-in stop word list, as accepted by [`stop_words::get`].
    pub stop_list: Option<&'static str>,
    pub script: Script,
}

const fn language(
    code: &'static str,
    name: &'static str,
    stemmer: Option<&'static str>,
    stop_list: Option<&'static str>,
    script: Script,
) -> Language {
    Language {
        code,
        name,
        stemmer,
        stop_list,
        script,
    }
}

/// All supported languages, ordered by code.
pub const LANGUAGES: &[Language] = &[
    language("ar", "arabic", Some("Arabic"), Some("ar"), Script::Default),
    language("bg", "bulgarian", None, Some("bg"), Script::Default),
    language("bn", "bengali", None, Some("bn"), Script::Default),
    language("br", "brazilian", Some("Portuguese"), Some("pt"), Script::Default),
    language("ca", "catalan", None, Some("ca"), Script::Default),
    language("cjk", "cjk", None, Some("en"), Script::Cjk),
    language("ckb", "sorani", None, Some("ku"), Script::Default),
    language("cz", "czech", None, Some("cs"), Script::Default),
    language("da", "danish", Some("Danish"), Some("da"), Script::Default),
    language("de", "german", Some("German"), Some("de"), Script::Default),
    language("el", "greek", Some("Greek"), Some("el"), Script::Default),
    language("en", "english", Some("English"), Some("en"), Script::Default),
    language("es", "spanish", Some("Spanish"), Some("es"), Script::Default),
    language("eu", "basque", None, Some("eu"), Script::Default),
    language("fa", "persian", None, Some("fa"), Script::Persian),
    language("fi", "finnish", Some("Finnish"), Some("fi"), Script::Default),
    language("fr", "french", Some("French"), Some("fr"), Script::Default),
    language("ga", "irish", None, Some("ga"), Script::Default),
    language("gl", "galician", None, Some("gl"), Script::Default),
    language("hi", "hindi", None, Some("hi"), Script::Default),
    language("hu", "hungarian", Some("Hungarian"), Some("hu"), Script::Default),
    language("hy", "armenian", None, Some("hy"), Script::Default),
    language("id", "indonesian", None, Some("id"), Script::Default),
    language("it", "italian", Some("Italian"), Some("it"), Script::Default),
    language("ja", "japanese", None, Some("ja"), Script::Cjk),
    language("ko", "korean", None, Some("ko"), Script::Cjk),
    language("lt", "lithuanian", None, Some("lt"), Script::Default),
    language("lv", "latvian", None, Some("lv"), Script::Default),
    language("nl", "dutch", Some("Dutch"), Some("nl"), Script::Default),
    language("no", "norwegian", Some("Norwegian"), Some("no"), Script::Default),
    language("pt", "portuguese", Some("Portuguese"), Some("pt"), Script::Default),
    language("ro", "romanian", Some("Romanian"), Some("ro"), Script::Default),
    language("ru", "russian", Some("Russian"), Some("ru"), Script::Default),
    language("sv", "swedish", Some("Swedish"), Some("sv"), Script::Default),
    language("th", "thai", None, Some("th"), Script::Default),
    language("tr", "turkish", Some("Turkish"), Some("tr"), Script::Default),
    language("ua", "ukrainian", None, Some("uk"), Script::Default),
];

/// Help text listing the accepted language codes.
pub static LANGUAGE_HELP: LazyLock<String> = LazyLock::new(|| {
    let codes: Vec<_> = LANGUAGES.iter().map(|l| l.code).collect();
    format!("Language code must be one of [{}]", codes.join(", "))
});

/// Resolve a language code (`en`) or its long alias (`lucene.english`),
/// ignoring case.
pub fn find_language(code: &str) -> Result<&'static Language> {
    let lowered = code.trim().to_lowercase();
    let alias = lowered.strip_prefix("lucene.");

    LANGUAGES
        .iter()
        .find(|l| l.code == lowered || alias == Some(l.name))
        .ok_or_else(|| {
            TokenscopeError::lookup(format!(
                "Unknown language code '{code}' -- {}",
                *LANGUAGE_HELP
            ))
        })
}

impl Language {
    /// The long alias of this language, e.g. `lucene.english`.
    pub fn alias(&self) -> String {
        format!("lucene.{}", self.name)
    }

    /// Built-in stop words for this language.
    pub fn stop_words(&self) -> Option<Vec<String>> {
        Some(
            stop_words::get(self.stop_list?)
                .into_iter()
                .map(|s| s.to_string())
                // Entries containing the list separator cannot be expressed.
                .filter(|s| !s.is_empty() && !s.contains(','))
                .collect(),
        )
    }

    /// Assemble the pipeline of this language analyzer.
    pub fn pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new(TokenizerSpec::Standard);

        if self.script == Script::Persian {
            pipeline = pipeline.with_char_filter(CharFilterSpec::Persian);
        }

        pipeline = pipeline.with_token_filter(TokenFilterSpec::Lowercase);

        if let Some(words) = self.stop_words() {
            pipeline = pipeline.with_token_filter(TokenFilterSpec::Stopword {
                words: Some(words.join(",")),
                format: None,
                ignore_case: false,
            });
        }

        if self.script == Script::Cjk {
            pipeline = pipeline.with_token_filter(TokenFilterSpec::CjkBigram);
        } else if let Some(stemmer) = self.stemmer {
            pipeline = pipeline.with_token_filter(TokenFilterSpec::SnowballStemming {
                language: stemmer.to_string(),
            });
        }

        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::analyze;

    fn terms(code: &str, text: &str) -> Vec<String> {
        let language = find_language(code).unwrap();
        analyze(&language.pipeline(), text)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_codes_and_aliases() {
        assert_eq!(find_language("de").unwrap().name, "german");
        assert_eq!(find_language("lucene.german").unwrap().code, "de");
        assert_eq!(find_language("EN").unwrap().code, "en");
        assert_eq!(find_language("lucene.sorani").unwrap().code, "ckb");
        assert_eq!(LANGUAGES.len(), 37);
    }

    #[test]
    fn test_unknown_code() {
        let err = find_language("xx").unwrap_err();
        assert!(err.is_lookup());
        assert!(err.to_string().contains("[ar, bg, bn, br, ca, cjk, ckb, cz"));
        assert!(err.to_string().contains("tr, ua]"));
    }

    #[test]
    fn test_english_pipeline() {
        assert_eq!(terms("en", "The Rabbits chased cats"), vec!["rabbit", "chase", "cat"]);
    }

    #[test]
    fn test_german_stop_words() {
        let german = find_language("de").unwrap();
        let words = german.stop_words().unwrap();
        assert!(words.iter().any(|w| w == "und"));
        assert!(!terms("de", "Hund und Katze").contains(&"und".to_string()));
    }

    #[test]
    fn test_stop_words_without_stemmer() {
        let bulgarian = find_language("bg").unwrap();
        assert!(bulgarian.stemmer.is_none());
        assert!(bulgarian.stop_words().unwrap().iter().any(|w| w == "и"));
        assert_eq!(terms("bg", "котки и кучета"), vec!["котки", "кучета"]);

        assert!(terms("cz", "a").is_empty());
        assert!(terms("hi", "और").is_empty());
        assert_eq!(terms("th", "Hello World"), vec!["hello", "world"]);
    }

    #[test]
    fn test_every_language_has_stop_words() {
        for language in LANGUAGES {
            let words = language.stop_words().unwrap_or_default();
            assert!(!words.is_empty(), "{}", language.code);
            assert!(words.iter().all(|w| !w.contains(',')), "{}", language.code);
        }
    }

    #[test]
    fn test_cjk_bigrams() {
        assert_eq!(terms("ja", "東京都"), vec!["東京", "京都"]);
        assert_eq!(terms("cjk", "日本 Tokyo"), vec!["日本", "tokyo"]);
    }

    #[test]
    fn test_persian_char_filter() {
        let pipeline = find_language("fa").unwrap().pipeline();
        assert_eq!(pipeline.char_filters, vec![CharFilterSpec::Persian]);
        assert_eq!(
            terms("fa", "می\u{200C}خواهم"),
            vec!["می", "خواهم"]
        );
    }

    #[test]
    fn test_every_language_builds() {
        for language in LANGUAGES {
            assert!(language.pipeline().build().is_ok(), "{}", language.code);
            assert!(find_language(&language.alias()).is_ok());
        }
    }
}
