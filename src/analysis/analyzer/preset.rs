//! Built-in analyzers and the request that selects one.
//!
//! Presets are plain [`Pipeline`] values: `standard`, `simple`,
//! `whitespace`, `keyword`, one per language (see [`language`](super::language))
//! and the autocomplete pipeline built from a gram tokenizer. An
//! [`AnalysisRequest`] chooses between them or points at a custom analyzer
//! in an index definition file.
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::analyzer::preset::{AnalysisRequest, GramTokenizerKind, Operator};
//!
//! let request = AnalysisRequest {
//!     operator: Operator::Autocomplete,
//!     tokenizer: GramTokenizerKind::EdgeGram,
//!     ..AnalysisRequest::default()
//! };
//!
//! let report = request.run("cat").unwrap();
//! assert_eq!(report.render_terms(), "[ca] [cat]");
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::language::find_language;
use crate::analysis::definition::document::IndexDefinition;
use crate::analysis::definition::translator::TranslationWarning;
use crate::analysis::pipeline::{Pipeline, analyze};
use crate::analysis::token::{Token, render_terms};
use crate::analysis::token_filter::TokenFilterSpec;
use crate::analysis::tokenizer::TokenizerSpec;
use crate::analysis::tokenizer::ngram::{MAX_GRAM_HELP, MIN_GRAM_HELP, validate_gram_bounds};
use crate::error::{Result, TokenscopeError};

pub const ANALYZER_HELP: &str =
    "Analyzer must be one of [Standard, Simple, Whitespace, Language, Keyword, Custom]";

pub const OPERATOR_HELP: &str = "Operator must be one of [autocomplete, text]";

pub const TOKENIZER_HELP: &str = "Tokenizer must be one of [edgeGram, nGram]";

/// Preset names that need no further input.
pub const PRESET_NAMES: &[&str] = &["standard", "simple", "whitespace", "keyword"];

/// Default autocomplete gram bounds.
pub const DEFAULT_MIN_GRAM: i64 = 2;
pub const DEFAULT_MAX_GRAM: i64 = 3;

/// The kind of analyzer a request selects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AnalyzerKind {
    #[default]
    Standard,
    Simple,
    Whitespace,
    Language,
    Keyword,
    Custom,
}

impl AnalyzerKind {
    /// Every kind, in the order they are listed to users.
    pub const ALL: [AnalyzerKind; 6] = [
        AnalyzerKind::Standard,
        AnalyzerKind::Simple,
        AnalyzerKind::Whitespace,
        AnalyzerKind::Language,
        AnalyzerKind::Keyword,
        AnalyzerKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::Standard => "standard",
            AnalyzerKind::Simple => "simple",
            AnalyzerKind::Whitespace => "whitespace",
            AnalyzerKind::Language => "language",
            AnalyzerKind::Keyword => "keyword",
            AnalyzerKind::Custom => "custom",
        }
    }
}

impl FromStr for AnalyzerKind {
    type Err = TokenscopeError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "standard" => Ok(AnalyzerKind::Standard),
            "simple" => Ok(AnalyzerKind::Simple),
            "whitespace" => Ok(AnalyzerKind::Whitespace),
            "language" => Ok(AnalyzerKind::Language),
            "keyword" => Ok(AnalyzerKind::Keyword),
            "custom" => Ok(AnalyzerKind::Custom),
            _ => Err(TokenscopeError::lookup(format!(
                "Unknown analyzer '{name}' -- {ANALYZER_HELP}"
            ))),
        }
    }
}

impl TryFrom<String> for AnalyzerKind {
    type Error = TokenscopeError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The query operator the analysis is run for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Operator {
    #[default]
    Text,
    Autocomplete,
}

impl FromStr for Operator {
    type Err = TokenscopeError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" => Ok(Operator::Text),
            "autocomplete" => Ok(Operator::Autocomplete),
            _ => Err(TokenscopeError::lookup(format!(
                "Unknown operator '{name}' -- {OPERATOR_HELP}"
            ))),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = TokenscopeError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

/// The tokenizer of the autocomplete pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum GramTokenizerKind {
    #[serde(rename = "edgeGram")]
    EdgeGram,
    #[default]
    #[serde(rename = "nGram")]
    NGram,
}

impl GramTokenizerKind {
    /// The tokenizer spec for the given bounds.
    pub fn spec(&self, min_gram: usize, max_gram: usize) -> TokenizerSpec {
        match self {
            GramTokenizerKind::EdgeGram => TokenizerSpec::EdgeGram { min_gram, max_gram },
            GramTokenizerKind::NGram => TokenizerSpec::NGram { min_gram, max_gram },
        }
    }
}

impl FromStr for GramTokenizerKind {
    type Err = TokenscopeError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "edgegram" | "edgengram" => Ok(GramTokenizerKind::EdgeGram),
            "ngram" => Ok(GramTokenizerKind::NGram),
            _ => Err(TokenscopeError::lookup(format!(
                "Unknown tokenizer '{name}' -- {TOKENIZER_HELP}"
            ))),
        }
    }
}

impl TryFrom<String> for GramTokenizerKind {
    type Error = TokenscopeError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

/// Pipeline of a named preset: one of [`PRESET_NAMES`] (optionally with a
/// `lucene.` prefix) or a language code or alias.
pub fn preset_pipeline(name: &str) -> Result<Pipeline> {
    let lowered = name.trim().to_lowercase();
    let preset = lowered.strip_prefix("lucene.").unwrap_or(&lowered);

    match preset {
        "standard" => {
            Ok(Pipeline::new(TokenizerSpec::Standard).with_token_filter(TokenFilterSpec::Lowercase))
        }
        "simple" => {
            Ok(Pipeline::new(TokenizerSpec::Simple).with_token_filter(TokenFilterSpec::Lowercase))
        }
        "whitespace" => Ok(Pipeline::new(TokenizerSpec::Whitespace)),
        "keyword" => Ok(Pipeline::new(TokenizerSpec::Keyword)),
        _ => language_pipeline(name),
    }
}

/// Pipeline of a language analyzer.
pub fn language_pipeline(code: &str) -> Result<Pipeline> {
    Ok(find_language(code)?.pipeline())
}

/// Tokenizer-only pipeline for the autocomplete operator.
///
/// # Errors
///
/// Returns a validation error carrying [`MIN_GRAM_HELP`] or
/// [`MAX_GRAM_HELP`] when the bounds are out of range.
pub fn autocomplete_pipeline(
    tokenizer: GramTokenizerKind,
    min_gram: i64,
    max_gram: i64,
) -> Result<Pipeline> {
    let (min_gram, max_gram) = gram_bounds(min_gram, max_gram)?;
    Ok(Pipeline::new(tokenizer.spec(min_gram, max_gram)))
}

fn gram_bounds(min_gram: i64, max_gram: i64) -> Result<(usize, usize)> {
    let min_gram = usize::try_from(min_gram)
        .map_err(|_| TokenscopeError::validation(MIN_GRAM_HELP))?;
    let max_gram = usize::try_from(max_gram)
        .map_err(|_| TokenscopeError::validation(MAX_GRAM_HELP))?;
    validate_gram_bounds(min_gram, max_gram)?;
    Ok((min_gram, max_gram))
}

/// What to analyze text with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequest {
    pub analyzer: AnalyzerKind,
    /// Language code, for [`AnalyzerKind::Language`].
    pub language: Option<String>,
    pub operator: Operator,
    /// Autocomplete tokenizer.
    pub tokenizer: GramTokenizerKind,
    pub min_gram: i64,
    pub max_gram: i64,
    /// Index definition file, for [`AnalyzerKind::Custom`].
    pub definition: Option<PathBuf>,
    /// Custom analyzer name, for [`AnalyzerKind::Custom`].
    pub name: Option<String>,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        AnalysisRequest {
            analyzer: AnalyzerKind::default(),
            language: None,
            operator: Operator::default(),
            tokenizer: GramTokenizerKind::default(),
            min_gram: DEFAULT_MIN_GRAM,
            max_gram: DEFAULT_MAX_GRAM,
            definition: None,
            name: None,
        }
    }
}

/// A request resolved to a pipeline.
#[derive(Clone, Debug)]
pub struct ResolvedAnalyzer {
    /// Display name, e.g. `lucene.standard` or the custom analyzer name.
    pub label: String,
    pub pipeline: Pipeline,
    pub autocomplete: Option<AutocompleteSummary>,
    pub warnings: Vec<TranslationWarning>,
}

/// Gram settings of an autocomplete run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteSummary {
    pub tokenizer: String,
    pub min_gram: usize,
    pub max_gram: usize,
}

impl AnalysisRequest {
    /// Resolve the request to a pipeline.
    ///
    /// The autocomplete operator takes precedence over the analyzer kind.
    pub fn resolve(&self) -> Result<ResolvedAnalyzer> {
        if self.operator == Operator::Autocomplete {
            let (min_gram, max_gram) = gram_bounds(self.min_gram, self.max_gram)?;
            let pipeline = Pipeline::new(self.tokenizer.spec(min_gram, max_gram));
            let autocomplete = AutocompleteSummary {
                tokenizer: pipeline.tokenizer.execution_name().to_string(),
                min_gram,
                max_gram,
            };
            return Ok(ResolvedAnalyzer {
                label: "autocomplete".to_string(),
                pipeline,
                autocomplete: Some(autocomplete),
                warnings: Vec::new(),
            });
        }

        let (label, pipeline, warnings) = match self.analyzer {
            AnalyzerKind::Language => {
                let code = self.language.as_deref().unwrap_or_default();
                let language = find_language(code)?;
                (language.alias(), language.pipeline(), Vec::new())
            }
            AnalyzerKind::Custom => {
                let path = self.definition.as_ref().ok_or_else(|| {
                    TokenscopeError::validation("Index definition file is required (-d)")
                })?;
                let name = self.name.as_deref().ok_or_else(|| {
                    TokenscopeError::validation("Custom analyzer name is required (-n)")
                })?;
                let translation = IndexDefinition::from_path(path)?.translate(name)?;
                (translation.name, translation.pipeline, translation.warnings)
            }
            kind => (format!("lucene.{kind}"), preset_pipeline(kind.as_str())?, Vec::new()),
        };

        debug!("Resolved {label} to {pipeline}");
        Ok(ResolvedAnalyzer {
            label,
            pipeline,
            autocomplete: None,
            warnings,
        })
    }

    /// The pipeline this request selects.
    pub fn build_pipeline(&self) -> Result<Pipeline> {
        Ok(self.resolve()?.pipeline)
    }

    /// Resolve the request and analyze `text` with it.
    pub fn run(&self, text: &str) -> Result<AnalysisReport> {
        let resolved = self.resolve()?;
        let terms: Vec<Token> = analyze(&resolved.pipeline, text)?.collect();
        info!("{} produced {} terms", resolved.label, terms.len());

        Ok(AnalysisReport {
            analyzer: resolved.label,
            pipeline: resolved.pipeline.to_string(),
            autocomplete: resolved.autocomplete,
            warnings: resolved.warnings.iter().map(ToString::to_string).collect(),
            terms,
        })
    }
}

/// The outcome of one analysis run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analyzer: String,
    /// The executed stages, see [`Pipeline`]'s `Display`.
    pub pipeline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<AutocompleteSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub terms: Vec<Token>,
}

impl AnalysisReport {
    /// Terms as `[a] [b]`, or `[]` when there are none.
    pub fn render_terms(&self) -> String {
        render_terms(&self.terms)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Using {}", self.analyzer)?;
        if let Some(autocomplete) = &self.autocomplete {
            writeln!(
                f,
                "Autocomplete - {}, minGram({}), maxGram({})",
                autocomplete.tokenizer, autocomplete.min_gram, autocomplete.max_gram
            )?;
        }
        write!(f, "{}", self.render_terms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(pipeline: &Pipeline, text: &str) -> Vec<String> {
        analyze(pipeline, text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_presets() {
        let standard = preset_pipeline("standard").unwrap();
        assert_eq!(terms(&standard, "Hello, World!"), vec!["hello", "world"]);

        let simple = preset_pipeline("Simple").unwrap();
        assert_eq!(terms(&simple, "It's 4 you"), vec!["it", "s", "you"]);

        let whitespace = preset_pipeline("lucene.whitespace").unwrap();
        assert_eq!(terms(&whitespace, "Hello, World!"), vec!["Hello,", "World!"]);

        let keyword = preset_pipeline("keyword").unwrap();
        assert_eq!(terms(&keyword, "Hello, World!"), vec!["Hello, World!"]);
    }

    #[test]
    fn test_language_preset_by_name() {
        let pipeline = preset_pipeline("lucene.french").unwrap();
        assert_eq!(pipeline, language_pipeline("fr").unwrap());
        assert!(preset_pipeline("klingon").unwrap_err().is_lookup());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Standard".parse::<AnalyzerKind>().unwrap(), AnalyzerKind::Standard);
        assert_eq!("CUSTOM".parse::<AnalyzerKind>().unwrap(), AnalyzerKind::Custom);
        let err = "fancy".parse::<AnalyzerKind>().unwrap_err();
        assert!(err.to_string().contains(ANALYZER_HELP));

        assert_eq!("AutoComplete".parse::<Operator>().unwrap(), Operator::Autocomplete);
        assert!("search".parse::<Operator>().unwrap_err().to_string().contains(OPERATOR_HELP));

        assert_eq!(
            "edgegram".parse::<GramTokenizerKind>().unwrap(),
            GramTokenizerKind::EdgeGram
        );
        assert!("shingle".parse::<GramTokenizerKind>().is_err());
    }

    #[test]
    fn test_autocomplete_bounds() {
        let err = autocomplete_pipeline(GramTokenizerKind::NGram, 0, 3).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains(MIN_GRAM_HELP));

        let err = autocomplete_pipeline(GramTokenizerKind::NGram, -2, 3).unwrap_err();
        assert!(err.to_string().contains(MIN_GRAM_HELP));

        let err = autocomplete_pipeline(GramTokenizerKind::EdgeGram, 5, 2).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains(MAX_GRAM_HELP));
    }

    #[test]
    fn test_autocomplete_ngram_default() {
        let request = AnalysisRequest {
            operator: Operator::Autocomplete,
            ..AnalysisRequest::default()
        };
        let report = request.run("cat").unwrap();
        assert_eq!(report.render_terms(), "[ca] [cat] [at]");
        assert_eq!(
            report.to_string(),
            "Using autocomplete\nAutocomplete - nGram, minGram(2), maxGram(3)\n[ca] [cat] [at]"
        );
    }

    #[test]
    fn test_report_for_empty_input() {
        let report = AnalysisRequest::default().run("").unwrap();
        assert_eq!(report.to_string(), "Using lucene.standard\n[]");
    }

    #[test]
    fn test_language_requires_code() {
        let request = AnalysisRequest {
            analyzer: AnalyzerKind::Language,
            ..AnalysisRequest::default()
        };
        assert!(request.build_pipeline().unwrap_err().is_lookup());
    }

    #[test]
    fn test_custom_requires_definition() {
        let request = AnalysisRequest {
            analyzer: AnalyzerKind::Custom,
            name: Some("a1".to_string()),
            ..AnalysisRequest::default()
        };
        assert!(request.build_pipeline().unwrap_err().is_validation());
    }

    #[test]
    fn test_request_from_json() {
        let request: AnalysisRequest = serde_json::from_str(
            r#"{"analyzer": "Language", "language": "en", "minGram": 1}"#,
        )
        .unwrap();
        assert_eq!(request.analyzer, AnalyzerKind::Language);
        assert_eq!(request.min_gram, 1);
        assert_eq!(request.max_gram, DEFAULT_MAX_GRAM);
        assert_eq!(request.tokenizer, GramTokenizerKind::NGram);

        assert!(serde_json::from_str::<AnalysisRequest>(r#"{"operator": "fuzzy"}"#).is_err());
    }
}
