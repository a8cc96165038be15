//! Translation of custom analyzer definitions into pipelines.
//!
//! Each stage kind has a registry mapping its definition `type` to a
//! function that reads the entry's fields, applies the renames and defaults
//! of the execution vocabulary and returns the typed spec. Adding a kind
//! means registering one more entry.
//!
//! Unknown tokenizer and char filter types abort the translation. Unknown
//! token filter types are skipped with a [`TranslationWarning`], so that
//! definitions written for newer filter sets still load.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use log::{debug, warn};

use crate::analysis::char_filter::icu_normalize::NormalizationForm;
use crate::analysis::char_filter::{CHAR_FILTER_TYPES, CharFilterSpec};
use crate::analysis::definition::document::{CustomAnalyzerDefinition, StageDefinition};
use crate::analysis::definition::params::Params;
use crate::analysis::pipeline::Pipeline;
use crate::analysis::token_filter::length::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use crate::analysis::token_filter::pattern_replace::ReplaceMode;
use crate::analysis::token_filter::shingle::DEFAULT_SHINGLE_SIZE;
use crate::analysis::token_filter::stem::snowball::DEFAULT_SNOWBALL_LANGUAGE;
use crate::analysis::token_filter::{TOKEN_FILTER_TYPES, TokenFilterSpec};
use crate::analysis::tokenizer::ngram::{EdgeNGramTokenizer, NGramTokenizer};
use crate::analysis::tokenizer::{TOKENIZER_TYPES, TokenizerSpec};
use crate::error::{Result, TokenscopeError};

type TokenizerBuilder = fn(&Params) -> Result<TokenizerSpec>;
type CharFilterBuilder = fn(&Params) -> Result<CharFilterSpec>;
type TokenFilterBuilder = fn(&Params) -> Result<TokenFilterSpec>;

static TOKENIZERS: LazyLock<HashMap<&'static str, TokenizerBuilder>> = LazyLock::new(|| {
    let mut registry: HashMap<&'static str, TokenizerBuilder> = HashMap::new();
    registry.insert("standard", |_| Ok(TokenizerSpec::Standard));
    registry.insert("whitespace", |_| Ok(TokenizerSpec::Whitespace));
    registry.insert("simple", |_| Ok(TokenizerSpec::Simple));
    registry.insert("keyword", |_| Ok(TokenizerSpec::Keyword));
    registry.insert("uaxUrlEmail", |_| Ok(TokenizerSpec::UaxUrlEmail));
    registry.insert("edgeGram", |params| {
        Ok(TokenizerSpec::EdgeGram {
            min_gram: params
                .count("minGram")?
                .unwrap_or(EdgeNGramTokenizer::DEFAULT_MIN_GRAM),
            max_gram: params
                .count("maxGram")?
                .unwrap_or(EdgeNGramTokenizer::DEFAULT_MAX_GRAM),
        })
    });
    registry.insert("nGram", |params| {
        Ok(TokenizerSpec::NGram {
            min_gram: params
                .count("minGram")?
                .unwrap_or(NGramTokenizer::DEFAULT_MIN_GRAM),
            max_gram: params
                .count("maxGram")?
                .unwrap_or(NGramTokenizer::DEFAULT_MAX_GRAM),
        })
    });
    registry.insert("regexCaptureGroup", |params| {
        Ok(TokenizerSpec::RegexCaptureGroup {
            pattern: params.required_string("pattern")?.to_string(),
            group: params.required_count("group")?,
        })
    });
    registry.insert("regexSplit", |params| {
        Ok(TokenizerSpec::RegexSplit {
            pattern: params.string("pattern")?.map(str::to_string),
        })
    });
    registry
});

static CHAR_FILTERS: LazyLock<HashMap<&'static str, CharFilterBuilder>> = LazyLock::new(|| {
    let mut registry: HashMap<&'static str, CharFilterBuilder> = HashMap::new();
    registry.insert("htmlStrip", |params| {
        Ok(CharFilterSpec::HtmlStrip {
            escaped_tags: params.string_list("ignoredTags")?.unwrap_or_default(),
        })
    });
    registry.insert("mapping", |params| {
        let mappings = params
            .string_map("mappings")?
            .ok_or_else(|| TokenscopeError::validation("mapping requires 'mappings'"))?;
        Ok(CharFilterSpec::Mapping { mappings })
    });
    registry.insert("icuNormalize", |_| Ok(CharFilterSpec::IcuNormalize));
    registry.insert("persian", |_| Ok(CharFilterSpec::Persian));
    registry
});

/// `"include"` selects true, any other value false.
fn includes(params: &Params, key: &str) -> Result<Option<bool>> {
    Ok(params.string(key)?.map(|value| value == "include"))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

static TOKEN_FILTERS: LazyLock<HashMap<&'static str, TokenFilterBuilder>> = LazyLock::new(|| {
    let mut registry: HashMap<&'static str, TokenFilterBuilder> = HashMap::new();
    registry.insert("lowercase", |_| Ok(TokenFilterSpec::Lowercase));
    registry.insert("asciiFolding", |_| Ok(TokenFilterSpec::AsciiFolding));
    registry.insert("icuFolding", |_| Ok(TokenFilterSpec::IcuFolding));
    registry.insert("icuNormalizer", |params| {
        let form = match params.string("normalizationForm")? {
            Some(name) => name.parse::<NormalizationForm>()?,
            None => NormalizationForm::default(),
        };
        Ok(TokenFilterSpec::IcuNormalizer { form })
    });
    registry.insert("length", |params| {
        let (min, max) = match (params.count("min")?, params.count("max")?) {
            (None, None) => {
                return Err(TokenscopeError::validation(
                    "length requires 'min' or 'max'",
                ));
            }
            (min, max) => (
                min.unwrap_or(DEFAULT_MIN_LENGTH),
                max.unwrap_or(DEFAULT_MAX_LENGTH),
            ),
        };
        Ok(TokenFilterSpec::Length { min, max })
    });
    registry.insert("nGram", |params| {
        Ok(TokenFilterSpec::NGram {
            min_gram: params.required_count("minGram")?,
            max_gram: params.required_count("maxGram")?,
            preserve_original: includes(params, "termNotInBounds")?.unwrap_or(false),
        })
    });
    registry.insert("edgeGram", |params| {
        Ok(TokenFilterSpec::EdgeGram {
            min_gram: params.required_count("minGram")?,
            max_gram: params.required_count("maxGram")?,
            preserve_original: includes(params, "termNotInBounds")?.unwrap_or(false),
        })
    });
    registry.insert("shingle", |params| {
        Ok(TokenFilterSpec::Shingle {
            min_shingle_size: params
                .count("minShingleSize")?
                .unwrap_or(DEFAULT_SHINGLE_SIZE),
            max_shingle_size: params
                .count("maxShingleSize")?
                .unwrap_or(DEFAULT_SHINGLE_SIZE),
        })
    });
    registry.insert("regex", |params| {
        let replace = match params.string("matches")? {
            Some(mode) => mode.parse::<ReplaceMode>()?,
            None => ReplaceMode::default(),
        };
        Ok(TokenFilterSpec::Regex {
            pattern: params.required_string("pattern")?.to_string(),
            replacement: params.string("replacement")?.unwrap_or_default().to_string(),
            replace,
        })
    });
    registry.insert("snowballStemming", |params| {
        Ok(TokenFilterSpec::SnowballStemming {
            language: params
                .string("stemmerName")?
                .map_or_else(|| DEFAULT_SNOWBALL_LANGUAGE.to_string(), capitalize),
        })
    });
    registry.insert("trim", |_| Ok(TokenFilterSpec::Trim));
    registry.insert("reverse", |_| Ok(TokenFilterSpec::Reverse));
    registry.insert("daitchMokotoffSoundex", |params| {
        Ok(TokenFilterSpec::DaitchMokotoffSoundex {
            inject: includes(params, "originalTokens")?.unwrap_or(true),
        })
    });
    registry.insert("stopword", |params| {
        Ok(TokenFilterSpec::Stopword {
            words: params.string_list("tokens")?.map(|tokens| tokens.join(",")),
            format: params.string("format")?.map(str::to_string),
            ignore_case: params.boolean("ignoreCase")?.unwrap_or(false),
        })
    });
    registry
});

/// A token filter entry that was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationWarning {
    /// Position of the entry in `tokenFilters`.
    pub index: usize,
    /// The unrecognized `type`, if the entry had one.
    pub kind: Option<String>,
}

impl fmt::Display for TranslationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "Unknown filter type '{kind}'")?,
            None => write!(f, "Token filter #{} has no type", self.index)?,
        }
        write!(
            f,
            " -- Filter type must be one of [{}]",
            TOKEN_FILTER_TYPES.join(", ")
        )
    }
}

/// The result of translating one custom analyzer.
#[derive(Clone, Debug)]
pub struct Translation {
    pub name: String,
    pub pipeline: Pipeline,
    pub warnings: Vec<TranslationWarning>,
}

fn stage_type(stage: &StageDefinition) -> Option<&str> {
    stage.get("type").and_then(|t| t.as_str())
}

fn unknown_type(stage: &str, kind: Option<&str>, valid: &[&str]) -> TokenscopeError {
    let found = match kind {
        Some(kind) => format!("Unknown {stage} type '{kind}'"),
        None => format!("Missing {stage} type"),
    };
    TokenscopeError::lookup(format!(
        "{found} -- {} type must be one of [{}]",
        capitalize(stage),
        valid.join(", ")
    ))
}

fn translate_tokenizer(stage: Option<&StageDefinition>) -> Result<TokenizerSpec> {
    let kind = stage.and_then(stage_type);
    let builder = kind
        .and_then(|kind| TOKENIZERS.get(kind))
        .ok_or_else(|| unknown_type("tokenizer", kind, TOKENIZER_TYPES))?;

    let empty = StageDefinition::new();
    let spec = builder(&Params::new(kind.unwrap_or_default(), stage.unwrap_or(&empty)))?;
    spec.build()?;
    debug!("Tokenizer {} -> {}", spec.kind(), spec.execution_name());
    Ok(spec)
}

fn translate_char_filter(stage: &StageDefinition) -> Result<CharFilterSpec> {
    let kind = stage_type(stage);
    let builder = kind
        .and_then(|kind| CHAR_FILTERS.get(kind))
        .ok_or_else(|| unknown_type("char filter", kind, CHAR_FILTER_TYPES))?;

    let spec = builder(&Params::new(kind.unwrap_or_default(), stage))?;
    spec.build()?;
    debug!("Char filter {} {:?}", spec.kind(), spec.params());
    Ok(spec)
}

/// Translate a token filter entry; `None` when its type is unknown.
fn translate_token_filter(
    index: usize,
    stage: &StageDefinition,
) -> Result<Option<TokenFilterSpec>> {
    let kind = stage_type(stage);
    let Some(builder) = kind.and_then(|kind| TOKEN_FILTERS.get(kind)) else {
        return Ok(None);
    };

    let spec = builder(&Params::new(kind.unwrap_or_default(), stage))?;
    spec.build()?;
    debug!("Token filter #{index} {} {:?}", spec.kind(), spec.params());
    Ok(Some(spec))
}

/// Translate a custom analyzer into a pipeline.
///
/// Stages are translated tokenizer first, then token filters, then char
/// filters, and every stage is built once so that invalid parameters are
/// reported here rather than when text is analyzed.
///
/// # Examples
///
/// ```
/// use tokenscope::analysis::definition::document::IndexDefinition;
///
/// let definition: IndexDefinition = r#"{"analyzers": [{
///     "name": "grams",
///     "tokenizer": {"type": "edgeGram", "minGram": 2, "maxGram": 4},
///     "tokenFilters": [{"type": "lowercase"}, {"type": "spellcheck"}]
/// }]}"#.parse().unwrap();
///
/// let translation = definition.translate("grams").unwrap();
/// assert_eq!(translation.pipeline.to_string(), "edgeNGram(minGramSize=2, maxGramSize=4) -> lowercase");
/// assert_eq!(translation.warnings.len(), 1);
/// ```
pub fn translate(definition: &CustomAnalyzerDefinition) -> Result<Translation> {
    debug!("Translating analyzer {}", definition.name);

    let tokenizer = translate_tokenizer(definition.tokenizer.as_ref())?;

    let mut token_filters = Vec::with_capacity(definition.token_filters.len());
    let mut warnings = Vec::new();
    for (index, stage) in definition.token_filters.iter().enumerate() {
        match translate_token_filter(index, stage)? {
            Some(spec) => token_filters.push(spec),
            None => {
                let warning = TranslationWarning {
                    index,
                    kind: stage_type(stage).map(str::to_string),
                };
                warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    let char_filters = definition
        .char_filters
        .iter()
        .map(translate_char_filter)
        .collect::<Result<Vec<_>>>()?;

    Ok(Translation {
        name: definition.name.clone(),
        pipeline: Pipeline {
            char_filters,
            tokenizer,
            token_filters,
        },
        warnings,
    })
}
