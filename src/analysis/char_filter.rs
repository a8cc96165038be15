//! Char filter implementations for text normalization.
//!
//! This module provides filters that pre-process the text string before it is
//! passed to the tokenizer. Char filters run in declared order and each one
//! reports the byte ranges it rewrote, so token offsets can be mapped back to
//! the original input.
//!
//! # Available Filters
//!
//! - [`html_strip::HtmlStripCharFilter`] - Removes HTML markup and decodes entities
//! - [`mapping::MappingCharFilter`] - Substring replacement table
//! - [`icu_normalize::IcuNormalizeCharFilter`] - Unicode normalization
//! - [`persian::PersianCharFilter`] - Persian zero-width non-joiner handling
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::char_filter::CharFilter;
//! use tokenscope::analysis::char_filter::html_strip::HtmlStripCharFilter;
//!
//! let filter = HtmlStripCharFilter::new();
//! let (text, _) = filter.filter("<b>bold</b> move");
//! assert_eq!(text, "bold move");
//! ```

use std::sync::Arc;

use crate::error::Result;

use self::html_strip::HtmlStripCharFilter;
use self::icu_normalize::{IcuNormalizeCharFilter, NormalizationForm};
use self::mapping::{MappingCharFilter, MappingRule};
use self::persian::PersianCharFilter;

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }
}

/// Trait for character filters that transform text before tokenization.
///
/// Implementations return the rewritten text along with the list of
/// transformations, ordered by position, that produced it.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod html_strip;
pub mod icu_normalize;
pub mod mapping;
pub mod persian;

/// The `type` tags accepted for char filters in an index definition.
pub const CHAR_FILTER_TYPES: &[&str] = &["htmlStrip", "icuNormalize", "mapping", "persian"];

/// A character filter as declared in a pipeline, with its parameters
/// already validated and converted to the execution vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharFilterSpec {
    /// Strip HTML markup, keeping the tags listed in `escaped_tags`.
    HtmlStrip { escaped_tags: Vec<String> },
    /// Replace substrings using an ordered table of `key => value` pairs.
    Mapping { mappings: Vec<(String, String)> },
    /// NFKC normalization with case folding.
    IcuNormalize,
    /// Persian-specific normalization.
    Persian,
}

impl CharFilterSpec {
    /// The definition vocabulary `type` of this filter.
    pub fn kind(&self) -> &'static str {
        match self {
            CharFilterSpec::HtmlStrip { .. } => "htmlStrip",
            CharFilterSpec::Mapping { .. } => "mapping",
            CharFilterSpec::IcuNormalize => "icuNormalize",
            CharFilterSpec::Persian => "persian",
        }
    }

    /// Parameters in the execution vocabulary, in the order they are applied.
    ///
    /// `escapedTags` is a comma-joined tag list; each mapping entry becomes a
    /// separate `mapping` parameter holding a `"key" => "value"` rule.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            CharFilterSpec::HtmlStrip { escaped_tags } if !escaped_tags.is_empty() => {
                vec![("escapedTags", escaped_tags.join(","))]
            }
            CharFilterSpec::Mapping { mappings } => mappings
                .iter()
                .map(|(from, to)| ("mapping", MappingRule::new(from, to).to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Construct the executable filter.
    pub fn build(&self) -> Result<Arc<dyn CharFilter>> {
        Ok(match self {
            CharFilterSpec::HtmlStrip { escaped_tags } => {
                Arc::new(HtmlStripCharFilter::with_escaped_tags(escaped_tags))
            }
            CharFilterSpec::Mapping { .. } => {
                let rules = self
                    .params()
                    .into_iter()
                    .map(|(_, rule)| rule.parse::<MappingRule>())
                    .collect::<Result<Vec<_>>>()?;
                Arc::new(MappingCharFilter::from_rules(rules)?)
            }
            CharFilterSpec::IcuNormalize => {
                Arc::new(IcuNormalizeCharFilter::new(NormalizationForm::NfkcCf))
            }
            CharFilterSpec::Persian => Arc::new(PersianCharFilter::new()),
        })
    }
}
