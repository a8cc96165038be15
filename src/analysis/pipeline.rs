//! Pipeline description and the runner entry point.
//!
//! A [`Pipeline`] is the declarative form of an analyzer: ordered char
//! filters, exactly one tokenizer and ordered token filters, each already
//! validated. [`analyze`] turns it into a [`PipelineAnalyzer`] and runs it.
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::pipeline::{Pipeline, analyze};
//! use tokenscope::analysis::token_filter::TokenFilterSpec;
//! use tokenscope::analysis::tokenizer::TokenizerSpec;
//!
//! let pipeline = Pipeline::new(TokenizerSpec::Whitespace)
//!     .with_token_filter(TokenFilterSpec::Lowercase);
//!
//! let terms: Vec<String> = analyze(&pipeline, "Hello World")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(terms, vec!["hello", "world"]);
//! ```

use std::fmt;

use log::debug;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::CharFilterSpec;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::TokenFilterSpec;
use crate::analysis::tokenizer::TokenizerSpec;
use crate::error::Result;

/// Char filters, tokenizer and token filters, in execution order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pipeline {
    pub char_filters: Vec<CharFilterSpec>,
    pub tokenizer: TokenizerSpec,
    pub token_filters: Vec<TokenFilterSpec>,
}

impl Pipeline {
    /// A pipeline with only a tokenizer.
    pub fn new(tokenizer: TokenizerSpec) -> Self {
        Pipeline {
            char_filters: Vec::new(),
            tokenizer,
            token_filters: Vec::new(),
        }
    }

    pub fn with_char_filter(mut self, char_filter: CharFilterSpec) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    pub fn with_token_filter(mut self, token_filter: TokenFilterSpec) -> Self {
        self.token_filters.push(token_filter);
        self
    }

    /// Construct the executable analyzer.
    ///
    /// Fails with the error of the first stage that cannot be built.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let mut analyzer = PipelineAnalyzer::new(self.tokenizer.build()?);
        for char_filter in &self.char_filters {
            analyzer = analyzer.add_char_filter(char_filter.build()?);
        }
        for token_filter in &self.token_filters {
            analyzer = analyzer.add_filter(token_filter.build()?);
        }
        Ok(analyzer.with_name(self.to_string()))
    }
}

impl fmt::Display for Pipeline {
    /// Renders the stages in execution vocabulary, e.g.
    /// `htmlStrip -> edgeNGram(minGramSize=2, maxGramSize=3) -> lowercase`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn stage(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            params: &[(&'static str, String)],
        ) -> fmt::Result {
            write!(f, "{name}")?;
            if !params.is_empty() {
                let joined = params
                    .iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "({joined})")?;
            }
            Ok(())
        }

        for char_filter in &self.char_filters {
            stage(f, char_filter.kind(), &char_filter.params())?;
            write!(f, " -> ")?;
        }
        stage(f, self.tokenizer.execution_name(), &self.tokenizer.params())?;
        for token_filter in &self.token_filters {
            write!(f, " -> ")?;
            stage(f, token_filter.kind(), &token_filter.params())?;
        }
        Ok(())
    }
}

/// Run `pipeline` over `text`.
///
/// A fresh analyzer is built for every call, so nothing is shared between
/// runs.
pub fn analyze(pipeline: &Pipeline, text: &str) -> Result<TokenStream> {
    let analyzer = pipeline.build()?;
    debug!("Analyzing {} bytes with {}", text.len(), analyzer.pipeline_name());
    analyzer.analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::render_terms;

    fn terms(pipeline: &Pipeline, text: &str) -> Vec<String> {
        analyze(pipeline, text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_lowercase_whitespace() {
        let pipeline =
            Pipeline::new(TokenizerSpec::Whitespace).with_token_filter(TokenFilterSpec::Lowercase);
        assert_eq!(terms(&pipeline, "Hello World"), vec!["hello", "world"]);
    }

    #[test]
    fn test_empty_input_renders_marker() {
        let pipeline = Pipeline::new(TokenizerSpec::Standard);
        let tokens: Vec<_> = analyze(&pipeline, "").unwrap().collect();
        assert_eq!(render_terms(&tokens), "[]");
    }

    #[test]
    fn test_build_error_propagates() {
        let pipeline = Pipeline::new(TokenizerSpec::Whitespace).with_token_filter(
            TokenFilterSpec::Length { min: 5, max: 2 },
        );
        assert!(analyze(&pipeline, "text").err().unwrap().is_validation());
    }

    #[test]
    fn test_display() {
        let pipeline = Pipeline::new(TokenizerSpec::EdgeGram {
            min_gram: 2,
            max_gram: 3,
        })
        .with_char_filter(CharFilterSpec::Persian)
        .with_token_filter(TokenFilterSpec::Lowercase);

        assert_eq!(
            pipeline.to_string(),
            "persian -> edgeNGram(minGramSize=2, maxGramSize=3) -> lowercase"
        );
    }
}
