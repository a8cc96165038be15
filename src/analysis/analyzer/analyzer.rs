//! Core analyzer trait definition.
//!
//! An analyzer is the complete text processing unit:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filter 1 … N → Token Stream
//! ```
//!
//! The only implementation shipped here is
//! [`PipelineAnalyzer`](super::pipeline::PipelineAnalyzer), which every
//! preset and custom analyzer is assembled into.
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use tokenscope::analysis::analyzer::analyzer::Analyzer;
//! use tokenscope::analysis::token::TokenStream;
//! use tokenscope::error::Result;
//!
//! struct SilentAnalyzer;
//!
//! impl Analyzer for SilentAnalyzer {
//!     fn analyze(&self, _text: &str) -> Result<TokenStream> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "silent"
//!     }
//! }
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so that independent callers can share
/// an analyzer across threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    ///
    /// Any failing stage aborts the whole run; no partial stream is
    /// returned.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
