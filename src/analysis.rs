//! Text analysis.
//!
//! Text flows through a pipeline of char filters, one tokenizer and token
//! filters, in that order. Pipelines are described by
//! [`Pipeline`](pipeline::Pipeline), built from presets in
//! [`analyzer::preset`] or translated from an index definition in
//! [`definition`], and executed by
//! [`PipelineAnalyzer`](analyzer::pipeline::PipelineAnalyzer).

pub mod analyzer;
pub mod char_filter;
pub mod definition;
pub mod pipeline;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::analyzer::Analyzer;
pub use analyzer::pipeline::PipelineAnalyzer;
pub use pipeline::{Pipeline, analyze};
pub use token::{Token, TokenStream};
