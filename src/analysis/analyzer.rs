//! Analyzers: executable pipelines and the built-in presets.
//!
//! - [`analyzer`] - The [`Analyzer`](analyzer::Analyzer) trait
//! - [`pipeline`] - [`PipelineAnalyzer`](pipeline::PipelineAnalyzer), the executor every analyzer is built into
//! - [`language`] - Per-language analyzers keyed by language code
//! - [`preset`] - Named presets, autocomplete, and the [`AnalysisRequest`](preset::AnalysisRequest) runner

pub mod analyzer;
pub mod language;
pub mod pipeline;
pub mod preset;
