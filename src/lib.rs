//! # Tokenscope
//!
//! Build text analyzers from search index definitions and inspect the
//! tokens they produce.
//!
//! ## Features
//!
//! - Char filter, tokenizer and token filter pipelines with offset tracking
//! - Translation of custom analyzer definitions
//! - Standard, simple, whitespace, keyword and per-language presets
//! - Autocomplete gram analyzers
//! - A command line front end

pub mod analysis;
pub mod cli;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
