//! Custom analyzer definitions.
//!
//! An index definition is a JSON document with an `analyzers` list. Each
//! entry names a tokenizer plus optional `charFilters` and `tokenFilters`,
//! written in the definition vocabulary. This module reads those documents
//! and translates an entry into a [`Pipeline`](crate::analysis::pipeline::Pipeline).
//!
//! - [`document`] - Parsing and lookup of index definitions
//! - [`params`] - Typed access to stage fields
//! - [`translator`] - Per-stage renames, defaults and validation

pub mod document;
pub mod params;
pub mod translator;

pub use document::{CustomAnalyzerDefinition, IndexDefinition};
pub use translator::{Translation, TranslationWarning, translate};
