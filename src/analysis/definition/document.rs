//! The index definition document.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::definition::translator::{Translation, translate};
use crate::error::{Result, TokenscopeError};

/// A stage entry: a `type` plus its type-specific fields.
pub type StageDefinition = Map<String, Value>;

/// One entry of the `analyzers` list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAnalyzerDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<StageDefinition>,
    #[serde(default)]
    pub char_filters: Vec<StageDefinition>,
    #[serde(default)]
    pub token_filters: Vec<StageDefinition>,
}

/// A parsed index definition.
///
/// # Examples
///
/// ```
/// use tokenscope::analysis::definition::document::IndexDefinition;
///
/// let definition: IndexDefinition = r#"{
///     "analyzers": [{
///         "name": "a1",
///         "tokenizer": {"type": "whitespace"},
///         "tokenFilters": [{"type": "lowercase"}]
///     }]
/// }"#.parse().unwrap();
///
/// assert_eq!(definition.find("a1").unwrap().token_filters.len(), 1);
/// assert!(definition.find("a2").unwrap_err().is_lookup());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub analyzers: Vec<CustomAnalyzerDefinition>,
    /// Where the document was read from, for messages.
    #[serde(skip)]
    source: Option<String>,
}

impl IndexDefinition {
    /// Parse a definition, naming `source` in error messages.
    pub fn parse(text: &str, source: Option<&str>) -> Result<Self> {
        let label = source.unwrap_or("index definition");

        let value: Value = serde_json::from_str(text)
            .map_err(|e| TokenscopeError::parse(format!("{label} is not valid JSON: {e}")))?;

        match value.get("analyzers") {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(TokenscopeError::parse(format!(
                    "'analyzers' in {label} must be a list"
                )));
            }
            None => {
                return Err(TokenscopeError::parse(format!(
                    "{label} has no 'analyzers' list"
                )));
            }
        }

        let mut definition: IndexDefinition = serde_json::from_value(value)
            .map_err(|e| TokenscopeError::parse(format!("Malformed analyzers in {label}: {e}")))?;
        definition.source = source.map(str::to_string);
        Ok(definition)
    }

    /// Read and parse a definition file.
    ///
    /// # Errors
    ///
    /// An unreadable file is reported as a parse error, like a malformed one.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| {
            TokenscopeError::parse(format!("Unable to read index definition {source}: {e}"))
        })?;
        Self::parse(&text, Some(&source))
    }

    /// The file this definition was read from, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The first analyzer named `name`.
    pub fn find(&self, name: &str) -> Result<&CustomAnalyzerDefinition> {
        for analyzer in &self.analyzers {
            debug!("Scanning analyzer {}", analyzer.name);
            if analyzer.name == name {
                return Ok(analyzer);
            }
        }

        let location = match &self.source {
            Some(source) => format!(" {source}"),
            None => String::new(),
        };
        Err(TokenscopeError::lookup(format!(
            "Analyzer {name} not found in index definition{location}"
        )))
    }

    /// Find the analyzer named `name` and translate it into a pipeline.
    pub fn translate(&self, name: &str) -> Result<Translation> {
        translate(self.find(name)?)
    }

    /// Names of all analyzers, in document order.
    pub fn names(&self) -> Vec<&str> {
        self.analyzers.iter().map(|a| a.name.as_str()).collect()
    }
}

impl FromStr for IndexDefinition {
    type Err = TokenscopeError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text, None)
    }
}

impl fmt::Display for CustomAnalyzerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
