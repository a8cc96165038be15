//! Typed access to the fields of a stage entry.
//!
//! Stage entries in an index definition are JSON objects. [`Params`] reads
//! their fields as the types each stage expects and reports a validation
//! error naming the stage and field when a value has the wrong shape.

use serde_json::{Map, Value};

use crate::error::{Result, TokenscopeError};

/// Fields of one char filter, tokenizer or token filter entry.
#[derive(Clone, Copy, Debug)]
pub struct Params<'a> {
    kind: &'a str,
    map: &'a Map<String, Value>,
}

impl<'a> Params<'a> {
    /// `kind` is the entry's `type`, used in error messages.
    pub fn new(kind: &'a str, map: &'a Map<String, Value>) -> Self {
        Params { kind, map }
    }

    fn invalid(&self, key: &str, expected: &str) -> TokenscopeError {
        TokenscopeError::validation(format!("{}.{key} must be {expected}", self.kind))
    }

    fn missing(&self, key: &str) -> TokenscopeError {
        TokenscopeError::validation(format!("{} requires '{key}'", self.kind))
    }

    pub fn string(&self, key: &str) -> Result<Option<&'a str>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.invalid(key, "a string")),
        }
    }

    pub fn required_string(&self, key: &str) -> Result<&'a str> {
        self.string(key)?.ok_or_else(|| self.missing(key))
    }

    /// A non-negative number, truncated toward zero.
    pub fn count(&self, key: &str) -> Result<Option<usize>> {
        let Some(value) = self.map.get(key) else {
            return Ok(None);
        };
        let number = value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .ok_or_else(|| self.invalid(key, "a non-negative number"))?;
        Ok(Some(number.trunc() as usize))
    }

    pub fn required_count(&self, key: &str) -> Result<usize> {
        self.count(key)?.ok_or_else(|| self.missing(key))
    }

    pub fn boolean(&self, key: &str) -> Result<Option<bool>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.invalid(key, "a boolean")),
        }
    }

    /// A list of scalars, each rendered as a plain string.
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let Some(value) = self.map.get(key) else {
            return Ok(None);
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.invalid(key, "a list"))?;

        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                _ => Err(self.invalid(key, "a list of strings")),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// An object whose values are all strings, in key order.
    pub fn string_map(&self, key: &str) -> Result<Option<Vec<(String, String)>>> {
        let Some(value) = self.map.get(key) else {
            return Ok(None);
        };
        let object = value
            .as_object()
            .ok_or_else(|| self.invalid(key, "an object"))?;

        object
            .iter()
            .map(|(from, to)| match to {
                Value::String(to) => Ok((from.clone(), to.clone())),
                _ => Err(self.invalid(key, "an object of strings")),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}
