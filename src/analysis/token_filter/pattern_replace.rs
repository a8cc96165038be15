//! Pattern replace filter implementation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::pattern::compile;
use crate::error::{Result, TokenscopeError};

/// Which matches of the pattern are replaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplaceMode {
    #[default]
    All,
    First,
}

impl ReplaceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplaceMode::All => "all",
            ReplaceMode::First => "first",
        }
    }
}

impl fmt::Display for ReplaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplaceMode {
    type Err = TokenscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ReplaceMode::All),
            "first" => Ok(ReplaceMode::First),
            _ => Err(TokenscopeError::validation(format!(
                "Unknown replace mode '{s}' -- must be one of [all, first]"
            ))),
        }
    }
}

/// A filter that rewrites token text with a regular expression.
///
/// The replacement may refer to capture groups as `$1` or `${name}`.
#[derive(Clone, Debug)]
pub struct PatternReplaceFilter {
    pattern: Arc<Regex>,
    replacement: String,
    mode: ReplaceMode,
}

impl PatternReplaceFilter {
    pub fn new(pattern: &str, replacement: &str, mode: ReplaceMode) -> Result<Self> {
        Ok(Self {
            pattern: Arc::new(compile(pattern)?),
            replacement: replacement.to_string(),
            mode,
        })
    }
}

impl Filter for PatternReplaceFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let replaced = match self.mode {
                    ReplaceMode::All => self
                        .pattern
                        .replace_all(&token.text, self.replacement.as_str()),
                    ReplaceMode::First => {
                        self.pattern.replace(&token.text, self.replacement.as_str())
                    }
                }
                .into_owned();
                token.with_text(replaced)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn run(filter: &PatternReplaceFilter, text: &str) -> String {
        let tokens = vec![Token::new(text, 0)];
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .next()
            .unwrap()
            .text
    }

    #[test]
    fn test_replace_all() {
        let filter = PatternReplaceFilter::new(r"\d", "#", ReplaceMode::All).unwrap();
        assert_eq!(run(&filter, "a1b22"), "a#b##");
    }

    #[test]
    fn test_replace_first() {
        let filter = PatternReplaceFilter::new(r"\d", "#", ReplaceMode::First).unwrap();
        assert_eq!(run(&filter, "a1b22"), "a#b22");
    }

    #[test]
    fn test_group_reference() {
        let filter =
            PatternReplaceFilter::new(r"(\w+)@(\w+)", "${2}_$1", ReplaceMode::All).unwrap();
        assert_eq!(run(&filter, "user@host"), "host_user");
    }

    #[test]
    fn test_replace_mode_parse() {
        assert_eq!("first".parse::<ReplaceMode>().unwrap(), ReplaceMode::First);
        assert!("some".parse::<ReplaceMode>().unwrap_err().is_validation());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(
            PatternReplaceFilter::new("[", "", ReplaceMode::All)
                .unwrap_err()
                .is_validation()
        );
    }
}
