//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, TokenscopeError};

/// Pattern used when a split tokenizer is declared without one.
pub const DEFAULT_SPLIT_PATTERN: &str = r"\W+";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Emit the text between matches.
    Split,
    /// Emit one capture group of every match.
    Group(usize),
}

/// A regex-based tokenizer.
///
/// In split mode the pattern describes separators; in capture-group mode it
/// describes the tokens themselves, and group `0` is the whole match.
/// Empty pieces are never emitted.
#[derive(Clone, Debug)]
pub struct PatternTokenizer {
    pattern: Arc<Regex>,
    mode: Mode,
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| TokenscopeError::validation(format!("Invalid regex pattern '{pattern}': {e}")))
}

impl PatternTokenizer {
    /// Create a tokenizer that splits on matches of `pattern`.
    pub fn split(pattern: &str) -> Result<Self> {
        Ok(PatternTokenizer {
            pattern: Arc::new(compile(pattern)?),
            mode: Mode::Split,
        })
    }

    /// Create a tokenizer that extracts capture group `group` of every match.
    pub fn capture_group(pattern: &str, group: usize) -> Result<Self> {
        let regex = compile(pattern)?;
        if group >= regex.captures_len() {
            return Err(TokenscopeError::validation(format!(
                "group {group} does not exist in pattern '{pattern}'"
            )));
        }

        Ok(PatternTokenizer {
            pattern: Arc::new(regex),
            mode: Mode::Group(group),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for PatternTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();

        match self.mode {
            Mode::Split => {
                let mut last_end = 0;
                for mat in self.pattern.find_iter(text) {
                    if mat.start() > last_end {
                        tokens.push(Token::with_offsets(
                            &text[last_end..mat.start()],
                            tokens.len(),
                            last_end,
                            mat.start(),
                        ));
                    }
                    last_end = mat.end();
                }
                if last_end < text.len() {
                    tokens.push(Token::with_offsets(
                        &text[last_end..],
                        tokens.len(),
                        last_end,
                        text.len(),
                    ));
                }
            }
            Mode::Group(group) => {
                for caps in self.pattern.captures_iter(text) {
                    if let Some(m) = caps.get(group).filter(|m| !m.is_empty()) {
                        tokens.push(Token::with_offsets(
                            m.as_str(),
                            tokens.len(),
                            m.start(),
                            m.end(),
                        ));
                    }
                }
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}
