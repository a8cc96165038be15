//! Mapping char filter implementation.
//!
//! Replaces substrings according to a table of rules. Rules are written as
//! `"key" => "value"` with Java-style escapes inside the quotes, and the
//! longest matching key wins at every position.

use std::fmt;
use std::str::FromStr;

use aho_corasick::{AhoCorasick, MatchKind};

use super::{CharFilter, Transformation};
use crate::error::{Result, TokenscopeError};

/// A single `"key" => "value"` replacement rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingRule {
    pub from: String,
    pub to: String,
}

impl MappingRule {
    pub fn new<F: Into<String>, T: Into<String>>(from: F, to: T) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" => \"{}\"", escape(&self.from), escape(&self.to))
    }
}

impl FromStr for MappingRule {
    type Err = TokenscopeError;

    fn from_str(rule: &str) -> Result<Self> {
        let invalid = || TokenscopeError::validation(format!("Invalid mapping rule: {rule}"));

        let (from, rest) = read_quoted(rule.trim_start()).ok_or_else(invalid)?;
        let rest = rest.trim_start().strip_prefix("=>").ok_or_else(invalid)?;
        let (to, rest) = read_quoted(rest.trim_start()).ok_or_else(invalid)?;
        if !rest.trim().is_empty() {
            return Err(invalid());
        }

        Ok(MappingRule {
            from: unescape(from).ok_or_else(invalid)?,
            to: unescape(to).ok_or_else(invalid)?,
        })
    }
}

/// Split a leading `"..."` off `input`, returning the raw quoted body and the rest.
fn read_quoted(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix('"')?;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some((&body[..i], &body[i + 1..])),
            _ => {}
        }
    }
    None
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            other => out.push(other),
        }
    }
    Some(out)
}

fn invalid_table(reason: impl fmt::Display) -> TokenscopeError {
    TokenscopeError::validation(format!("Invalid mapping table: {reason}"))
}

/// A char filter that replaces substrings using a mapping table.
pub struct MappingCharFilter {
    ac: Option<AhoCorasick>,
    replacements: Vec<String>,
}

impl MappingCharFilter {
    /// Create a mapping filter from `(from, to)` pairs.
    pub fn new<I>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut keys = Vec::new();
        let mut replacements = Vec::new();

        for (k, v) in mapping {
            if k.is_empty() {
                return Err(invalid_table("keys must not be empty"));
            }
            keys.push(k);
            replacements.push(v);
        }

        let ac = if keys.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::LeftmostLongest)
                    .build(&keys)
                    .map_err(invalid_table)?,
            )
        };

        Ok(Self { ac, replacements })
    }

    /// Create a mapping filter from parsed rules.
    pub fn from_rules(rules: Vec<MappingRule>) -> Result<Self> {
        Self::new(rules.into_iter().map(|rule| (rule.from, rule.to)))
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let Some(ac) = &self.ac else {
            return (input.to_string(), Vec::new());
        };

        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();
        let mut last_match_end = 0;

        for m in ac.find_iter(input) {
            let replacement = &self.replacements[m.pattern().as_usize()];

            output.push_str(&input[last_match_end..m.start()]);

            let new_start = output.len();
            output.push_str(replacement);
            let new_end = output.len();

            transformations.push(Transformation::new(m.start(), m.end(), new_start, new_end));

            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "mapping"
    }
}
