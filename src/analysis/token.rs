//! Token types and utilities for text analysis.
//!
//! This module defines the term representation that flows through every
//! stage of the analysis pipeline, and the rendering used to display a
//! finished term sequence.
//!
//! # Core Types
//!
//! - [`Token`] - A single analyzed term with text, position and offsets
//! - [`TokenType`] - Classification of token content (alphanumeric, CJK, etc.)
//! - [`TokenStream`] - Type alias for a boxed, single-pass iterator of tokens
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::token::{Token, render_terms};
//!
//! let tokens = vec![Token::new("hello", 0), Token::new("world", 1)];
//! assert_eq!(render_terms(&tokens), "[hello] [world]");
//! assert_eq!(render_terms(&[]), "[]");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// `position` and the byte offsets exist for display ordering only; nothing
/// in the pipeline relies on them for correctness.
///
/// # Examples
///
/// ```
/// use tokenscope::analysis::token::Token;
///
/// let token = Token::with_offsets("world", 1, 6, 11);
/// assert_eq!(token.text, "world");
/// assert_eq!(token.start_offset, 6);
/// assert_eq!(token.end_offset, 11);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Token type classification, when the tokenizer knows it
    pub token_type: Option<TokenType>,

    /// Position increment from the previous token (default: 1).
    ///
    /// Tokens injected at the same position as the previous one (phonetic
    /// codes, shingles) use 0.
    pub position_increment: usize,
}

/// Token type classification for different kinds of tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Alphanumeric text (Latin scripts)
    Alphanum,
    /// Numeric values
    Num,
    /// CJK ideographs
    Cjk,
    /// Katakana characters (Japanese)
    Katakana,
    /// Hiragana characters (Japanese)
    Hiragana,
    /// Hangul characters (Korean)
    Hangul,
    /// Email addresses
    Email,
    /// URLs
    Url,
    /// Multi-token shingles
    Shingle,
    /// Phonetic codes
    Phonetic,
    /// Other/unknown token types
    Other,
}

impl TokenType {
    /// Classify a word by the scripts it contains.
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }

        if word.chars().all(|c| c.is_numeric()) {
            return TokenType::Num;
        }

        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }

        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}' | '\u{FF66}'..='\u{FF9F}')) {
            return TokenType::Katakana;
        }

        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }

        if word.chars().any(is_cjk_ideograph) {
            return TokenType::Cjk;
        }

        if word.chars().all(|c| c.is_alphanumeric()) {
            return TokenType::Alphanum;
        }

        TokenType::Other
    }

    /// Whether tokens of this type take part in CJK bigram formation.
    pub fn is_cjk_family(self) -> bool {
        matches!(
            self,
            TokenType::Cjk | TokenType::Hiragana | TokenType::Katakana | TokenType::Hangul
        )
    }
}

/// Whether a character is a CJK unified ideograph.
pub fn is_cjk_ideograph(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
        '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
        '\u{2A700}'..='\u{2CEAF}' | // CJK Extensions C-E
        '\u{F900}'..='\u{FAFF}'     // CJK Compatibility Ideographs
    )
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            token_type: None,
            position_increment: 1,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Get the length of the token text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
///
/// Streams are lazy and single-pass: once drained they cannot be restarted.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Renumber positions so that they follow the position increments of the
/// surviving tokens.
///
/// Filters that drop or inject tokens call this before handing the stream on.
pub fn reposition(tokens: Vec<Token>) -> Vec<Token> {
    let mut position = 0usize;
    let mut first = true;
    tokens
        .into_iter()
        .map(|mut token| {
            if first {
                first = false;
            } else {
                position += token.position_increment;
            }
            token.position = position;
            token
        })
        .collect()
}

/// Render terms as `[term]` joined by single spaces, or `[]` when empty.
pub fn render_terms(tokens: &[Token]) -> String {
    if tokens.is_empty() {
        return "[]".to_string();
    }

    tokens
        .iter()
        .map(|token| format!("[{}]", token.text))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
        assert_eq!(token.position_increment, 1);
        assert!(token.token_type.is_none());
    }

    #[test]
    fn test_token_with_offsets() {
        let token = Token::with_offsets("world", 1, 6, 11);
        assert_eq!(token.text, "world");
        assert_eq!(token.position, 1);
        assert_eq!(token.start_offset, 6);
        assert_eq!(token.end_offset, 11);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", 0);
        assert_eq!(format!("{token}"), "hello");
    }

    #[test]
    fn test_char_len() {
        let token = Token::new("日本語", 0);
        assert_eq!(token.len(), 9);
        assert_eq!(token.char_len(), 3);
    }

    #[test]
    fn test_detect_token_type() {
        assert_eq!(TokenType::detect("hello"), TokenType::Alphanum);
        assert_eq!(TokenType::detect("2024"), TokenType::Num);
        assert_eq!(TokenType::detect("日本"), TokenType::Cjk);
        assert_eq!(TokenType::detect("ひらがな"), TokenType::Hiragana);
        assert_eq!(TokenType::detect("カタカナ"), TokenType::Katakana);
        assert_eq!(TokenType::detect("한국어"), TokenType::Hangul);
        assert_eq!(TokenType::detect("a-b"), TokenType::Other);
    }

    #[test]
    fn test_reposition() {
        let tokens = vec![
            Token::new("a", 7),
            Token::new("a-code", 7).with_position_increment(0),
            Token::new("b", 9),
        ];
        let tokens = reposition(tokens);
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 0);
        assert_eq!(tokens[2].position, 1);
    }

    #[test]
    fn test_render_terms() {
        let tokens = vec![Token::new("hello", 0), Token::new("world", 1)];
        assert_eq!(render_terms(&tokens), "[hello] [world]");
        assert_eq!(render_terms(&[]), "[]");
    }
}
