//! URL and e-mail aware tokenizer.

use std::sync::LazyLock;

use regex::Regex;

use super::Tokenizer;
use super::standard::StandardTokenizer;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

static URL_OR_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?P<url>(?:[A-Za-z][A-Za-z0-9+.\-]*://|www\.)[^\s<>"]*[^\s<>".,;:!?)\]'])"#,
        r"|(?P<email>[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,})",
    ))
    .expect("URL/e-mail pattern should be valid")
});

/// A tokenizer that follows the standard word rules but emits URLs and
/// e-mail addresses as single tokens.
#[derive(Clone, Debug, Default)]
pub struct UaxUrlEmailTokenizer {
    words: StandardTokenizer,
}

impl UaxUrlEmailTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_words(&self, text: &str, offset: usize, tokens: &mut Vec<Token>) {
        for (start, end) in self.words.segments(&text[offset..]) {
            let word = &text[offset + start..offset + end];
            tokens.push(
                Token::with_offsets(word, tokens.len(), offset + start, offset + end)
                    .with_token_type(TokenType::detect(word)),
            );
        }
    }
}

impl Tokenizer for UaxUrlEmailTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut last_end = 0;

        for caps in URL_OR_EMAIL.captures_iter(text) {
            let (m, token_type) = match (caps.name("url"), caps.name("email")) {
                (Some(m), _) => (m, TokenType::Url),
                (None, Some(m)) => (m, TokenType::Email),
                (None, None) => continue,
            };

            self.push_words(&text[..m.start()], last_end, &mut tokens);
            tokens.push(
                Token::with_offsets(m.as_str(), tokens.len(), m.start(), m.end())
                    .with_token_type(token_type),
            );
            last_end = m.end();
        }
        self.push_words(text, last_end, &mut tokens);

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "uax_url_email"
    }
}
