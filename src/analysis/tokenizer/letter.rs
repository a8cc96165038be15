use super::Tokenizer;
use super::whitespace::char_runs;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that emits maximal runs of letters and drops everything else.
///
/// This is the tokenizer behind the `simple` analyzer and tokenizer type.
#[derive(Clone, Debug, Default)]
pub struct LetterTokenizer;

impl LetterTokenizer {
    pub fn new() -> Self {
        LetterTokenizer
    }
}

impl Tokenizer for LetterTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = char_runs(text, char::is_alphabetic)
            .into_iter()
            .enumerate()
            .map(|(position, (start, end))| {
                let word = &text[start..end];
                Token::with_offsets(word, position, start, end)
                    .with_token_type(TokenType::detect(word))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "letter"
    }
}
