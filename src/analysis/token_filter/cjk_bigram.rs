//! CJK bigram filter implementation.

use super::Filter;
use crate::analysis::token::{Token, TokenStream, TokenType, reposition};
use crate::error::Result;

/// One CJK character waiting to be paired.
struct Unit {
    text: String,
    start_offset: usize,
    end_offset: usize,
    token_type: TokenType,
}

/// A filter that pairs adjacent CJK characters into overlapping bigrams.
///
/// Tokens of the CJK family (ideographs, kana, hangul) are split into their
/// characters, and each run of characters whose source tokens touch in the
/// original text becomes a sequence of bigrams. A run of a single character
/// is kept as a unigram. Other tokens pass through unchanged and break runs.
#[derive(Clone, Debug, Default)]
pub struct CjkBigramFilter;

impl CjkBigramFilter {
    pub fn new() -> Self {
        CjkBigramFilter
    }

    fn is_cjk(token: &Token) -> bool {
        token
            .token_type
            .unwrap_or_else(|| TokenType::detect(&token.text))
            .is_cjk_family()
    }

    fn flush(run: &mut Vec<Unit>, increment: usize, output: &mut Vec<Token>) {
        match run.len() {
            0 => {}
            1 => {
                let unit = &run[0];
                output.push(
                    Token::with_offsets(&unit.text, 0, unit.start_offset, unit.end_offset)
                        .with_token_type(unit.token_type)
                        .with_position_increment(increment),
                );
            }
            _ => {
                for (i, pair) in run.windows(2).enumerate() {
                    output.push(
                        Token::with_offsets(
                            format!("{}{}", pair[0].text, pair[1].text),
                            0,
                            pair[0].start_offset,
                            pair[1].end_offset,
                        )
                        .with_token_type(pair[0].token_type)
                        .with_position_increment(if i == 0 { increment } else { 1 }),
                    );
                }
            }
        }
        run.clear();
    }
}

impl Filter for CjkBigramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut output = Vec::new();
        let mut run: Vec<Unit> = Vec::new();
        let mut run_increment = 1;

        for token in tokens {
            if !Self::is_cjk(&token) {
                Self::flush(&mut run, run_increment, &mut output);
                output.push(token);
                continue;
            }

            let adjacent = run
                .last()
                .is_some_and(|unit| unit.end_offset == token.start_offset);
            if !adjacent {
                Self::flush(&mut run, run_increment, &mut output);
            }
            if run.is_empty() {
                run_increment = token.position_increment;
            }

            let token_type = token
                .token_type
                .unwrap_or_else(|| TokenType::detect(&token.text));
            // Offsets are only exact when the text still spans its source.
            let exact = token.end_offset.checked_sub(token.start_offset) == Some(token.text.len());
            for (i, c) in token.text.char_indices() {
                let (start_offset, end_offset) = if exact {
                    let start = token.start_offset + i;
                    (start, start + c.len_utf8())
                } else {
                    (token.start_offset, token.end_offset)
                };
                run.push(Unit {
                    text: c.to_string(),
                    start_offset,
                    end_offset,
                    token_type,
                });
            }
        }
        Self::flush(&mut run, run_increment, &mut output);

        Ok(Box::new(reposition(output).into_iter()))
    }

    fn name(&self) -> &'static str {
        "cjk_bigram"
    }
}
