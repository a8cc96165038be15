use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Apply accent removal and case folding, for any script.
pub fn icu_fold(text: &str) -> String {
    let stripped: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();

    let mut folded = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        match c {
            'ß' | 'ẞ' => folded.push_str("ss"),
            'ς' => folded.push('σ'),
            _ => folded.extend(c.to_lowercase()),
        }
    }

    folded.nfkc().collect()
}

/// A filter that folds case, removes diacritics and applies compatibility
/// normalization, so that visually similar terms compare equal.
#[derive(Clone, Debug, Default)]
pub struct IcuFoldingFilter;

impl IcuFoldingFilter {
    pub fn new() -> Self {
        IcuFoldingFilter
    }
}

impl Filter for IcuFoldingFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let folded = icu_fold(&token.text);
                token.with_text(folded)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "icu_folding"
    }
}
