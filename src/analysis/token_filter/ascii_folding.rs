//! ASCII folding filter implementation.
//!
//! Latin letters carrying diacritics are reduced to their base letter, and a
//! handful of letters and ligatures without a decomposition are spelled out
//! in ASCII. Characters from other scripts are left alone.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Replacements for characters that have no canonical decomposition.
fn special_folding(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' => "d",
        'Đ' => "D",
        'ð' => "d",
        'Ð' => "D",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        'ħ' => "h",
        'Ħ' => "H",
        'ŧ' => "t",
        'Ŧ' => "T",
        'ŋ' => "n",
        'Ŋ' => "N",
        'ĸ' => "q",
        'ſ' => "s",
        'ﬀ' => "ff",
        'ﬁ' => "fi",
        'ﬂ' => "fl",
        'ﬃ' => "ffi",
        'ﬄ' => "ffl",
        'ﬆ' => "st",
        '‘' | '’' | '‚' | '‛' | '′' => "'",
        '“' | '”' | '„' | '‟' | '″' | '«' | '»' => "\"",
        '‐' | '‑' | '‒' | '–' | '—' | '―' => "-",
        _ => return None,
    })
}

/// Fold a string to ASCII where a Latin equivalent exists.
pub fn fold_to_ascii(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());

    for c in text.chars() {
        if c.is_ascii() {
            folded.push(c);
        } else if let Some(replacement) = special_folding(c) {
            folded.push_str(replacement);
        } else {
            let mut decomposed = std::iter::once(c).nfd();
            match decomposed.next() {
                Some(base) if base.is_ascii() && decomposed.all(is_combining_mark) => {
                    folded.push(base)
                }
                _ => folded.push(c),
            }
        }
    }

    folded
}

/// A filter that converts alphabetic, numeric and symbolic characters
/// outside Basic Latin to their ASCII equivalents, when one exists.
#[derive(Clone, Debug, Default)]
pub struct AsciiFoldingFilter;

impl AsciiFoldingFilter {
    pub fn new() -> Self {
        AsciiFoldingFilter
    }
}

impl Filter for AsciiFoldingFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let folded = fold_to_ascii(&token.text);
                token.with_text(folded)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_fold_to_ascii() {
        assert_eq!(fold_to_ascii("café"), "cafe");
        assert_eq!(fold_to_ascii("Ångström"), "Angstrom");
        assert_eq!(fold_to_ascii("straße"), "strasse");
        assert_eq!(fold_to_ascii("Łódź"), "Lodz");
        assert_eq!(fold_to_ascii("encyclopædia"), "encyclopaedia");
        assert_eq!(fold_to_ascii("ﬁne"), "fine");
    }

    #[test]
    fn test_non_latin_untouched() {
        assert_eq!(fold_to_ascii("日本語"), "日本語");
        assert_eq!(fold_to_ascii("привет"), "привет");
    }

    #[test]
    fn test_ascii_folding_filter() {
        let filter = AsciiFoldingFilter::new();
        let tokens = vec![Token::new("naïve", 0), Token::new("résumé", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "naive");
        assert_eq!(result[1].text, "resume");
    }
}
