use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that reverses the characters of every token.
#[derive(Clone, Debug, Default)]
pub struct ReverseFilter;

impl ReverseFilter {
    pub fn new() -> Self {
        ReverseFilter
    }
}

impl Filter for ReverseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let reversed: String = token.text.chars().rev().collect();
                token.with_text(reversed)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "reverse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_reverse_filter() {
        let filter = ReverseFilter::new();
        let tokens = vec![Token::new("hello", 0), Token::new("日本語", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "olleh");
        assert_eq!(result[1].text, "語本日");
    }
}
