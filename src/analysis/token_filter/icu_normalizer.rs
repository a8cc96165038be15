use super::Filter;
use crate::analysis::char_filter::icu_normalize::NormalizationForm;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that normalizes every token into a Unicode normalization form.
#[derive(Clone, Debug, Default)]
pub struct IcuNormalizerFilter {
    form: NormalizationForm,
}

impl IcuNormalizerFilter {
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    pub fn form(&self) -> NormalizationForm {
        self.form
    }
}

impl Filter for IcuNormalizerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let normalized = self.form.normalize(&token.text);
                token.with_text(normalized)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "icu_normalizer"
    }
}
