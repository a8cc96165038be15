use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

use super::{CharFilter, Transformation};
use crate::error::{Result, TokenscopeError};

/// Supported Unicode normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationForm {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
    /// NFKC with case folding and removal of default ignorable code points.
    #[default]
    NfkcCf,
}

impl NormalizationForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationForm::Nfc => "nfc",
            NormalizationForm::Nfd => "nfd",
            NormalizationForm::Nfkc => "nfkc",
            NormalizationForm::Nfkd => "nfkd",
            NormalizationForm::NfkcCf => "nfkc_cf",
        }
    }

    /// Normalize `text` into this form.
    pub fn normalize(&self, text: &str) -> String {
        match self {
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
            NormalizationForm::NfkcCf => {
                let folded: String = text
                    .nfkc()
                    .filter(|c| !is_default_ignorable(*c))
                    .collect::<String>()
                    .to_lowercase();
                folded.nfkc().collect()
            }
        }
    }
}

impl FromStr for NormalizationForm {
    type Err = TokenscopeError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "nfc" => Ok(NormalizationForm::Nfc),
            "nfd" => Ok(NormalizationForm::Nfd),
            "nfkc" => Ok(NormalizationForm::Nfkc),
            "nfkd" => Ok(NormalizationForm::Nfkd),
            "nfkc_cf" => Ok(NormalizationForm::NfkcCf),
            _ => Err(TokenscopeError::validation(format!(
                "Unknown normalization form '{name}' -- must be one of [nfc, nfd, nfkc, nfkd, nfkc_cf]"
            ))),
        }
    }
}

fn is_default_ignorable(c: char) -> bool {
    matches!(c,
        '\u{00AD}' | '\u{034F}' | '\u{061C}' | '\u{115F}' | '\u{1160}' |
        '\u{17B4}' | '\u{17B5}' | '\u{180B}'..='\u{180F}' |
        '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' |
        '\u{2060}'..='\u{206F}' | '\u{3164}' | '\u{FE00}'..='\u{FE0F}' |
        '\u{FEFF}' | '\u{FFA0}' | '\u{FFF0}'..='\u{FFF8}'
    )
}

/// A char filter that performs Unicode normalization.
///
/// The input is normalized one combining sequence at a time, so every
/// rewritten sequence is reported as its own transformation.
pub struct IcuNormalizeCharFilter {
    form: NormalizationForm,
}

impl IcuNormalizeCharFilter {
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }
}

impl CharFilter for IcuNormalizeCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        let mut flush = |start: usize, end: usize, output: &mut String| {
            let segment = &input[start..end];
            let normalized = self.form.normalize(segment);
            if normalized == segment {
                output.push_str(segment);
            } else {
                let new_start = output.len();
                output.push_str(&normalized);
                transformations.push(Transformation::new(start, end, new_start, output.len()));
            }
        };

        let mut segment_start = 0;
        for (i, c) in input.char_indices() {
            if i > segment_start && canonical_combining_class(c) == 0 {
                flush(segment_start, i, &mut output);
                segment_start = i;
            }
        }
        if segment_start < input.len() {
            flush(segment_start, input.len(), &mut output);
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "icu_normalize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_normalization() {
        let filter = IcuNormalizeCharFilter::new(NormalizationForm::Nfc);
        let input = "Am\u{00e9}lie";
        let (output, transformations) = filter.filter(input);
        assert_eq!(output, "Amélie");
        assert!(transformations.is_empty());

        // Decomposed 'e' + U+0301 composes to U+00E9
        let input_decomposed = "Am\u{0065}\u{0301}lie";
        let (output, transformations) = filter.filter(input_decomposed);
        assert_eq!(output, "Am\u{00e9}lie");
        assert_eq!(transformations.len(), 1);
        assert_eq!(transformations[0].original_start, 2);
        assert_eq!(transformations[0].original_end, 5);
        assert_eq!(transformations[0].new_start, 2);
        assert_eq!(transformations[0].new_end, 4);
    }

    #[test]
    fn test_nfkc_normalization() {
        let filter = IcuNormalizeCharFilter::new(NormalizationForm::Nfkc);
        let (output, _) = filter.filter("\u{ff21}");
        assert_eq!(output, "A");
    }

    #[test]
    fn test_nfkc_cf_folds_case() {
        let filter = IcuNormalizeCharFilter::new(NormalizationForm::NfkcCf);
        let (output, _) = filter.filter("ＡＢＣ Straße\u{00AD}s");
        assert_eq!(output, "abc straßes");
    }

    #[test]
    fn test_form_names() {
        for name in ["nfc", "nfd", "nfkc", "nfkd", "nfkc_cf"] {
            let form: NormalizationForm = name.parse().unwrap();
            assert_eq!(form.as_str(), name);
        }
        assert!("nfx".parse::<NormalizationForm>().unwrap_err().is_validation());
    }
}
