use super::{CharFilter, Transformation};

const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';

/// A char filter that turns the zero-width non-joiner used inside Persian
/// words into a plain space, so that the tokenizer splits on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersianCharFilter;

impl PersianCharFilter {
    pub fn new() -> Self {
        PersianCharFilter
    }
}

impl CharFilter for PersianCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        for (i, c) in input.char_indices() {
            if c == ZERO_WIDTH_NON_JOINER {
                let new_start = output.len();
                output.push(' ');
                transformations.push(Transformation::new(
                    i,
                    i + c.len_utf8(),
                    new_start,
                    new_start + 1,
                ));
            } else {
                output.push(c);
            }
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "persian"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zwnj_becomes_space() {
        let filter = PersianCharFilter::new();
        let (output, transformations) = filter.filter("می\u{200C}خواهم");
        assert_eq!(output, "می خواهم");
        assert_eq!(transformations.len(), 1);
        assert_eq!(transformations[0].original_end - transformations[0].original_start, 3);
        assert_eq!(transformations[0].new_end - transformations[0].new_start, 1);
    }

    #[test]
    fn test_plain_text_unchanged() {
        let filter = PersianCharFilter::new();
        let (output, transformations) = filter.filter("سلام");
        assert_eq!(output, "سلام");
        assert!(transformations.is_empty());
    }
}
