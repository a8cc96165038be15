//! HTML strip char filter implementation.
//!
//! Removes tags, comments and the bodies of `script` and `style` elements,
//! and decodes character entities. Block-level tags are replaced with a line
//! break so that words on either side of them stay separate.

use std::collections::HashSet;

use super::{CharFilter, Transformation};

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul",
];

/// A char filter that strips HTML markup.
#[derive(Debug, Clone, Default)]
pub struct HtmlStripCharFilter {
    escaped_tags: HashSet<String>,
}

/// A parsed tag: its lowercased name, whether it closes an element, and its byte length.
struct Tag {
    name: String,
    closing: bool,
    len: usize,
}

impl HtmlStripCharFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter that leaves the named tags in the text.
    pub fn with_escaped_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        Self {
            escaped_tags: tags
                .iter()
                .map(|tag| tag.as_ref().trim().to_ascii_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    fn parse_tag(rest: &str) -> Option<Tag> {
        let body = rest.strip_prefix('<')?;
        let (closing, body) = match body.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, body),
        };

        let first = body.chars().next()?;
        let declaration = first == '!' || first == '?';
        if !declaration && !first.is_ascii_alphabetic() {
            return None;
        }

        let name: String = if declaration {
            String::new()
        } else {
            body.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == ':')
                .collect::<String>()
                .to_ascii_lowercase()
        };

        let mut quote: Option<char> = None;
        for (i, c) in body.char_indices() {
            match (quote, c) {
                (Some(q), _) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '>') => {
                    let len = rest.len() - body.len() + i + 1;
                    return Some(Tag { name, closing, len });
                }
                (None, _) => {}
            }
        }
        None
    }

    fn decode_entity(rest: &str) -> Option<(char, usize)> {
        let body = rest.strip_prefix('&')?;
        let end = body.char_indices().take(12).find(|(_, c)| *c == ';')?.0;
        let name = &body[..end];

        let decoded = if let Some(number) = name.strip_prefix('#') {
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        } else {
            match name {
                "amp" => '&',
                "lt" => '<',
                "gt" => '>',
                "quot" => '"',
                "apos" => '\'',
                "nbsp" => '\u{00A0}',
                "copy" => '\u{00A9}',
                "reg" => '\u{00AE}',
                "hellip" => '\u{2026}',
                "mdash" => '\u{2014}',
                "ndash" => '\u{2013}',
                _ => return None,
            }
        };

        Some((decoded, end + 2))
    }
}

/// Accumulates output text and the transformations that produced it.
struct Stripped<'a> {
    input: &'a str,
    output: String,
    transformations: Vec<Transformation>,
}

impl Stripped<'_> {
    fn replace(&mut self, start: usize, end: usize, replacement: &str) {
        let new_start = self.output.len();
        self.output.push_str(replacement);
        self.transformations
            .push(Transformation::new(start, end, new_start, self.output.len()));
    }

    fn keep(&mut self, start: usize, end: usize) {
        self.output.push_str(&self.input[start..end]);
    }
}

impl CharFilter for HtmlStripCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut stripped = Stripped {
            input,
            output: String::with_capacity(input.len()),
            transformations: Vec::new(),
        };

        let mut i = 0;
        while let Some(c) = input[i..].chars().next() {
            let rest = &input[i..];

            if rest.starts_with("<!--") {
                let end = rest.find("-->").map_or(input.len(), |p| i + p + 3);
                stripped.replace(i, end, "");
                i = end;
                continue;
            }

            if c == '<' {
                if let Some(tag) = Self::parse_tag(rest) {
                    let end = i + tag.len;
                    if self.escaped_tags.contains(&tag.name) {
                        stripped.keep(i, end);
                    } else if !tag.closing && (tag.name == "script" || tag.name == "style") {
                        let close = format!("</{}", tag.name);
                        let lowered = input[end..].to_ascii_lowercase();
                        let element_end = match lowered.find(&close) {
                            Some(p) => input[end + p..]
                                .find('>')
                                .map_or(input.len(), |q| end + p + q + 1),
                            None => input.len(),
                        };
                        stripped.replace(i, element_end, "");
                        i = element_end;
                        continue;
                    } else if BLOCK_TAGS.contains(&tag.name.as_str()) {
                        stripped.replace(i, end, "\n");
                    } else {
                        stripped.replace(i, end, "");
                    }
                    i = end;
                    continue;
                }
            }

            if c == '&' {
                if let Some((decoded, len)) = Self::decode_entity(rest) {
                    let mut buf = [0u8; 4];
                    stripped.replace(i, i + len, decoded.encode_utf8(&mut buf));
                    i += len;
                    continue;
                }
            }

            stripped.keep(i, i + c.len_utf8());
            i += c.len_utf8();
        }

        (stripped.output, stripped.transformations)
    }

    fn name(&self) -> &'static str {
        "html_strip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_inline_tags() {
        let filter = HtmlStripCharFilter::new();
        let (output, transformations) = filter.filter("<b>bold</b> move");
        assert_eq!(output, "bold move");
        assert_eq!(transformations.len(), 2);
        assert_eq!(transformations[0].original_start, 0);
        assert_eq!(transformations[0].original_end, 3);
        assert_eq!(transformations[0].new_start, 0);
        assert_eq!(transformations[0].new_end, 0);
    }

    #[test]
    fn test_block_tags_separate_words() {
        let filter = HtmlStripCharFilter::new();
        let (output, _) = filter.filter("<p>one</p><p>two</p>");
        assert_eq!(output, "\none\n\ntwo\n");
    }

    #[test]
    fn test_script_and_comment_removed() {
        let filter = HtmlStripCharFilter::new();
        let (output, _) =
            filter.filter("a<script type=\"x\">var x = '<b>';</SCRIPT>b<!-- note -->c");
        assert_eq!(output, "abc");
    }

    #[test]
    fn test_entities_decoded() {
        let filter = HtmlStripCharFilter::new();
        let (output, _) = filter.filter("fish &amp; chips &#169; &#x41; &bogus;");
        assert_eq!(output, "fish & chips \u{00A9} A &bogus;");
    }

    #[test]
    fn test_escaped_tags_kept() {
        let filter = HtmlStripCharFilter::with_escaped_tags(&["b"]);
        let (output, _) = filter.filter("<b>bold</b> <i>italic</i>");
        assert_eq!(output, "<b>bold</b> italic");
    }

    #[test]
    fn test_quoted_angle_bracket_in_attribute() {
        let filter = HtmlStripCharFilter::new();
        let (output, _) = filter.filter("<a title=\"x > y\">link</a>");
        assert_eq!(output, "link");
    }

    #[test]
    fn test_lone_angle_bracket_kept() {
        let filter = HtmlStripCharFilter::new();
        let (output, transformations) = filter.filter("1 < 2");
        assert_eq!(output, "1 < 2");
        assert!(transformations.is_empty());
    }
}
