//! Daitch–Mokotoff soundex filter.
//!
//! Each token is encoded into one or more six-digit phonetic codes. Letter
//! groups with more than one plausible pronunciation branch the encoding, so
//! a single name may produce several codes.
//!
//! # Examples
//!
//! ```
//! use tokenscope::analysis::token_filter::daitch_mokotoff::DaitchMokotoffSoundex;
//!
//! assert_eq!(DaitchMokotoffSoundex::encode("Moskowitz"), vec!["645740"]);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Filter;
use super::ascii_folding::fold_to_ascii;
use crate::analysis::token::{Token, TokenStream, TokenType, reposition};
use crate::error::Result;

/// Length of every code.
pub const CODE_LENGTH: usize = 6;

/// `(pattern, at start of word, before a vowel, anywhere else)`.
///
/// Alternatives are separated by `|`.
const RULES: &[(&str, &str, &str, &str)] = &[
    // Vowels
    ("a", "0", "", ""),
    ("e", "0", "", ""),
    ("i", "0", "", ""),
    ("o", "0", "", ""),
    ("u", "0", "", ""),
    ("ai", "0", "1", ""),
    ("aj", "0", "1", ""),
    ("au", "0", "7", ""),
    ("ay", "0", "1", ""),
    ("ei", "0", "1", ""),
    ("ej", "0", "1", ""),
    ("eu", "1", "1", ""),
    ("ey", "0", "1", ""),
    ("ia", "1", "", ""),
    ("ie", "1", "", ""),
    ("io", "1", "", ""),
    ("iu", "1", "", ""),
    ("oi", "0", "1", ""),
    ("oj", "0", "1", ""),
    ("oy", "0", "1", ""),
    ("ue", "0", "", ""),
    ("ui", "0", "1", ""),
    ("uj", "0", "1", ""),
    ("uy", "0", "1", ""),
    ("y", "1", "", ""),
    // Consonants
    ("b", "7", "7", "7"),
    ("c", "5|4", "5|4", "5|4"),
    ("ch", "5|4", "5|4", "5|4"),
    ("chs", "5", "54", "54"),
    ("ck", "5|45", "5|45", "5|45"),
    ("cs", "4", "4", "4"),
    ("csz", "4", "4", "4"),
    ("cz", "4", "4", "4"),
    ("czs", "4", "4", "4"),
    ("d", "3", "3", "3"),
    ("drs", "4", "4", "4"),
    ("drz", "4", "4", "4"),
    ("ds", "4", "4", "4"),
    ("dsh", "4", "4", "4"),
    ("dsz", "4", "4", "4"),
    ("dt", "3", "3", "3"),
    ("dz", "4", "4", "4"),
    ("dzh", "4", "4", "4"),
    ("dzs", "4", "4", "4"),
    ("f", "7", "7", "7"),
    ("fb", "7", "7", "7"),
    ("g", "5", "5", "5"),
    ("h", "5", "5", ""),
    ("j", "1|4", "|4", "|4"),
    ("k", "5", "5", "5"),
    ("kh", "5", "5", "5"),
    ("ks", "5", "54", "54"),
    ("l", "8", "8", "8"),
    ("m", "6", "6", "6"),
    ("mn", "66", "66", "66"),
    ("n", "6", "6", "6"),
    ("nm", "66", "66", "66"),
    ("p", "7", "7", "7"),
    ("pf", "7", "7", "7"),
    ("ph", "7", "7", "7"),
    ("q", "5", "5", "5"),
    ("r", "9", "9", "9"),
    ("rs", "94|4", "94|4", "94|4"),
    ("rz", "94|4", "94|4", "94|4"),
    ("s", "4", "4", "4"),
    ("sch", "4", "4", "4"),
    ("schd", "2", "43", "43"),
    ("scht", "2", "43", "43"),
    ("schtch", "2", "4", "4"),
    ("schtsch", "2", "4", "4"),
    ("schtsh", "2", "4", "4"),
    ("sd", "2", "43", "43"),
    ("sh", "4", "4", "4"),
    ("shch", "2", "4", "4"),
    ("shd", "2", "43", "43"),
    ("sht", "2", "43", "43"),
    ("shtch", "2", "4", "4"),
    ("shtsh", "2", "4", "4"),
    ("st", "2", "43", "43"),
    ("stch", "2", "4", "4"),
    ("strs", "2", "4", "4"),
    ("strz", "2", "4", "4"),
    ("stsch", "2", "4", "4"),
    ("stsh", "2", "4", "4"),
    ("sz", "4", "4", "4"),
    ("szcz", "2", "4", "4"),
    ("szd", "2", "43", "43"),
    ("szt", "2", "43", "43"),
    ("t", "3", "3", "3"),
    ("tc", "4", "4", "4"),
    ("tch", "4", "4", "4"),
    ("th", "3", "3", "3"),
    ("trs", "4", "4", "4"),
    ("trz", "4", "4", "4"),
    ("ts", "4", "4", "4"),
    ("tsch", "4", "4", "4"),
    ("tsh", "4", "4", "4"),
    ("tsz", "4", "4", "4"),
    ("ttch", "4", "4", "4"),
    ("tts", "4", "4", "4"),
    ("ttsch", "4", "4", "4"),
    ("ttsz", "4", "4", "4"),
    ("ttz", "4", "4", "4"),
    ("tz", "4", "4", "4"),
    ("tzs", "4", "4", "4"),
    ("v", "7", "7", "7"),
    ("w", "7", "7", "7"),
    ("x", "5", "54", "54"),
    ("z", "4", "4", "4"),
    ("zd", "2", "43", "43"),
    ("zdzh", "2", "4", "4"),
    ("zh", "4", "4", "4"),
    ("zhd", "2", "43", "43"),
    ("zhdzh", "2", "4", "4"),
    ("zs", "4", "4", "4"),
    ("zsch", "4", "4", "4"),
    ("zsh", "4", "4", "4"),
    // Romanian t-cedilla and t-comma
    ("ţ", "3|4", "3|4", "3|4"),
    ("ț", "3|4", "3|4", "3|4"),
    // Polish nasal vowels
    ("ą", "", "", "|6"),
    ("ę", "", "", "|6"),
];

/// Letters with their own rules, exempt from diacritic folding.
const UNFOLDED: &[char] = &['ţ', 'ț', 'ą', 'ę'];

struct Rule {
    pattern: Vec<char>,
    at_start: Vec<&'static str>,
    before_vowel: Vec<&'static str>,
    otherwise: Vec<&'static str>,
}

impl Rule {
    fn matches(&self, context: &[char]) -> bool {
        context.starts_with(&self.pattern)
    }

    fn replacements(&self, context: &[char], at_start: bool) -> &[&'static str] {
        if at_start {
            return &self.at_start;
        }
        let next_is_vowel = context
            .get(self.pattern.len())
            .is_some_and(|&c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if next_is_vowel {
            &self.before_vowel
        } else {
            &self.otherwise
        }
    }
}

/// Rules keyed by their first character, longest pattern first.
static RULES_BY_FIRST_CHAR: LazyLock<HashMap<char, Vec<Rule>>> = LazyLock::new(|| {
    let mut rules: HashMap<char, Vec<Rule>> = HashMap::new();
    for &(pattern, at_start, before_vowel, otherwise) in RULES {
        let chars: Vec<char> = pattern.chars().collect();
        let Some(&first) = chars.first() else {
            continue;
        };
        rules.entry(first).or_default().push(Rule {
            pattern: chars,
            at_start: at_start.split('|').collect(),
            before_vowel: before_vowel.split('|').collect(),
            otherwise: otherwise.split('|').collect(),
        });
    }
    for group in rules.values_mut() {
        group.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
    }
    rules
});

#[derive(Clone, Debug, Default)]
struct Branch {
    code: String,
    last_replacement: Option<&'static str>,
}

impl Branch {
    fn push(&mut self, replacement: &'static str, force: bool) {
        let repeated = self
            .last_replacement
            .is_some_and(|last| last.ends_with(replacement));
        if (!repeated || force) && self.code.len() < CODE_LENGTH {
            self.code.push_str(replacement);
            self.code.truncate(CODE_LENGTH);
        }
        self.last_replacement = Some(replacement);
    }

    fn finish(mut self) -> String {
        while self.code.len() < CODE_LENGTH {
            self.code.push('0');
        }
        self.code
    }
}

/// The Daitch–Mokotoff soundex encoder.
pub struct DaitchMokotoffSoundex;

impl DaitchMokotoffSoundex {
    fn cleanup(input: &str) -> Vec<char> {
        let mut cleaned = Vec::with_capacity(input.len());
        for c in input.chars().filter(|c| !c.is_whitespace()) {
            for lower in c.to_lowercase() {
                if UNFOLDED.contains(&lower) {
                    cleaned.push(lower);
                } else {
                    let mut buf = [0u8; 4];
                    cleaned.extend(fold_to_ascii(lower.encode_utf8(&mut buf)).chars());
                }
            }
        }
        cleaned
    }

    /// Encode `input` into all of its alternative codes, in branch order
    /// and without duplicates.
    pub fn encode(input: &str) -> Vec<String> {
        let input = Self::cleanup(input);
        let mut branches = vec![Branch::default()];
        let mut last_char = None;
        let mut index = 0;

        while index < input.len() {
            let c = input[index];
            let context = &input[index..];
            let rule = RULES_BY_FIRST_CHAR
                .get(&c)
                .and_then(|rules| rules.iter().find(|rule| rule.matches(context)));

            if let Some(rule) = rule {
                let replacements = rule.replacements(context, last_char.is_none());
                let force = matches!((last_char, c), (Some('m'), 'n') | (Some('n'), 'm'));

                let mut next_branches: Vec<Branch> = Vec::new();
                for branch in &branches {
                    for &replacement in replacements {
                        let mut next = branch.clone();
                        next.push(replacement, force);
                        if !next_branches.iter().any(|b| b.code == next.code) {
                            next_branches.push(next);
                        }
                    }
                }
                branches = next_branches;
                index += rule.pattern.len();
            } else {
                index += 1;
            }

            last_char = Some(c);
        }

        let mut codes: Vec<String> = Vec::with_capacity(branches.len());
        for code in branches.into_iter().map(Branch::finish) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }
}

/// A filter that adds (or substitutes) the Daitch–Mokotoff codes of every token.
///
/// With `inject` enabled the original token is kept and its codes are
/// stacked on the same position after it.
#[derive(Clone, Debug)]
pub struct DaitchMokotoffSoundexFilter {
    inject: bool,
}

impl DaitchMokotoffSoundexFilter {
    pub fn new() -> Self {
        Self { inject: true }
    }

    pub fn inject(mut self, inject: bool) -> Self {
        self.inject = inject;
        self
    }
}

impl Default for DaitchMokotoffSoundexFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for DaitchMokotoffSoundexFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut output = Vec::new();

        for token in tokens {
            if token.is_empty() {
                output.push(token);
                continue;
            }

            let codes: Vec<Token> = DaitchMokotoffSoundex::encode(&token.text)
                .into_iter()
                .map(|code| {
                    token
                        .with_text(code)
                        .with_token_type(TokenType::Phonetic)
                        .with_position_increment(0)
                })
                .collect();

            let increment = token.position_increment;
            if self.inject {
                output.push(token);
                output.extend(codes);
            } else {
                output.extend(codes.into_iter().enumerate().map(|(i, code)| {
                    if i == 0 {
                        code.with_position_increment(increment)
                    } else {
                        code
                    }
                }));
            }
        }

        Ok(Box::new(reposition(output).into_iter()))
    }

    fn name(&self) -> &'static str {
        "daitch_mokotoff_soundex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut codes: Vec<String>) -> Vec<String> {
        codes.sort();
        codes
    }

    #[test]
    fn test_single_code() {
        assert_eq!(DaitchMokotoffSoundex::encode("Moskowitz"), vec!["645740"]);
        assert_eq!(DaitchMokotoffSoundex::encode("Peters"), vec!["739400", "734000"]);
    }

    #[test]
    fn test_branching() {
        assert_eq!(
            sorted(DaitchMokotoffSoundex::encode("Auerbach")),
            vec!["097400", "097500"]
        );
    }

    #[test]
    fn test_case_whitespace_and_diacritics() {
        assert_eq!(
            DaitchMokotoffSoundex::encode("MOS KOWITZ"),
            DaitchMokotoffSoundex::encode("moskowitz")
        );
        assert_eq!(
            DaitchMokotoffSoundex::encode("Müller"),
            DaitchMokotoffSoundex::encode("Muller")
        );
    }

    #[test]
    fn test_adjacent_codes_collapse() {
        // "tt" codes once, "mn" codes as a pair
        assert_eq!(DaitchMokotoffSoundex::encode("Otto"), vec!["030000"]);
        assert_eq!(DaitchMokotoffSoundex::encode("Lemnon"), vec!["866600"]);
    }

    #[test]
    fn test_filter_injects_original() {
        let filter = DaitchMokotoffSoundexFilter::new();
        let tokens = vec![Token::new("Otto", 0), Token::new("Moskowitz", 1)];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Otto", "030000", "Moskowitz", "645740"]);
        assert_eq!(result[1].position, 0);
        assert_eq!(result[1].token_type, Some(TokenType::Phonetic));
        assert_eq!(result[2].position, 1);
    }

    #[test]
    fn test_filter_without_inject() {
        let filter = DaitchMokotoffSoundexFilter::new().inject(false);
        let tokens = vec![Token::new("Auerbach", 0), Token::new("Otto", 1)];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].position, 0);
        assert_eq!(result[1].position, 0);
        assert_eq!(result[2].text, "030000");
        assert_eq!(result[2].position, 1);
    }
}
