//! Command line argument parsing for the tokenscope CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// The value that makes an option print its valid choices.
pub const LIST_OPTION: &str = "list";

/// Tokenscope - inspect the tokens a search analyzer produces
#[derive(Parser, Debug, Clone)]
#[command(name = "tokenscope")]
#[command(about = "Inspect the tokens produced by search analyzers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TokenscopeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TokenscopeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze text and print the resulting terms
    Analyze(AnalyzeArgs),

    /// List the valid values of an option
    List(ListArgs),
}

/// Arguments for analyzing text.
///
/// Option values are passed through as strings so that `list` can be given
/// in place of any of them.
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Analyzer: standard, simple, whitespace, language, keyword or custom
    #[arg(short = 'a', long, default_value = "standard")]
    pub analyzer: String,

    /// Language code for the language analyzer, e.g. en or lucene.english
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Operator: text or autocomplete
    #[arg(short = 'o', long, default_value = "text")]
    pub operator: String,

    /// Autocomplete tokenizer: edgeGram or nGram
    #[arg(short = 'k', long, default_value = "nGram")]
    pub tokenizer: String,

    /// Autocomplete minimum gram size
    #[arg(short = 'm', long, default_value = "2", allow_negative_numbers = true)]
    pub min_gram: i64,

    /// Autocomplete maximum gram size
    #[arg(short = 'x', long, default_value = "3", allow_negative_numbers = true)]
    pub max_gram: i64,

    /// Text to analyze
    #[arg(short = 't', long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File whose contents are analyzed
    #[arg(short = 'f', long, value_name = "TEXT_FILE")]
    pub file: Option<PathBuf>,

    /// Index definition file (JSON) holding custom analyzers
    #[arg(short = 'd', long, value_name = "DEFINITION_FILE")]
    pub definition: Option<PathBuf>,

    /// Name of the custom analyzer in the index definition
    #[arg(short = 'n', long)]
    pub name: Option<String>,
}

impl AnalyzeArgs {
    /// The first option whose value is `list`, if any.
    pub fn listed(&self) -> Option<ListTarget> {
        let is_list = |value: &str| value.eq_ignore_ascii_case(LIST_OPTION);

        if is_list(&self.analyzer) {
            Some(ListTarget::Analyzers)
        } else if self.language.as_deref().is_some_and(is_list) {
            Some(ListTarget::Languages)
        } else if is_list(&self.operator) {
            Some(ListTarget::Operators)
        } else if is_list(&self.tokenizer) {
            Some(ListTarget::Tokenizers)
        } else {
            None
        }
    }
}

/// Arguments for listing valid option values
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// What to list
    #[arg(value_name = "TARGET")]
    pub target: ListTarget,
}

/// Option sets that can be listed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListTarget {
    /// Analyzer kinds
    Analyzers,
    /// Language codes
    Languages,
    /// Query operators
    Operators,
    /// Autocomplete tokenizers
    Tokenizers,
    /// Token filter types accepted in index definitions
    Filters,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_analyze_command() {
        let args = TokenscopeArgs::try_parse_from([
            "tokenscope",
            "analyze",
            "-a",
            "language",
            "-l",
            "en",
            "-t",
            "The quick fox",
        ])
        .unwrap();

        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.analyzer, "language");
            assert_eq!(analyze_args.language.as_deref(), Some("en"));
            assert_eq!(analyze_args.text.as_deref(), Some("The quick fox"));
            assert_eq!(analyze_args.min_gram, 2);
            assert_eq!(analyze_args.max_gram, 3);
            assert_eq!(analyze_args.listed(), None);
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_custom_analyzer_flags() {
        let args = TokenscopeArgs::try_parse_from([
            "tokenscope",
            "analyze",
            "-a",
            "custom",
            "-d",
            "index.json",
            "-n",
            "a1",
            "-f",
            "input.txt",
        ])
        .unwrap();

        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.definition, Some(PathBuf::from("index.json")));
            assert_eq!(analyze_args.name.as_deref(), Some("a1"));
            assert_eq!(analyze_args.file, Some(PathBuf::from("input.txt")));
        } else {
            panic!("Expected Analyze command");
        }
        assert!(matches!(args.output_format, OutputFormat::Human));
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = TokenscopeArgs::try_parse_from([
            "tokenscope",
            "analyze",
            "-t",
            "text",
            "-f",
            "input.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_grams_parse() {
        let args = TokenscopeArgs::try_parse_from([
            "tokenscope",
            "analyze",
            "-o",
            "autocomplete",
            "-m",
            "-1",
            "-t",
            "cat",
        ])
        .unwrap();

        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.min_gram, -1);
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_list_option_value() {
        let args =
            TokenscopeArgs::try_parse_from(["tokenscope", "analyze", "-l", "list"]).unwrap();

        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.listed(), Some(ListTarget::Languages));
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = TokenscopeArgs::try_parse_from(["tokenscope", "list", "filters"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args =
            TokenscopeArgs::try_parse_from(["tokenscope", "-vv", "list", "filters"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Quiet flag
        let args =
            TokenscopeArgs::try_parse_from(["tokenscope", "--quiet", "list", "filters"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            TokenscopeArgs::try_parse_from(["tokenscope", "--format", "json", "list", "languages"])
                .unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
        assert!(matches!(
            args.command,
            Command::List(ListArgs {
                target: ListTarget::Languages
            })
        ));
    }
}
