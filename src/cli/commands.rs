//! Command implementations for the tokenscope CLI.

use std::fs;

use anyhow::Context;
use log::debug;

use crate::analysis::analyzer::language::{LANGUAGE_HELP, LANGUAGES};
use crate::analysis::analyzer::preset::{
    ANALYZER_HELP, AnalysisRequest, AnalyzerKind, OPERATOR_HELP, TOKENIZER_HELP,
};
use crate::analysis::token_filter::TOKEN_FILTER_TYPES;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, TokenscopeError};

/// Execute a CLI command.
pub fn execute_command(args: TokenscopeArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => match analyze_args.listed() {
            Some(target) => output_result(&option_list(target), &args),
            None => analyze_text(analyze_args, &args),
        },
        Command::List(list_args) => output_result(&option_list(list_args.target), &args),
    }
}

/// Analyze the given text and print the terms.
fn analyze_text(args: &AnalyzeArgs, cli_args: &TokenscopeArgs) -> Result<()> {
    let request = analysis_request(args)?;
    let text = input_text(args)?;
    debug!("Analyzing {} bytes with {:?}", text.len(), request);

    let report = request.run(&text)?;
    output_result(&report, cli_args)
}

/// Build the request from command line options.
pub fn analysis_request(args: &AnalyzeArgs) -> Result<AnalysisRequest> {
    Ok(AnalysisRequest {
        analyzer: args.analyzer.parse()?,
        language: args.language.clone(),
        operator: args.operator.parse()?,
        tokenizer: args.tokenizer.parse()?,
        min_gram: args.min_gram,
        max_gram: args.max_gram,
        definition: args.definition.clone(),
        name: args.name.clone(),
    })
}

fn input_text(args: &AnalyzeArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    let path = args
        .file
        .as_ref()
        .ok_or_else(|| TokenscopeError::validation("Text to analyze is required (-t or -f)"))?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Unable to read text file {}", path.display()))?;
    Ok(text)
}

/// The valid values of `target`.
pub fn option_list(target: ListTarget) -> OptionList {
    let (help, values): (String, Vec<String>) = match target {
        ListTarget::Analyzers => (
            ANALYZER_HELP.to_string(),
            AnalyzerKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
        ),
        ListTarget::Languages => (
            LANGUAGE_HELP.clone(),
            LANGUAGES.iter().map(|l| l.code.to_string()).collect(),
        ),
        ListTarget::Operators => (
            OPERATOR_HELP.to_string(),
            vec!["autocomplete".to_string(), "text".to_string()],
        ),
        ListTarget::Tokenizers => (
            TOKENIZER_HELP.to_string(),
            vec!["edgeGram".to_string(), "nGram".to_string()],
        ),
        ListTarget::Filters => {
            let values: Vec<String> = TOKEN_FILTER_TYPES.iter().map(|t| t.to_string()).collect();
            (
                format!("Filter type must be one of [{}]", values.join(", ")),
                values,
            )
        }
    };

    OptionList {
        target,
        help,
        values,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::analysis::analyzer::preset::Operator;

    fn analyze_args(argv: &[&str]) -> AnalyzeArgs {
        let mut full = vec!["tokenscope", "analyze"];
        full.extend_from_slice(argv);
        match TokenscopeArgs::try_parse_from(full).unwrap().command {
            Command::Analyze(args) => args,
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_request_from_args() {
        let args = analyze_args(&["-a", "Whitespace", "-o", "Autocomplete", "-k", "edgeGram"]);
        let request = analysis_request(&args).unwrap();
        assert_eq!(request.analyzer, AnalyzerKind::Whitespace);
        assert_eq!(request.operator, Operator::Autocomplete);
        assert_eq!(request.min_gram, 2);

        let args = analyze_args(&["-a", "fancy"]);
        let err = analysis_request(&args).unwrap_err();
        assert!(err.is_lookup());
        assert!(err.to_string().contains(ANALYZER_HELP));
    }

    #[test]
    fn test_input_text_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "Hello World")?;

        let path = file.path().to_string_lossy().to_string();
        let args = analyze_args(&["-f", &path]);
        assert_eq!(input_text(&args)?, "Hello World");
        Ok(())
    }

    #[test]
    fn test_input_text_errors() {
        let err = input_text(&analyze_args(&[])).unwrap_err();
        assert!(err.is_validation());

        let err = input_text(&analyze_args(&["-f", "/nonexistent/input.txt"])).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/input.txt"));
    }

    #[test]
    fn test_option_lists() {
        let languages = option_list(ListTarget::Languages);
        assert_eq!(languages.values.len(), 37);
        assert!(languages.help.starts_with("Language code must be one of [ar, bg"));

        let analyzers = option_list(ListTarget::Analyzers);
        assert_eq!(analyzers.values[0], "standard");
        assert_eq!(analyzers.to_string(), ANALYZER_HELP);

        let filters = option_list(ListTarget::Filters);
        assert!(filters.values.contains(&"daitchMokotoffSoundex".to_string()));
    }
}
