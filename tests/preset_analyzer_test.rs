use tokenscope::analysis::analyzer::language::LANGUAGES;
use tokenscope::analysis::analyzer::preset::{
    AnalysisRequest, AnalyzerKind, GramTokenizerKind, Operator, PRESET_NAMES,
    autocomplete_pipeline, language_pipeline, preset_pipeline,
};
use tokenscope::analysis::pipeline::analyze;
use tokenscope::analysis::token::render_terms;
use tokenscope::analysis::tokenizer::ngram::{MAX_GRAM_HELP, MIN_GRAM_HELP};
use tokenscope::error::Result;

fn rendered(request: &AnalysisRequest, text: &str) -> Result<String> {
    Ok(request.run(text)?.render_terms())
}

#[test]
fn test_every_preset_renders_empty_input() -> Result<()> {
    for name in PRESET_NAMES {
        let terms: Vec<_> = analyze(&preset_pipeline(name)?, "")?.collect();
        assert_eq!(render_terms(&terms), "[]", "{name}");
    }
    for language in LANGUAGES {
        let terms: Vec<_> = analyze(&language_pipeline(language.code)?, "")?.collect();
        assert_eq!(render_terms(&terms), "[]", "{}", language.code);
    }
    Ok(())
}

#[test]
fn test_analysis_is_deterministic() -> Result<()> {
    let text = "The Quick brown foxes jumped over 2 lazy dogs, https://example.com";
    for name in ["standard", "simple", "whitespace", "keyword", "en", "de", "ja"] {
        let pipeline = preset_pipeline(name)?;
        let first: Vec<_> = analyze(&pipeline, text)?.collect();
        let second: Vec<_> = analyze(&pipeline, text)?.collect();
        assert_eq!(first, second, "{name}");
    }
    Ok(())
}

#[test]
fn test_standard_report() -> Result<()> {
    let report = AnalysisRequest::default().run("Hello, World!")?;
    assert_eq!(report.analyzer, "lucene.standard");
    assert_eq!(report.to_string(), "Using lucene.standard\n[hello] [world]");
    Ok(())
}

#[test]
fn test_language_request() -> Result<()> {
    let request = AnalysisRequest {
        analyzer: AnalyzerKind::Language,
        language: Some("en".to_string()),
        ..AnalysisRequest::default()
    };
    let report = request.run("The dogs chased cats")?;
    assert_eq!(report.analyzer, "lucene.english");
    assert_eq!(report.render_terms(), "[dog] [chase] [cat]");

    let request = AnalysisRequest {
        analyzer: AnalyzerKind::Language,
        language: Some("xx".to_string()),
        ..AnalysisRequest::default()
    };
    let err = request.run("text").unwrap_err();
    assert!(err.is_lookup());
    assert!(err.to_string().contains("Language code must be one of [ar,"));
    Ok(())
}

#[test]
fn test_autocomplete_edge_gram() -> Result<()> {
    let request = AnalysisRequest {
        operator: Operator::Autocomplete,
        tokenizer: GramTokenizerKind::EdgeGram,
        min_gram: 2,
        max_gram: 3,
        ..AnalysisRequest::default()
    };
    let report = request.run("cat")?;
    assert_eq!(report.render_terms(), "[ca] [cat]");
    assert_eq!(
        report.to_string(),
        "Using autocomplete\nAutocomplete - edgeNGram, minGram(2), maxGram(3)\n[ca] [cat]"
    );
    Ok(())
}

#[test]
fn test_autocomplete_ignores_analyzer_kind() -> Result<()> {
    let request = AnalysisRequest {
        analyzer: AnalyzerKind::Keyword,
        operator: Operator::Autocomplete,
        ..AnalysisRequest::default()
    };
    assert_eq!(rendered(&request, "dog")?, "[do] [dog] [og]");
    Ok(())
}

#[test]
fn test_autocomplete_gram_validation() {
    let err = autocomplete_pipeline(GramTokenizerKind::EdgeGram, 5, 2).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains(MAX_GRAM_HELP));

    let err = autocomplete_pipeline(GramTokenizerKind::NGram, 0, 2).unwrap_err();
    assert!(err.to_string().contains(MIN_GRAM_HELP));

    let err = autocomplete_pipeline(GramTokenizerKind::NGram, -4, 2).unwrap_err();
    assert!(err.to_string().contains(MIN_GRAM_HELP));

    let request = AnalysisRequest {
        operator: Operator::Autocomplete,
        min_gram: 5,
        max_gram: 2,
        ..AnalysisRequest::default()
    };
    assert!(request.build_pipeline().unwrap_err().is_validation());
}

#[test]
fn test_request_deserializes_from_json() -> Result<()> {
    let request: AnalysisRequest = serde_json::from_str(
        r#"{"analyzer": "Language", "language": "lucene.german", "operator": "text"}"#,
    )?;
    let report = request.run("Die Häuser und die Gärten")?;
    assert_eq!(report.analyzer, "lucene.german");
    let terms: Vec<&str> = report.terms.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(terms.first(), Some(&"haus"));
    assert!(!terms.contains(&"die"));
    assert!(!terms.contains(&"und"));
    Ok(())
}
