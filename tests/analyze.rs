use fmtguess::{
    Engine, FormatDetector, FormatGuesser, SampleValue, ValueKind, analyze, build_report, synthesize,
    unwrap_placeholder,
};
use pretty_assertions::assert_eq;

fn expressions(sample: &str) -> Vec<(ValueKind, String)> {
    analyze(sample).into_iter().map(|c| (c.kind, c.text)).collect()
}

#[test]
fn readme_samples() {
    assert_eq!(
        expressions("0x00ff"),
        vec![(ValueKind::Int, "{variable:#06x}".to_string())]
    );
    assert_eq!(
        expressions("+3.5%"),
        vec![(ValueKind::Float, "{variable:+.1%}".to_string())]
    );
    assert_eq!(
        expressions("1_000_000"),
        vec![
            (ValueKind::Float, "{variable:_.0f}".to_string()),
            (ValueKind::Int, "{variable:_}".to_string()),
        ]
    );
}

#[test]
fn log_line_with_embedded_timestamp() {
    let out = expressions("Created: 2024-01-15 10:30 by admin");
    assert_eq!(
        out[0],
        (
            ValueKind::Datetime,
            "Created: {variable:%Y-%m-%d %H:%M} by admin".to_string()
        )
    );
    assert!(out.iter().all(|(kind, _)| *kind != ValueKind::Int));
}

#[test]
fn iso_timestamp_with_fraction() {
    assert_eq!(
        expressions("2024-01-15T10:30:00.123456"),
        vec![(ValueKind::Datetime, "{variable:%Y-%m-%dT%H:%M:%S.%f}".to_string())]
    );
}

#[test]
fn rendered_expressions_unwrap_to_their_parts() {
    for candidate in analyze("Total: 1,234.50 USD") {
        let (prefix, _, suffix) =
            unwrap_placeholder(&candidate.text, "variable").expect("placeholder present");
        assert_eq!(prefix, "Total: ");
        assert_eq!(suffix, " USD");
    }
}

#[test]
fn examples_match_candidate_kinds() {
    let report = build_report(&Engine::<FormatGuesser>::default(), "007", "variable");
    let examples: Vec<_> = report.candidates.iter().map(|c| c.example.clone()).collect();
    assert_eq!(examples[0], SampleValue::Int(7));
    assert_eq!(examples[1], SampleValue::Float(7.0));
    assert_eq!(examples[2].kind(), ValueKind::Datetime);
    for candidate in &report.candidates {
        assert_eq!(candidate.example.kind(), candidate.kind);
    }
}

#[test]
fn synthesize_is_independent_of_analysis() {
    assert_eq!(synthesize("***7***", ValueKind::Str), SampleValue::Str("7".to_string()));
    assert_eq!(synthesize("", ValueKind::Int), SampleValue::Int(0));
}

/// Detector that knows a single word.
struct Noon;

impl FormatDetector for Noon {
    fn detect_format(&self, text: &str) -> Option<String> {
        (text == "noon").then(|| "%H".to_string())
    }
}

#[test]
fn custom_detector_drives_the_datetime_path() {
    let engine = Engine::new(Noon);
    let out = engine.analyze("noon");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].text, "{variable:%H}");

    // The pattern does not parse "noon", so the example falls back.
    let report = build_report(&engine, "noon", "variable");
    assert_eq!(
        report.candidates[0].example.to_string(),
        "2030-01-24T05:45:13"
    );

    assert!(engine.analyze("2024-01-15").iter().all(|c| c.kind != ValueKind::Datetime));
}
