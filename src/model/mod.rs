//! Report model: candidates of one sample paired with illustrative values.

use crate::analysis::Engine;
use crate::datetime::FormatDetector;
use crate::spec::{SampleValue, ValueKind, render_with, unwrap_placeholder};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub kind: ValueKind,
    /// Full expression, literals included.
    pub expression: String,
    /// Text between `:` and `}`; empty for a bare placeholder.
    pub spec: String,
    pub example: SampleValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub input: String,
    pub placeholder: String,
    pub candidates: Vec<CandidateView>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Analyze `sample` and pair each candidate with a synthesized example.
pub fn build_report<D: FormatDetector>(engine: &Engine<D>, sample: &str, placeholder: &str) -> Report {
    let candidates = engine
        .analyze(sample)
        .into_iter()
        .map(|candidate| {
            let expression = render_with(&candidate.spec, placeholder);
            let bare = render_with(&candidate.spec.clone().wrapped("", ""), placeholder);
            let spec = unwrap_placeholder(&bare, placeholder)
                .map(|(_, inner, _)| inner.to_string())
                .unwrap_or_default();
            CandidateView {
                kind: candidate.kind,
                expression,
                spec,
                example: engine.synthesize(sample, candidate.kind),
            }
        })
        .collect();

    Report {
        input: sample.to_string(),
        placeholder: placeholder.to_string(),
        candidates,
    }
}
