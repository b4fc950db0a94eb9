//! Infer format-specification expressions from formatted samples.
//!
//! Given text such as `"007"`, `"3.14%"` or `"Total: 1,234.50 USD"`, the engine
//! proposes ranked substitution expressions (`{variable:03d}`,
//! `{variable:.2%}`, `Total: {variable:,.2f} USD`) that would reproduce it,
//! each tagged with the kind of value it expects.

pub mod analysis;
pub mod datetime;
pub mod input;
pub mod model;
pub mod numeric;
pub mod patterns;
pub mod render;
pub mod spec;
pub mod synth;

pub type Result<T> = anyhow::Result<T>;

pub use analysis::{Candidate, Engine, analyze};
pub use datetime::{FormatDetector, FormatGuesser};
pub use model::{CandidateView, Report, build_report};
pub use spec::{
    DEFAULT_PLACEHOLDER, SampleValue, StructuredSpec, ValueKind, render_with, unwrap_placeholder,
};
pub use synth::synthesize;
