//! Console rendering, one block per sample.

use crate::model::Report;
use std::fmt::Write;

pub const PROMPT: &str = "Enter a formatted string (or 'quit' to exit):";
pub const SEPARATOR: &str = "----------------------------------------";
pub const LOOP_SEPARATOR: &str = "========================================";

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Input: '{}'", report.input);
    let _ = writeln!(out, "{SEPARATOR}");

    if report.is_empty() {
        let _ = writeln!(out, "No format specifications found");
        return out;
    }

    for candidate in &report.candidates {
        let _ = writeln!(out, "{:8} → {}", candidate.kind.label(), candidate.expression);
        let _ = writeln!(
            out,
            "           (e.g., {} = {})",
            report.placeholder, candidate.example
        );
        out.push('\n');
    }
    out
}
