use crate::Result;
use anyhow::{Context, bail};
use std::fs;

/// One sample line from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub line: usize,
    pub text: String,
}

/// Read a batch file: one sample per line.
///
/// Blank lines and lines starting with `#` are skipped. Leading and trailing
/// spaces are part of the sample, since padding is something we detect.
///
/// Example:
/// # amounts
/// Total: 1,234.50 USD
///    42
pub fn parse_sample_file(path: &str) -> Result<Vec<Sample>> {
    let text = fs::read_to_string(path).with_context(|| format!("read sample file {}", path))?;
    parse_samples(&text).with_context(|| format!("parse sample file {}", path))
}

pub fn parse_samples(text: &str) -> Result<Vec<Sample>> {
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        // A lone '\r' at end of input survives `lines()`.
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if line.contains('\0') {
            bail!("sample at line {} contains a NUL byte", lno);
        }

        out.push(Sample {
            line: lno,
            text: line.to_string(),
        });
    }

    if out.is_empty() {
        bail!("no samples found");
    }
    Ok(out)
}
