use crate::Result;
use anyhow::Context;
use serde::Serialize;

/// Pretty-printed JSON for a report or a list of reports.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize report as JSON")
}
