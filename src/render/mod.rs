//! Output rendering for reports: console text and JSON.

pub mod json;
pub mod text;

pub use json::render_json;
pub use text::{LOOP_SEPARATOR, PROMPT, render_text};
