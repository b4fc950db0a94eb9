//! Spec layer: the structured description of a substitution expression and
//! its rendering.
//!
//! This module is intentionally separate from shape detection. It owns:
//! - StructuredSpec and its field enums
//! - the builder that turns a StructuredSpec into expression text

pub mod format;
pub mod render;

pub use format::{
    Align, Grouping, Layout, SampleValue, SignMode, StructuredSpec, TypeIndicator, ValueKind,
};
pub use render::{DEFAULT_PLACEHOLDER, render, render_with, unwrap_placeholder};
