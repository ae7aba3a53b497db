//! Renderers for the aggregated result list.
//!
//! The colorized console renderer lives in [`crate::cli::output`]; this
//! module holds the renderers that produce a plain string.

mod html;

pub use html::render_html;

use crate::report::RunSummary;

/// Serializes the summary as pretty-printed JSON.
pub fn render_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
