pub mod json;
pub mod text;

use crate::error::SwarmError;
use crate::types::report::{OptimizationReport, RangesReport};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(report: &OptimizationReport, format: OutputFormat) -> Result<String, SwarmError> {
    match format {
        OutputFormat::Text => Ok(text::to_text(report)),
        OutputFormat::Json => json::to_json(report).map_err(SwarmError::Json),
    }
}

pub fn render_ranges(report: &RangesReport, format: OutputFormat) -> Result<String, SwarmError> {
    match format {
        OutputFormat::Text => Ok(text::ranges_to_text(report)),
        OutputFormat::Json => json::ranges_to_json(report).map_err(SwarmError::Json),
    }
}
