pub mod json;
pub mod md;
pub mod text;

use crate::error::ConfGateError;
use crate::types::result::ConfidenceResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Md,
    Json,
}

pub fn render(result: &ConfidenceResult, format: OutputFormat) -> Result<String, ConfGateError> {
    match format {
        OutputFormat::Text => Ok(text::to_text(result)),
        OutputFormat::Md => Ok(md::to_markdown(result)),
        OutputFormat::Json => json::to_json(result).map_err(ConfGateError::Json),
    }
}
