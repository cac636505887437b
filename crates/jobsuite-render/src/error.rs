//! Render error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The generated document had no body content to extract.
    #[error("Failed to extract template content")]
    TemplateExtraction,
}
