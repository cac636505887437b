//! HTML and document rendering for estimates.
//!
//! Generates the proposal document sent for e-signature, extracts its body
//! and styles for embedding, places captured signatures into it, and
//! converts Markdown to HTML and to Atlassian Document Format for Jira.

pub mod adf;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod signature;
pub mod template;

pub use error::RenderError;
pub use template::{BusinessInfo, TemplateClient, TemplateInput, TemplateItem};
