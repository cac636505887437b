//! `jobsuite render` — proposal generation from a JSON bundle.

use std::path::Path;

use anyhow::Context as _;
use jobsuite_core::{ContractorClient, Estimate, EstimateLineItem, EstimateResource, Signature};
use jobsuite_render::{TemplateInput, extract, signature};
use serde::Deserialize;

use crate::cli::RenderAction;
use crate::context::AppContext;

/// Everything the proposal needs, as exported by the backend's detail
/// endpoint or assembled by hand.
#[derive(Debug, Deserialize)]
struct RenderBundle {
    estimate: Estimate,
    client: ContractorClient,
    #[serde(default)]
    line_items: Vec<EstimateLineItem>,
    #[serde(default)]
    resources: Vec<EstimateResource>,
    #[serde(default)]
    signatures: Vec<Signature>,
}

pub fn handle(action: &RenderAction, ctx: &AppContext) -> anyhow::Result<()> {
    let RenderAction::Estimate { input, out, embed } = action;
    let html = render(input, *embed, ctx.config.backend.is_production())?;
    write_output(out.as_deref(), &html)
}

fn render(input: &Path, embed: bool, production: bool) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let bundle: RenderBundle =
        serde_json::from_str(&raw).context("input is not a valid render bundle")?;

    let template = TemplateInput::from_records(
        &bundle.estimate,
        &bundle.client,
        &bundle.line_items,
        &bundle.resources,
        production,
    );
    let mut html = jobsuite_render::template::generate(&template);
    if !bundle.signatures.is_empty() {
        html = signature::place(&html, &bundle.signatures);
    }
    if embed {
        html = extract::embeddable(&html)?;
    }
    Ok(html)
}

fn write_output(out: Option<&Path>, html: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_renders_to_a_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bundle.json");
        std::fs::write(
            &path,
            serde_json::json!({
                "estimate": {"id": "7f3a-1", "status": "ESTIMATE_SENT"},
                "client": {"id": "cl-1", "name": "Acme Painting"},
                "line_items": [
                    {"id": "li-1", "estimate_id": "7f3a-1", "title": "Deck",
                     "description": "Sand and stain", "hours": 16.0, "rate": 75.0}
                ],
            })
            .to_string(),
        )
        .expect("write bundle");

        let html = render(&path, false, false).expect("render");
        assert!(html.contains("Acme Painting"));
        assert!(html.contains("Deck"));
        assert!(html.contains("#7f3a"));

        let fragment = render(&path, true, false).expect("render embed");
        assert!(fragment.contains("body-wrapper"));
        assert!(!fragment.contains("<html"));
    }
}
