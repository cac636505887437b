//! Body/style extraction for embedding the generated document.

use crate::error::RenderError;

/// The content between the `<body …>` tag and `</body>`, trimmed.
///
/// # Errors
///
/// Returns [`RenderError::TemplateExtraction`] when no non-empty body
/// content is found.
pub fn body(html: &str) -> Result<String, RenderError> {
    let start = html.find("<body").ok_or(RenderError::TemplateExtraction)?;
    let tag_end = html[start..]
        .find('>')
        .map(|i| start + i + 1)
        .ok_or(RenderError::TemplateExtraction)?;
    let end = html[tag_end..]
        .find("</body>")
        .map(|i| tag_end + i)
        .ok_or(RenderError::TemplateExtraction)?;

    let content = html[tag_end..end].trim();
    if content.is_empty() {
        return Err(RenderError::TemplateExtraction);
    }
    Ok(content.to_string())
}

/// Contents of the first `<style>` block, or empty.
#[must_use]
pub fn styles(html: &str) -> String {
    let Some(start) = html.find("<style") else {
        return String::new();
    };
    let Some(tag_end) = html[start..].find('>').map(|i| start + i + 1) else {
        return String::new();
    };
    html[tag_end..]
        .find("</style>")
        .map(|i| html[tag_end..tag_end + i].to_string())
        .unwrap_or_default()
}

/// Body content wrapped for the styling context the styles expect.
///
/// # Errors
///
/// Returns [`RenderError::TemplateExtraction`] when no body content exists.
pub fn wrapped_body(html: &str) -> Result<String, RenderError> {
    Ok(format!(r#"<div class="body-wrapper">{}</div>"#, body(html)?))
}

/// Styles plus wrapped body, the form embedded in an existing page.
///
/// # Errors
///
/// Returns [`RenderError::TemplateExtraction`] when no body content exists.
pub fn embeddable(html: &str) -> Result<String, RenderError> {
    Ok(format!("<style>{}</style>{}", styles(html), wrapped_body(html)?))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DOC: &str = r#"<html><head><style>.x { color: red; }</style></head>
<body class="body-wrapper">
<p>Hello</p>
</body></html>"#;

    #[test]
    fn body_is_extracted_between_tags() {
        assert_eq!(body(DOC).expect("body"), "<p>Hello</p>");
    }

    #[test]
    fn styles_come_from_the_first_style_block() {
        assert_eq!(styles(DOC), ".x { color: red; }");
        assert_eq!(styles("<p>no styles</p>"), "");
    }

    #[test]
    fn embeddable_combines_styles_and_wrapped_body() {
        assert_eq!(
            embeddable(DOC).expect("embeddable"),
            r#"<style>.x { color: red; }</style><div class="body-wrapper"><p>Hello</p></div>"#
        );
    }

    #[test]
    fn missing_body_is_an_extraction_error() {
        let err = body("<html><head></head></html>").expect_err("no body");
        assert_eq!(err.to_string(), "Failed to extract template content");
    }

    #[test]
    fn empty_body_is_an_extraction_error() {
        assert!(body("<body>   </body>").is_err());
    }

    #[test]
    fn generated_template_round_trips() {
        let input = crate::template::TemplateInput {
            business: crate::template::BusinessInfo::default(),
            client: crate::template::TemplateClient::default(),
            items: Vec::new(),
            image: String::new(),
            notes: String::new(),
            discount_reason: None,
            discount_percentage: None,
            estimate_number: "42".into(),
        };
        let html = crate::template::generate(&input);
        let embedded = embeddable(&html).expect("embeddable");
        assert!(embedded.starts_with("<style>"));
        assert!(embedded.contains(r#"<div class="body-wrapper">"#));
        assert!(embedded.contains("Project Proposal"));
    }
}
