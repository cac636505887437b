//! Signature placement into `<signature-field>` tags.
//!
//! String-level substitution: each field's inner content is replaced with an
//! `<img>` of the matching signature. Fields with no matching valid
//! signature are left exactly as they were.

use jobsuite_core::{Signature, SignatureType};

const OPEN_TAG: &str = "<signature-field";
const CLOSE_TAG: &str = "</signature-field>";

/// Map a template role attribute onto the stored signature type.
#[must_use]
pub fn role_to_type(role: &str) -> Option<SignatureType> {
    match role {
        "Service Provider" => Some(SignatureType::Contractor),
        "Property Owner" => Some(SignatureType::Client),
        _ => None,
    }
}

/// Place signatures into every matching field of `html`.
#[must_use]
pub fn place(html: &str, signatures: &[Signature]) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find(OPEN_TAG) {
        let Some(tag_end) = rest[open..].find('>').map(|i| open + i + 1) else {
            break;
        };
        let Some(close) = rest[tag_end..].find(CLOSE_TAG).map(|i| tag_end + i) else {
            break;
        };

        out.push_str(&rest[..tag_end]);
        let inner = &rest[tag_end..close];
        let tag = &rest[open..tag_end];

        match attribute(tag, "role")
            .and_then(|role| role_to_type(&role))
            .and_then(|wanted| find_signature(signatures, wanted))
        {
            Some(signature) => out.push_str(&signature_img(signature)),
            None => out.push_str(inner),
        }

        out.push_str(CLOSE_TAG);
        rest = &rest[close + CLOSE_TAG.len()..];
    }

    out.push_str(rest);
    out
}

fn find_signature(signatures: &[Signature], wanted: SignatureType) -> Option<&Signature> {
    signatures
        .iter()
        .find(|s| s.signature_type == wanted && s.is_usable() && !s.signature_data.is_empty())
}

fn signature_img(signature: &Signature) -> String {
    let src = if signature.signature_data.starts_with("data:") {
        signature.signature_data.clone()
    } else {
        format!("data:image/png;base64,{}", signature.signature_data)
    };
    let alt = signature.signer_name.as_deref().unwrap_or("Signature");
    format!(
        r#"<img src="{src}" alt="{alt}" style="width: 100%; height: auto; max-height: 80px; object-fit: contain; display: block;" />"#
    )
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let marker = format!("{name}=\"");
    let start = tag.find(&marker)? + marker.len();
    let end = tag[start..].find('"')? + start;
    Some(tag[start..end].to_string())
}
