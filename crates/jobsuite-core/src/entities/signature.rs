use serde::{Deserialize, Serialize};

use crate::enums::SignatureType;

/// A captured e-signature. `signature_data` is a base64 PNG, with or without
/// the `data:image/png;base64,` prefix; the render layer normalizes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signature {
    pub signature_type: SignatureType,
    pub signature_data: String,
    #[serde(default)]
    pub signer_name: Option<String>,
    #[serde(default)]
    pub is_valid: Option<bool>,
}

impl Signature {
    /// Invalidated signatures are skipped during placement; missing flags
    /// count as valid.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.is_valid != Some(false)
    }
}
