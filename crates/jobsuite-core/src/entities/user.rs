use serde::{Deserialize, Serialize};

/// The authenticated account, as returned by the backend's `users/me`.
/// `contractor_id` scopes every other API call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub contractor_id: Option<String>,
}
