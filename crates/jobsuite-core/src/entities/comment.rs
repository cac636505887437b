use serde::{Deserialize, Serialize};

/// An append-only note on an estimate. Comments are never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SingleComment {
    pub id: String,
    #[serde(default)]
    pub estimate_id: Option<String>,
    #[serde(default)]
    pub commenter: Option<String>,
    #[serde(default)]
    pub comment_contents: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
