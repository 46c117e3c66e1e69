//! Wire and domain entity structs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a result item.
///
/// The remote endpoint hands out numeric ids; locally duplicated rows get
/// synthesized string ids so both shapes coexist in one list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Num(u64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Num(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        ItemId::Num(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Text(value)
    }
}

/// One search hit as returned by the user search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: ItemId,
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    /// Account classification, e.g. `User` or `Organization`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub score: f64,
}

impl UserRecord {
    /// Copy of this record carrying a different identifier.
    pub fn with_id(&self, id: ItemId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

/// Success body of the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<UserRecord>,
}

/// Error body of the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
