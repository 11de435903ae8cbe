use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of the endpoint receiving favorite toggles.
pub const FAVORITE_PATH: &str = "/api/poems/favorite";

/// Opaque poem identifier.
///
/// The page carries it as a string attribute, but clients may send it either
/// as a JSON string or a JSON number. Both forms deserialize to the same id,
/// so `"42"` and `42` designate the same poem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPoemId")]
pub struct PoemId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoemId {
    Number(i64),
    Text(String),
}

impl From<RawPoemId> for PoemId {
    fn from(raw: RawPoemId) -> Self {
        match raw {
            RawPoemId::Number(n) => PoemId(n.to_string()),
            RawPoemId::Text(s) => PoemId(s),
        }
    }
}

impl PoemId {
    pub fn new(id: impl Into<String>) -> Self {
        PoemId(id.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for PoemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<u64> for PoemId {
    fn from(id: u64) -> Self {
        PoemId(id.to_string())
    }
}

impl fmt::Display for PoemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the favorite button sends to the server on each click.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemFavoriteRequest {
    pub title: String,
    pub author: String,
    pub lines: String,
    pub id: PoemId,
}

/// Returned by the server once the favorite flag has been flipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteResp {
    pub id: PoemId,
    pub favorite: bool,
}
