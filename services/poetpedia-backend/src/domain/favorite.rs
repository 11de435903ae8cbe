use poetpedia_common::{PoemFavoriteRequest, PoemId};
use serde::{Deserialize, Serialize};

/// A poem known to the favorite store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritePoem {
    pub id: PoemId,
    pub title: String,
    pub author: String,
    pub lines: String,
    pub favorite: bool,
}

/// A validated request to flip the favorite flag of a poem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteChange {
    pub id: PoemId,
    pub title: String,
    pub author: String,
    pub lines: String,
}

impl TryFrom<PoemFavoriteRequest> for FavoriteChange {
    type Error = String;

    fn try_from(request: PoemFavoriteRequest) -> Result<Self, Self::Error> {
        let PoemFavoriteRequest {
            title,
            author,
            lines,
            id,
        } = request;

        if id.is_empty() {
            return Err("poem id is empty".to_string());
        }

        let title = title.trim().to_string();
        if title.is_empty() {
            return Err("poem title is empty".to_string());
        }

        Ok(FavoriteChange {
            id,
            title,
            author: author.trim().to_string(),
            lines,
        })
    }
}
