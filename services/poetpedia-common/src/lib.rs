pub mod favorites;
pub mod page;

pub use favorites::{FavoriteResp, PoemFavoriteRequest, PoemId, FAVORITE_PATH};
