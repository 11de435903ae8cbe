pub mod favorite;
pub mod poem;
pub mod ports;
pub mod search;

pub use favorite::{FavoriteChange, FavoritePoem};
pub use poem::{AuthorSummary, Poem, PoemSummary};
pub use search::SearchCriteria;
