use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::domain::{FavoriteChange, FavoritePoem, Poem};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteStorage {
    /// Returns the record of a poem, identified by title and author,
    /// creating it (not favorite) the first time the poem is seen.
    async fn register(&self, poem: &Poem) -> Result<FavoritePoem, Error>;

    /// Flips the favorite flag of the poem, and returns the updated record.
    ///
    /// The poem is looked up by id, then by title and author. An unknown
    /// poem is stored as a favorite under the requested id.
    async fn toggle(&self, change: &FavoriteChange) -> Result<FavoritePoem, Error>;

    /// Poems currently marked favorite, in insertion order.
    async fn favorites(&self) -> Result<Vec<FavoritePoem>, Error>;
}

#[derive(Debug, Serialize)]
pub enum Error {
    /// Data cannot be stored as is.
    Validation { context: String },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation { context } => {
                write!(fmt, "Favorite Data: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}
