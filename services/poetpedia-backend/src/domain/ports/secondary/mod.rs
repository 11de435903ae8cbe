pub mod favorite_storage;
pub mod poetry_service;

pub use favorite_storage::{Error as FavoriteError, FavoriteStorage};
pub use poetry_service::{Error as PoetryError, PoetryService};

#[cfg(test)]
pub use favorite_storage::MockFavoriteStorage;

#[cfg(test)]
pub use poetry_service::MockPoetryService;
