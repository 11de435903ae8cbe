//! Browser side of the poem page: the button marking a poem as favorite.
//!
//! The toggle logic works against the small [`dom`] abstraction so it runs
//! the same on the page (see `web`, wasm32 only) and on an in-memory document.

pub mod client;
pub mod components;
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use client::{FavoriteClient, HttpFavoriteClient};
pub use components::{FavoriteToggle, ToggleOutcome, ToggleSelectors};
