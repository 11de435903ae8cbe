mod error;
pub mod favorite;
pub mod health;
pub mod pages;
pub mod static_dir;

use super::AppState;
use axum::routing::{get, post, Router};
use poetpedia_common::FAVORITE_PATH;

pub use self::error::Error;
use self::{
    favorite::{favorites, toggle_favorite},
    health::health,
    pages::{author, home, poem, welcome},
};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/welcome", get(welcome))
        .route("/author/:name", get(author))
        .route("/poem/:title", get(poem))
        .route("/api/health", get(health))
        .route(FAVORITE_PATH, post(toggle_favorite))
        .route("/api/poems/favorites", get(favorites))
        .with_state(state)
}
