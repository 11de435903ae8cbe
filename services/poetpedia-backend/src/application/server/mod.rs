//! The webserver specific details, in our case all (most?) the axum related code.
mod error;
pub mod routes;

pub use self::error::Error;

use axum::{
    routing::{IntoMakeService, Router},
    Server,
};
use common::err_context::ErrorContextExt;
use hyper::server::conn::AddrIncoming;
use std::path::PathBuf;
use std::{fmt, net::TcpListener};
use std::{fmt::Display, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::domain::ports::secondary::{FavoriteStorage, PoetryService};

pub fn new(listener: TcpListener, state: AppState, static_dir: PathBuf) -> Result<AppServer, Error> {
    tracing::info!("Serving static directory: {}", static_dir.display());

    let app = router(state, static_dir);

    let server = Server::from_tcp(listener)
        .context("Could not create server from listener")?
        .serve(app.into_make_service());

    Ok(server)
}

/// Every route of the application, static files as fallback.
pub fn router(state: AppState, static_dir: PathBuf) -> Router {
    Router::new()
        .merge(routes::routes(state))
        .fallback_service(routes::static_dir::static_dir(static_dir))
        .layer(TraceLayer::new_for_http())
}

pub type DynPoetry = Arc<dyn PoetryService + Send + Sync>;
pub type DynFavorites = Arc<dyn FavoriteStorage + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub poetry: DynPoetry,
    pub favorites: DynFavorites,
    pub base_url: ApplicationBaseUrl,
}

pub type AppServer = Server<AddrIncoming, IntoMakeService<Router>>;

/// Public URL of the server.
#[derive(Clone, Debug)]
pub struct ApplicationBaseUrl(pub String);

impl Display for ApplicationBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.trim_end_matches('/'))
    }
}
