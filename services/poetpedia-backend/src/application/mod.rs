//! The application definition, and its creation from settings.
//!
//! ```ignore
//! let app = ApplicationBuilder::new(settings)?.build()?;
//! app.run_until_stopped().await?;
//! ```
mod error;
mod listener;
pub mod opts;
pub mod server;

pub use self::error::Error;

use common::err_context::ErrorContextExt;
use common::settings::{ApplicationSettings, PoetrySettings, Settings};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use self::listener::listen_with_host_port;
use self::server::{AppState, ApplicationBaseUrl, DynFavorites, DynPoetry};
use crate::services::memory::MemoryFavoriteStorage;
use crate::services::poetrydb::PoetryDbClient;

pub struct Application {
    port: u16,
    server: server::AppServer,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }
}

#[derive(Default)]
pub struct ApplicationBuilder {
    pub poetry: Option<DynPoetry>,
    pub favorites: Option<DynFavorites>,
    pub listener: Option<TcpListener>,
    pub url: Option<String>,
    pub static_dir: Option<PathBuf>,
}

impl ApplicationBuilder {
    pub fn new(settings: Settings) -> Result<Self, Error> {
        let Settings {
            application,
            poetry,
            tracing: _,
            mode: _,
        } = settings;
        let builder = Self::default()
            .poetry(poetry)?
            .favorites(Arc::new(MemoryFavoriteStorage::new()))
            .listener(application.clone())?
            .url(application.base_url)
            .static_dir(application.static_dir)?;

        Ok(builder)
    }

    pub fn poetry(mut self, settings: PoetrySettings) -> Result<Self, Error> {
        let client = PoetryDbClient::new(settings).context("Building the PoetryDB client")?;
        self.poetry = Some(Arc::new(client));
        Ok(self)
    }

    pub fn favorites(mut self, favorites: DynFavorites) -> Self {
        self.favorites = Some(favorites);
        self
    }

    pub fn listener(mut self, settings: ApplicationSettings) -> Result<Self, Error> {
        let listener =
            listen_with_host_port(settings.host.as_str(), settings.port).context(format!(
                "Could not create listener for {}:{}",
                settings.host, settings.port
            ))?;
        self.listener = Some(listener);
        Ok(self)
    }

    pub fn url(mut self, url: String) -> Self {
        self.url = Some(url);
        self
    }

    /// Relative directories are taken from the backend crate's directory.
    pub fn static_dir(mut self, static_dir: String) -> Result<Self, Error> {
        let path = PathBuf::from(&static_dir);
        let path = if path.is_absolute() {
            path
        } else {
            let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            root.push(&path);
            root
        };
        let path = path
            .canonicalize()
            .context(format!("Could not canonicalize static dir {static_dir}"))?;
        self.static_dir = Some(path);
        Ok(self)
    }

    pub fn build(self) -> Result<Application, Error> {
        let ApplicationBuilder {
            poetry,
            favorites,
            listener,
            url,
            static_dir,
        } = self;
        let missing = |component: &str| Error::Incomplete {
            context: format!("no {component} given"),
        };
        let listener = listener.ok_or_else(|| missing("listener"))?;
        let port = listener
            .local_addr()
            .context("Could not get listener local address")?
            .port();
        let state = AppState {
            poetry: poetry.ok_or_else(|| missing("poetry service"))?,
            favorites: favorites.ok_or_else(|| missing("favorite storage"))?,
            base_url: ApplicationBaseUrl(url.ok_or_else(|| missing("base url"))?),
        };
        let static_dir = static_dir.ok_or_else(|| missing("static dir"))?;
        let server = server::new(listener, state, static_dir).context("Could not build server")?;
        Ok(Application { port, server })
    }
}

impl Application {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), Error> {
        tracing::info!(port = self.port, "PoetPedia listening");
        self.server
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server execution error")?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_should_fail_without_components() {
        let outcome = Application::builder().build();
        assert!(matches!(outcome, Err(Error::Incomplete { .. })));
    }

    #[test]
    fn static_dir_should_fail_when_missing() {
        let outcome = Application::builder().static_dir("no/such/dir".to_string());
        assert!(matches!(outcome, Err(Error::Path { .. })));
    }
}
