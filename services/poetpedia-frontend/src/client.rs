//! Sending favorite toggles to the server.
use async_trait::async_trait;
use poetpedia_common::PoemFavoriteRequest;
use reqwest::{Client, Url};
use std::fmt;

/// Posts a favorite request to the URL found in the page.
///
/// Futures are not `Send`: in the browser they run on the page's event loop.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait FavoriteClient {
    /// Succeeds when the server answered with a 2xx status. The body is not read.
    async fn post_favorite(&self, url: &str, request: &PoemFavoriteRequest) -> Result<(), Error>;
}

#[derive(Debug)]
pub enum Error {
    /// The action URL could not be turned into an absolute URL.
    Url {
        context: String,
        source: String,
    },
    Configuration {
        context: String,
        source: reqwest::Error,
    },
    /// No response, or the request could not be sent.
    Request {
        context: String,
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    Status {
        context: String,
        source: reqwest::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Url { context, source } => {
                write!(fmt, "Invalid URL: {context} | {source}")
            }
            Error::Configuration { context, source } => {
                write!(fmt, "Client Configuration: {context} | {source}")
            }
            Error::Request { context, source } => {
                write!(fmt, "Request: {context} | {source}")
            }
            Error::Status { context, source } => {
                write!(fmt, "Response Status: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Favorite client backed by reqwest (the browser's fetch on wasm32).
#[derive(Debug, Clone)]
pub struct HttpFavoriteClient {
    http_client: Client,
    // Relative form actions are resolved against this URL, usually the page URL.
    base_url: Option<Url>,
}

impl HttpFavoriteClient {
    pub fn new(base_url: Option<&str>) -> Result<Self, Error> {
        let base_url = base_url
            .map(|url| {
                Url::parse(url).map_err(|err| Error::Url {
                    context: format!("Could not parse base url {url}"),
                    source: err.to_string(),
                })
            })
            .transpose()?;
        let http_client = Client::builder().build().map_err(|err| Error::Configuration {
            context: "Could not build http client".to_string(),
            source: err,
        })?;
        Ok(HttpFavoriteClient {
            http_client,
            base_url,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_timeout(base_url: Option<&str>, timeout: std::time::Duration) -> Result<Self, Error> {
        let mut client = Self::new(base_url)?;
        client.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| Error::Configuration {
                context: "Could not build http client".to_string(),
                source: err,
            })?;
        Ok(client)
    }

    fn resolve(&self, action: &str) -> Result<Url, Error> {
        let url = match &self.base_url {
            Some(base) => base.join(action),
            None => Url::parse(action),
        };
        url.map_err(|err| Error::Url {
            context: format!("Could not resolve form action {action}"),
            source: err.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl FavoriteClient for HttpFavoriteClient {
    async fn post_favorite(&self, url: &str, request: &PoemFavoriteRequest) -> Result<(), Error> {
        let url = self.resolve(url)?;

        tracing::debug!(%url, id = %request.id, "posting favorite");

        self.http_client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| Error::Request {
                context: format!("Could not post favorite to {url}"),
                source: err,
            })?
            .error_for_status()
            .map_err(|err| Error::Status {
                context: format!("Favorite rejected by {url}"),
                source: err,
            })?;

        Ok(())
    }
}
