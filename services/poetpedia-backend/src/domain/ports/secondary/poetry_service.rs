/// Interface to a poetry catalog.
use async_trait::async_trait;
use common::err_context::ErrorContext;
use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};
use std::fmt;

use crate::domain::Poem;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoetryService {
    /// Poems whose title contains `title`.
    async fn poems_by_title(&self, title: &str) -> Result<Vec<Poem>, Error>;

    /// Poems whose author's name contains `author`.
    async fn poems_by_author(&self, author: &str) -> Result<Vec<Poem>, Error>;

    /// Poems with a line containing `lines`.
    async fn poems_by_lines(&self, lines: &str) -> Result<Vec<Poem>, Error>;
}

#[serde_as]
#[derive(Debug, Serialize)]
pub enum Error {
    /// No response from the catalog.
    Connection {
        context: String,
        #[serde_as(as = "DisplayFromStr")]
        source: reqwest::Error,
    },
    /// The catalog answered with an error status.
    Status {
        context: String,
        #[serde_as(as = "DisplayFromStr")]
        source: reqwest::Error,
    },
    /// The answer is not JSON, or not poems.
    Decoding {
        context: String,
        #[serde_as(as = "DisplayFromStr")]
        source: serde_json::Error,
    },
    /// JSON, but neither a list of poems nor a "not found" object.
    Unexpected {
        context: String,
    },
    Configuration {
        context: String,
    },
}

impl Error {
    /// The catalog answered, but not with anything usable.
    pub fn is_undecodable(&self) -> bool {
        matches!(self, Error::Decoding { .. } | Error::Unexpected { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Connection { context, source } => {
                write!(fmt, "Poetry Service Connection: {context} | {source}")
            }
            Error::Status { context, source } => {
                write!(fmt, "Poetry Service Status: {context} | {source}")
            }
            Error::Decoding { context, source } => {
                write!(fmt, "Poetry Service Answer: {context} | {source}")
            }
            Error::Unexpected { context } => {
                write!(fmt, "Poetry Service Answer: {context}")
            }
            Error::Configuration { context } => {
                write!(fmt, "Poetry Service Configuration: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<serde_json::Error>> for Error {
    fn from(err: ErrorContext<serde_json::Error>) -> Self {
        Error::Decoding {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<reqwest::Error>> for Error {
    fn from(err: ErrorContext<reqwest::Error>) -> Self {
        if err.1.is_status() {
            Error::Status {
                context: err.0,
                source: err.1,
            }
        } else {
            Error::Connection {
                context: err.0,
                source: err.1,
            }
        }
    }
}
