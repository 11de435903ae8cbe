use common::err_context::ErrorContext;
use std::fmt;

use super::listener::Error as ListenerError;
use super::server::Error as ServerError;
use crate::domain::ports::secondary::PoetryError;

#[derive(Debug)]
pub enum Error {
    Listener {
        context: String,
        source: ListenerError,
    },
    Poetry {
        context: String,
        source: PoetryError,
    },
    Server {
        context: String,
        source: ServerError,
    },
    Runtime {
        context: String,
        source: hyper::Error,
    },
    Path {
        context: String,
        source: std::io::Error,
    },
    /// A component was not given to the builder.
    Incomplete {
        context: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Listener { context, source } => {
                write!(fmt, "Could not build TCP listener: {context} | {source}")
            }
            Error::Poetry { context, source } => {
                write!(fmt, "Poetry Service Error: {context} | {source}")
            }
            Error::Server { context, source } => {
                write!(fmt, "Application Server Error: {context} | {source}")
            }
            Error::Runtime { context, source } => {
                write!(fmt, "Application Runtime Error: {context} | {source}")
            }
            Error::Path { context, source } => {
                write!(fmt, "IO Error: {context} | {source}")
            }
            Error::Incomplete { context } => {
                write!(fmt, "Incomplete Application: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<ListenerError>> for Error {
    fn from(err: ErrorContext<ListenerError>) -> Self {
        Error::Listener {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<PoetryError>> for Error {
    fn from(err: ErrorContext<PoetryError>) -> Self {
        Error::Poetry {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<ServerError>> for Error {
    fn from(err: ErrorContext<ServerError>) -> Self {
        Error::Server {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<hyper::Error>> for Error {
    fn from(err: ErrorContext<hyper::Error>) -> Self {
        Error::Runtime {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<std::io::Error>> for Error {
    fn from(err: ErrorContext<std::io::Error>) -> Self {
        Error::Path {
            context: err.0,
            source: err.1,
        }
    }
}
