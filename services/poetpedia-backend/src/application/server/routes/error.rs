use axum::extract::Json;
use axum::http::status::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};
use std::fmt;

use crate::domain::ports::secondary::{FavoriteError, PoetryError};
use common::err_context::ErrorContext;

#[serde_as]
#[derive(Debug, Serialize)]
pub enum Error {
    InvalidRequest {
        context: String,
        source: String,
    },
    Favorites {
        context: String,
        source: FavoriteError,
    },
    Poetry {
        context: String,
        source: PoetryError,
    },
    Template {
        context: String,
        #[serde_as(as = "DisplayFromStr")]
        source: askama::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRequest { context, source } => {
                write!(fmt, "Invalid Request: {context} | {source}")
            }
            Error::Favorites { context, source } => {
                write!(fmt, "Favorites: {context} | {source}")
            }
            Error::Poetry { context, source } => {
                write!(fmt, "Poetry: {context} | {source}")
            }
            Error::Template { context, source } => {
                write!(fmt, "Template: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request failed");
        self.standardize().into_response()
    }
}

impl From<ErrorContext<String>> for Error {
    fn from(err: ErrorContext<String>) -> Self {
        Error::InvalidRequest {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<FavoriteError>> for Error {
    fn from(err: ErrorContext<FavoriteError>) -> Self {
        Error::Favorites {
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

impl From<ErrorContext<askama::Error>> for Error {
    fn from(err: ErrorContext<askama::Error>) -> Self {
        Error::Template {
            context: err.0,
            source: err.1,
        }
    }
}

impl Error {
    pub fn standardize(&self) -> (StatusCode, Json<Value>) {
        match self {
            Error::InvalidRequest { context, source } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": format!("{context}: {source}"),
                    "code": "favorite/invalid_request"
                })),
            ),
            Error::Favorites { context, source: _ } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": context,
                    "code": "favorite/storage"
                })),
            ),
            Error::Poetry { context, source: _ } => (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": context,
                    "code": "poetry/unavailable"
                })),
            ),
            Error::Template { context, source: _ } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "fail",
                    "message": context,
                    "code": "page/template"
                })),
            ),
        }
    }
}
