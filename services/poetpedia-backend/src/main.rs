use clap::Parser;
use std::fmt;

use common::err_context::{ErrorContext, ErrorContextExt};
use common::settings::Settings;
use common::telemetry;
use poetpedia::application::opts::{Command, Error as OptsError, Opts};
use poetpedia::application::{ApplicationBuilder, Error as ApplicationError};

#[derive(Debug)]
pub enum Error {
    Options {
        context: String,
        source: OptsError,
    },
    Application {
        context: String,
        source: ApplicationError,
    },
    Telemetry {
        context: String,
        source: telemetry::Error,
    },
    Serialization {
        context: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Application { context, source } => {
                write!(fmt, "Could not build application: {context} | {source}")
            }
            Error::Options { context, source } => {
                write!(fmt, "Options Error: {context} | {source}")
            }
            Error::Telemetry { context, source } => {
                write!(fmt, "Telemetry Error: {context} | {source}")
            }
            Error::Serialization { context, source } => {
                write!(fmt, "Serialization Error: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<ApplicationError>> for Error {
    fn from(err: ErrorContext<ApplicationError>) -> Self {
        Error::Application {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<OptsError>> for Error {
    fn from(err: ErrorContext<OptsError>) -> Self {
        Error::Options {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<telemetry::Error>> for Error {
    fn from(err: ErrorContext<telemetry::Error>) -> Self {
        Error::Telemetry {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<serde_json::Error>> for Error {
    fn from(err: ErrorContext<serde_json::Error>) -> Self {
        Error::Serialization {
            context: err.0,
            source: err.1,
        }
    }
}

#[allow(clippy::result_large_err)]
#[tokio::main]
async fn main() -> Result<(), Error> {
    let opts = Opts::parse();

    let cmd = opts.cmd.clone();

    let settings: Settings = opts.try_into().context("Compiling Application Settings")?;

    match cmd {
        Command::Config => {
            let config = serde_json::to_string_pretty(&settings)
                .context("Could not serialize settings")?;
            println!("{config}");
        }
        Command::Run => {
            telemetry::init_tracing(settings.tracing.clone())
                .context("Could not initialize tracing")?;
            let app = ApplicationBuilder::new(settings)
                .context("could not build application")?
                .build()
                .context("could not assemble application")?;
            app.run_until_stopped()
                .await
                .context("application runtime error")?;
        }
    }
    Ok(())
}
