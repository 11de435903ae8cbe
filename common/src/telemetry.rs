use opentelemetry::{
    global,
    sdk::{propagation::TraceContextPropagator, trace},
    trace::TraceError,
};
use std::fmt;
use tracing::error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{fmt as tracing_fmt, layer::SubscriberExt, EnvFilter};

use crate::err_context::ErrorContext;
use crate::settings::TracingSettings;

#[derive(Debug)]
pub enum Error {
    Subscriber {
        context: String,
        source: SetGlobalDefaultError,
    },
    Exporter {
        context: String,
        source: TraceError,
    },
    ErrorHandler {
        context: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Subscriber { context, source } => {
                write!(fmt, "Tracing Subscriber: {context} | {source}")
            }
            Error::Exporter { context, source } => {
                write!(fmt, "Trace Exporter: {context} | {source}")
            }
            Error::ErrorHandler { context } => {
                write!(fmt, "OpenTelemetry Error Handler: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<SetGlobalDefaultError>> for Error {
    fn from(err: ErrorContext<SetGlobalDefaultError>) -> Self {
        Error::Subscriber {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<TraceError>> for Error {
    fn from(err: ErrorContext<TraceError>) -> Self {
        Error::Exporter {
            context: err.0,
            source: err.1,
        }
    }
}

/// Initialize tracing: apply an `EnvFilter` using the `RUST_LOG` environment variable to define the
/// log levels (falling back on the configured level), add a formatter layer writing to stdout and,
/// when a Jaeger agent is configured, an OpenTelemetry layer exporting trace data.
pub fn init_tracing(settings: TracingSettings) -> Result<(), Error> {
    use crate::err_context::ErrorContextExt;

    let TracingSettings { level, jaeger } = settings;

    global::set_text_map_propagator(TraceContextPropagator::new());

    global::set_error_handler(|error| error!(error = format!("{error:#}"), "otel error"))
        .map_err(|err| Error::ErrorHandler {
            context: format!("Could not set error handler: {err}"),
        })?;

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::Registry::default()
        .with(filter_layer)
        .with(tracing_fmt::Layer::new().with_writer(std::io::stdout));

    if let Some(jaeger) = jaeger {
        let tracer = jaeger_tracer(&jaeger.endpoint, &jaeger.service_name)
            .context(format!("Could not install jaeger pipeline for {}", jaeger.endpoint))?;
        let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);
        tracing::subscriber::set_global_default(subscriber.with(telemetry))
            .context("Could not set global subscriber")?;
    } else {
        tracing::subscriber::set_global_default(subscriber)
            .context("Could not set global subscriber")?;
    }
    Ok(())
}

fn jaeger_tracer(endpoint: &str, service_name: &str) -> Result<trace::Tracer, TraceError> {
    opentelemetry_jaeger::new_agent_pipeline()
        .with_endpoint(endpoint)
        .with_service_name(service_name)
        .install_simple()
}
