use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Public URL of the server, used to build absolute links.
    pub base_url: String,
    /// Directory served for any path not matched by a route.
    /// Relative paths are resolved against the backend crate's directory.
    pub static_dir: String,
}

/// Access to the PoetryDB API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoetrySettings {
    pub url: String,
    /// Request timeout, in seconds.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JaegerSettings {
    pub endpoint: String,
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingSettings {
    /// Default filter directive, overridden by RUST_LOG.
    pub level: String,
    pub jaeger: Option<JaegerSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub poetry: PoetrySettings,
    pub tracing: TracingSettings,
    pub mode: String,
}
