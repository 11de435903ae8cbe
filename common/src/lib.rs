pub mod config;
pub mod err_context;
pub mod settings;
pub mod telemetry;
