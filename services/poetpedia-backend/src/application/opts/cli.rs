use std::path::PathBuf;

use common::config;
use common::settings::Settings;

use super::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration sub directories, merged in this order.
pub const CONFIG_SUB_DIRS: [&str; 2] = ["service", "poetry"];

/// Prefix of the environment variables overriding settings, eg.
/// `POETPEDIA__APPLICATION__PORT=8080`.
pub const ENV_PREFIX: &str = "POETPEDIA";

#[derive(Debug, Clone, clap::Parser)]
#[clap(
    name = "poetpedia",
    about = "Browse poems from PoetryDB and keep favorites",
    version = VERSION,
    )]
pub struct Opts {
    /// Defines the config directory
    ///
    #[arg(value_parser = clap::value_parser!(PathBuf), short = 'c', long = "config-dir")]
    pub config_dir: PathBuf,

    /// Defines the run mode in {testing, dev, prod, ...}
    ///
    /// If no run mode is provided, a default behavior will be used.
    #[arg(short = 'm', long = "run-mode")]
    pub run_mode: Option<String>,

    /// Override settings values using key=value
    #[arg(short = 's', long = "setting")]
    pub settings: Vec<String>,

    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Run the server
    Run,
    /// Print the merged configuration
    Config,
}

impl TryFrom<Opts> for Settings {
    type Error = Error;

    fn try_from(opts: Opts) -> Result<Self, Self::Error> {
        config::merge_configuration(
            opts.config_dir.as_ref(),
            &CONFIG_SUB_DIRS,
            opts.run_mode.as_deref(),
            ENV_PREFIX,
            opts.settings,
        )
        .map_err(|err| Error::Merging {
            context: "PoetPedia Settings: Could not merge configuration".to_string(),
            source: err,
        })?
        .try_deserialize()
        .map_err(|err| Error::Deserializing {
            context: "PoetPedia Settings: Could not deserialize configuration".to_string(),
            source: err,
        })
    }
}
