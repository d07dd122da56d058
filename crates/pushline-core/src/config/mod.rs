//! Configuration schemas.
//!
//! Configuration is deserialized from TOML files and environment variables
//! via the `config` crate. Each sub-module is one configuration section.

pub mod client;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::client::ClientConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root configuration.
///
/// Top-level deserialization target for the merged configuration sources
/// (`config/default.toml`, an environment overlay, and `PUSHLINE__*`
/// environment variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Client connection settings.
    pub client: ClientConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default` with `config/{env}` (both optional) and
    /// environment variables such as `PUSHLINE__CLIENT__APP_KEY`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PUSHLINE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("client.channels")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
