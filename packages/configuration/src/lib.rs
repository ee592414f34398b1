//! Configuration data structures for the [Greedy Proxy](https://docs.rs/greedy-proxy).
//!
//! The current version for configuration is [`v1`].
pub mod v1;
pub mod validator;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use greedy_proxy_located_error::{DynError, LocatedError};
use thiserror::Error;

/// Default timeout for the request forwarded to the real tracker.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Prefix for env vars that overwrite configuration options.
const CONFIG_OVERRIDE_PREFIX: &str = "GREEDY_PROXY_CONFIG_OVERRIDE_";

/// Path separator in env var names for nested values in configuration.
const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

// Environment variables

/// The whole `proxy.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
const ENV_VAR_CONFIG_TOML: &str = "GREEDY_PROXY_CONFIG_TOML";

/// The `proxy.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "GREEDY_PROXY_CONFIG_TOML_PATH";

pub type Configuration = v1::Configuration;
pub type Core = v1::core::Core;
pub type Proxy = v1::proxy::Proxy;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;
pub type Cleanup = v1::cleanup::Cleanup;
pub type VersionCheck = v1::version_check::VersionCheck;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Info for a configuration given inline as a TOML document.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: String::new(),
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to process the configuration: bad syntax or wrong value types.
    #[error("Failed processing the configuration: {source}")]
    ConfigError {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    /// The configuration was parsed but it's semantically wrong.
    #[error("Invalid configuration: {source}")]
    Invalid { source: validator::SemanticValidationError },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

impl From<validator::SemanticValidationError> for Error {
    fn from(source: validator::SemanticValidationError) -> Self {
        Self::Invalid { source }
    }
}
