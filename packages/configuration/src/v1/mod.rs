//! Version `1` for [Greedy Proxy](https://docs.rs/greedy-proxy) configuration
//! data structures.
//!
//! The configuration is loaded from a [TOML](https://toml.io/en/) file
//! `proxy.toml` or from the environment variable `GREEDY_PROXY_CONFIG_TOML`
//! with the same content as the file. Any option can be overridden with an
//! env var named after its path, for example:
//!
//! ```text
//! GREEDY_PROXY_CONFIG_OVERRIDE_CORE__RATIO_LIMIT=2.5
//! ```
//!
//! Every option has a default value, so an empty file is a valid
//! configuration.
//!
//! ## Sections
//!
//! - [`Logging`](crate::v1::logging::Logging)
//! - [`Proxy`](crate::v1::proxy::Proxy): listening address and upstream timeouts.
//! - [`Core`](crate::v1::core::Core): the reporting policy.
//! - [`Cleanup`](crate::v1::cleanup::Cleanup): eviction of idle torrents.
//! - [`VersionCheck`](crate::v1::version_check::VersionCheck)
//!
//! ## Default configuration
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [proxy]
//! bind_address = "0.0.0.0:3456"
//! upstream_timeout = 15
//! resolve_client_hostnames = true
//! hostname_lookup_timeout = 2
//!
//! [core]
//! max_upload_multiplier = 1.6
//! seeding_multiplier = 1.2
//! randomization_factor = 0.1
//! max_upload_rate = 10000000
//! ratio_limit = 3.0
//! cooldown_duration = 3600
//! ramp_up = 0
//!
//! [cleanup]
//! max_entity_idle = 0
//! interval = 600
//!
//! [version_check]
//! enabled = false
//! ```
pub mod cleanup;
pub mod core;
pub mod logging;
pub mod proxy;
pub mod version_check;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::cleanup::Cleanup;
use self::core::Core;
use self::logging::Logging;
use self::proxy::Proxy;
use self::version_check::VersionCheck;
use crate::validator::{SemanticValidationError, Validator};
use crate::{Error, Info, CONFIG_OVERRIDE_PREFIX, CONFIG_OVERRIDE_SEPARATOR};

/// Configuration for the proxy.
#[derive(Serialize, Deserialize, PartialEq, Debug, Default, Clone)]
pub struct Configuration {
    #[serde(default)]
    pub logging: Logging,

    #[serde(default)]
    pub proxy: Proxy,

    #[serde(default)]
    pub core: Core,

    #[serde(default)]
    pub cleanup: Cleanup,

    #[serde(default)]
    pub version_check: VersionCheck,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct. The whole
    /// configuration in toml format is included in the `info.config_toml`
    /// string when given, otherwise it's read from `info.config_toml_path`.
    ///
    /// Env vars with the `GREEDY_PROXY_CONFIG_OVERRIDE_` prefix take
    /// precedence over both.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration can't be parsed or it's not
    /// valid.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::string(config_toml))
        } else {
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::file(&info.config_toml_path))
        };

        let figment = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR));

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be encoded to TOML. It can't
    /// happen for the types used in the configuration.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }
}

impl Validator for Configuration {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        let multipliers = [
            ("max_upload_multiplier", self.core.max_upload_multiplier),
            ("seeding_multiplier", self.core.seeding_multiplier),
        ];

        for (option, value) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(SemanticValidationError::InvalidMultiplier { option, value });
            }
        }

        let r = self.core.randomization_factor;
        if !(0.0..1.0).contains(&r) {
            return Err(SemanticValidationError::InvalidRandomizationFactor { value: r });
        }

        if !self.core.ratio_limit.is_finite() || self.core.ratio_limit <= 0.0 {
            return Err(SemanticValidationError::InvalidRatioLimit {
                value: self.core.ratio_limit,
            });
        }

        // The rate is applied in bytes per second
        if let Some(value) = self.core.max_upload_rate.filter(|bits| *bits < 8) {
            return Err(SemanticValidationError::MaxUploadRateBelowOneByte { value });
        }

        if self.cleanup.is_enabled() && self.cleanup.interval == 0 {
            return Err(SemanticValidationError::ZeroCleanupInterval);
        }

        if self.version_check.enabled && self.version_check.url.is_none() {
            return Err(SemanticValidationError::MissingVersionCheckUrl);
        }

        Ok(())
    }
}
