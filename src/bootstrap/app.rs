//! Setup for the main proxy application.
//!
//! The [`setup`] only builds the application and its dependencies but it does not start the application.
//! In fact, there is no such thing as the main application process. When the application starts, the only thing it does is
//! starting a bunch of independent jobs. If you are looking for how things are started you should read [`app::start`](crate::app::start)
//! function documentation.
//!
//! Setup steps:
//!
//! 1. Load the global application configuration.
//! 2. Initialize static variables.
//! 3. Initialize logging.
//! 4. Initialize the domain ratio governor.
use std::sync::Arc;

use greedy_proxy_clock::static_time;
use greedy_proxy_configuration::Configuration;
use tracing::info;

use super::config::initialize_configuration;
use crate::bootstrap;
use crate::core::services::governor_factory;
use crate::core::RatioGovernor;

/// It loads the configuration from the environment and builds the main domain [`RatioGovernor`] struct.
#[must_use]
pub fn setup() -> (Configuration, Arc<RatioGovernor>) {
    let configuration = initialize_configuration();

    let governor = initialize_with_configuration(&configuration);

    info!("Configuration:\n{}", configuration.to_toml());

    info!(policy = ?governor.policy(), "Reporting policy");

    (configuration, governor)
}

/// It initializes the application with the given configuration.
///
/// The configuration may be obtained from the environment (via config file or env vars).
#[must_use]
pub fn initialize_with_configuration(configuration: &Configuration) -> Arc<RatioGovernor> {
    initialize_static();
    initialize_logging(configuration);
    initialize_governor(configuration)
}

/// It initializes the application static values.
///
/// These values are accessible throughout the entire application:
///
/// - The time when the application started.
pub fn initialize_static() {
    // Set the time of the proxy app starting
    lazy_static::initialize(&static_time::TIME_AT_APP_START);
}

/// It builds the domain ratio governor.
///
/// The governor is the domain layer service. It's the entrypoint to make requests to the domain layer.
/// It's used by other higher-level components like the proxy server.
#[must_use]
pub fn initialize_governor(config: &Configuration) -> Arc<RatioGovernor> {
    Arc::new(governor_factory(config))
}

/// It initializes the log threshold, format and channel.
///
/// See [the logging setup](crate::bootstrap::logging::setup) for more info about logging.
pub fn initialize_logging(config: &Configuration) {
    bootstrap::logging::setup(config);
}
