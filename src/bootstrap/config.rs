//! Initialize configuration from file or env var.
//!
//! All environment variables are prefixed with `GREEDY_PROXY_`.
use greedy_proxy_configuration::{Configuration, Info};

// Default values
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/proxy.toml";

/// It loads the application configuration from the environment.
///
/// There are two methods to inject the configuration:
///
/// 1. By using a config file: `proxy.toml`.
/// 2. Environment variable: `GREEDY_PROXY_CONFIG_TOML`. The variable contains the same contents as the `proxy.toml` file.
///
/// Environment variable has priority over the config file.
///
/// Refer to the [configuration documentation](https://docs.rs/greedy-proxy-configuration) for the configuration options.
///
/// # Panics
///
/// Will panic if it can't load the configuration from either
/// `./share/default/config/proxy.toml` file or the env var `GREEDY_PROXY_CONFIG_TOML`.
#[must_use]
pub fn initialize_configuration() -> Configuration {
    let info = Info::new(DEFAULT_PATH_CONFIG.to_string()).expect("it should be able to obtain the configuration info");

    match Configuration::load(&info) {
        Ok(configuration) => configuration,
        Err(err) => panic!("Unable to load the proxy configuration: {err}"),
    }
}
