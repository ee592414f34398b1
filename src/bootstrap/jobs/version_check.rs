//! Job that checks once, at startup, if there is a newer release of the
//! proxy.
//!
//! The configured URL must answer with a JSON document carrying the
//! `tag_name` of the latest release, like the GitHub "latest release"
//! endpoint does:
//!
//! ```json
//! { "tag_name": "v0.7.0" }
//! ```
//!
//! The check never stops the proxy: any failure is logged as a warning.
use std::cmp::Ordering;
use std::time::Duration;

use anyhow::{anyhow, Context};
use greedy_proxy_configuration::VersionCheck;
use serde::Deserialize;
use tokio::task::JoinHandle;
use url::Url;

const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// The running version of the proxy.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Deserialize, Debug)]
struct LatestRelease {
    tag_name: String,
}

/// A `major.minor.patch` release number.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Release {
    major: u64,
    minor: u64,
    patch: u64,
}

impl std::str::FromStr for Release {
    type Err = anyhow::Error;

    /// Accepts an optional leading `v` and ignores any pre-release or build
    /// suffix: `v1.2.3-develop` is `1.2.3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let core = trimmed.split(['-', '+']).next().unwrap_or_default();

        let mut numbers = core.split('.').map(str::parse::<u64>);

        let mut next = |part: &str| -> anyhow::Result<u64> {
            numbers
                .next()
                .ok_or_else(|| anyhow!("missing {part} number in version `{s}`"))?
                .with_context(|| format!("invalid {part} number in version `{s}`"))
        };

        let release = Self {
            major: next("major")?,
            minor: next("minor")?,
            patch: next("patch")?,
        };

        if numbers.next().is_some() {
            return Err(anyhow!("too many numbers in version `{s}`"));
        }

        Ok(release)
    }
}

impl std::fmt::Display for Release {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// It starts the version check job if it's enabled.
#[must_use]
pub fn start_job(config: &VersionCheck) -> Option<JoinHandle<()>> {
    if !config.enabled {
        tracing::info!("Note: Not checking for new releases, version check not enabled in configuration.");
        return None;
    }

    let Some(url) = config.url.clone() else {
        tracing::warn!("Version check enabled without an URL, skipping it");
        return None;
    };

    Some(tokio::spawn(async move {
        match check(url).await {
            Ok(Ordering::Greater) => tracing::info!("You are running an unreleased version: {CURRENT_VERSION}"),
            Ok(Ordering::Equal) => tracing::info!("You are running the latest version: {CURRENT_VERSION}"),
            Ok(Ordering::Less) => tracing::warn!("There is a newer release than the running version: {CURRENT_VERSION}"),
            Err(err) => tracing::warn!("Unable to check for new releases: {err:#}"),
        }
    }))
}

/// Compares the running version against the latest release.
async fn check(url: Url) -> anyhow::Result<Ordering> {
    let client = reqwest::Client::builder()
        .timeout(VERSION_CHECK_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let latest: LatestRelease = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()?
        .json()
        .await
        .context("unexpected release document")?;

    tracing::debug!("Latest release: {}", latest.tag_name);

    compare(CURRENT_VERSION, &latest.tag_name)
}

/// Orders the `current` version against the `latest` one.
///
/// # Errors
///
/// Will return `Err` if any of the versions is not a `major.minor.patch`
/// release number.
pub fn compare(current: &str, latest: &str) -> anyhow::Result<Ordering> {
    let current: Release = current.parse()?;
    let latest: Release = latest.parse()?;

    Ok(current.cmp(&latest))
}
