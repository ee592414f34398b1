//! **Greedy Proxy** is an HTTP proxy for `BitTorrent` clients that reports
//! to the trackers a better upload ratio than the real one.
//!
//! The torrent client is configured to use the proxy for its HTTP tracker
//! requests. For every announce request the proxy replaces the `uploaded`
//! param with a value derived from the bytes the client really downloaded,
//! then forwards the request to the tracker and relays its response back.
//!
//! # Table of contents
//!
//! - [Features](#features)
//! - [Reporting policy](#reporting-policy)
//! - [Configuration](#configuration)
//! - [Usage](#usage)
//! - [Components](#components)
//!
//! # Features
//!
//! - Rewrites only the `uploaded` param, keeping the rest of the query untouched.
//! - Forwards anything it can't parse without changes.
//! - Different multipliers while downloading and while seeding.
//! - Random jitter on the multiplier so the reported values don't look forged.
//! - Upload rate cap per torrent.
//! - Cooldown period reporting the real values once the global ratio gets too high.
//! - Optional ramp up of the multipliers after startup.
//! - Optional cleanup of idle torrents.
//!
//! # Reporting policy
//!
//! Refer to the [`core`] module for the details on how the reported value is
//! computed.
//!
//! # Configuration
//!
//! The proxy loads its configuration from a [TOML](https://toml.io/en/) file.
//! By default `./share/default/config/proxy.toml`. Refer to the
//! [configuration crate](https://docs.rs/greedy-proxy-configuration) for the
//! available options.
//!
//! # Usage
//!
//! ```text
//! cargo run
//! ```
//!
//! Then set the proxy as the HTTP proxy of your torrent client, for example
//! `http://127.0.0.1:3456`.
//!
//! # Components
//!
//! - [`core`]: the domain layer. The ratio governor decides the reported value.
//! - [`servers`]: the proxy server.
//! - [`bootstrap`] and [`app`]: the setup and the jobs of the application.
use greedy_proxy_clock::clock;

pub mod app;
pub mod bootstrap;
pub mod core;
pub mod servers;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
