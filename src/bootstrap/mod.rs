//! Proxy application bootstrapping.
//!
//! This module includes all the functions to build the application, its dependencies, and run the jobs.
//!
//! Jobs are tasks executed concurrently. The proxy server is always running,
//! the entity cleanup and the version check run depending on the configuration.
pub mod app;
pub mod config;
pub mod jobs;
pub mod logging;
