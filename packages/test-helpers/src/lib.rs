//! Testing helpers for the greedy proxy.
pub mod configuration;
