//! Axum [`handlers`](axum#handlers) for the proxy.
pub mod proxy;
