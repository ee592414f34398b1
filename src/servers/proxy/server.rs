//! Module to handle the proxy server instances.
//!
//! The [`ProxyServer`] is a state machine: a stopped server owns a
//! [`Launcher`] and a running server owns the handles needed to halt it and
//! to get the launcher back.
use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::Handle;
use derive_more::Constructor;
use greedy_proxy_configuration::Proxy;
use thiserror::Error;
use tokio::sync::oneshot::{Receiver, Sender};
use tokio::task::JoinHandle;

use super::v1::routes::router;
use super::v1::Context;
use super::PROXY_LOG_TARGET;
use crate::bootstrap::jobs::Started;
use crate::core::RatioGovernor;
use crate::servers::logging::STARTED_ON;
use crate::servers::signals::{graceful_shutdown, Halted};

/// Error that can occur when starting or stopping the proxy server.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to bind to {addr}: {err}")]
    UnableToBind { addr: SocketAddr, err: std::io::Error },

    #[error("the proxy server task stopped before sending its address")]
    UnableToStart,

    #[error("the halt channel was already closed")]
    UnableToSendHaltingMessage,

    #[error("unable to join the proxy server task: {err}")]
    UnableToJoin { err: tokio::task::JoinError },
}

/// Launches the axum server that runs the proxy.
#[derive(Constructor, Debug)]
pub struct Launcher {
    pub bind_to: SocketAddr,
}

impl Launcher {
    fn bind(&self) -> Result<std::net::TcpListener, Error> {
        let listener = std::net::TcpListener::bind(self.bind_to).map_err(|err| Error::UnableToBind {
            addr: self.bind_to,
            err,
        })?;

        listener
            .set_nonblocking(true)
            .map_err(|err| Error::UnableToBind { addr: self.bind_to, err })?;

        Ok(listener)
    }

    /// It spawns the server task. The task returns the launcher back when the
    /// server halts.
    fn start(
        self,
        listener: std::net::TcpListener,
        context: Arc<Context>,
        tx_start: Sender<Started>,
        rx_halt: Receiver<Halted>,
    ) -> JoinHandle<Launcher> {
        tokio::spawn(async move {
            let address = match listener.local_addr() {
                Ok(address) => address,
                Err(err) => {
                    tracing::error!(target: PROXY_LOG_TARGET, bind_to = %self.bind_to, %err, "Unable to get the bound address");
                    return self;
                }
            };

            let handle = Handle::new();

            let cloned_handle = handle.clone();

            tokio::task::spawn(graceful_shutdown(
                cloned_handle,
                rx_halt,
                format!("Shutting down proxy server on socket address: {address}"),
            ));

            let app = router(context, address);

            let running = axum_server::from_tcp(listener)
                .handle(handle)
                .serve(app.into_make_service_with_connect_info::<SocketAddr>());

            tracing::info!(target: PROXY_LOG_TARGET, "{STARTED_ON}: http://{address}");

            if tx_start.send(Started { address }).is_err() {
                tracing::warn!(target: PROXY_LOG_TARGET, %address, "Nobody is waiting for the proxy server to start");
            }

            if let Err(err) = running.await {
                tracing::error!(target: PROXY_LOG_TARGET, %address, %err, "Proxy server stopped with an error");
            }

            self
        })
    }
}

/// A stopped proxy server.
#[allow(clippy::module_name_repetitions)]
pub type StoppedProxyServer = ProxyServer<Stopped>;

/// A running proxy server.
#[allow(clippy::module_name_repetitions)]
pub type RunningProxyServer = ProxyServer<Running>;

/// A proxy server controller.
///
/// It keeps the launcher, so the server can be started and stopped many
/// times on the same configured address.
#[allow(clippy::module_name_repetitions)]
pub struct ProxyServer<S> {
    /// The state of the server: `running` or `stopped`.
    pub state: S,
}

/// A stopped proxy server state.
pub struct Stopped {
    launcher: Launcher,
}

/// A running proxy server state.
pub struct Running {
    /// The address where the server is bound.
    pub binding: SocketAddr,
    pub halt_task: Sender<Halted>,
    pub task: JoinHandle<Launcher>,
}

impl ProxyServer<Stopped> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// It starts the server and returns a `ProxyServer` controller in
    /// `running` state.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the server can't bind to the configured address
    /// or the server task dies before reporting its address.
    pub async fn start(self, governor: Arc<RatioGovernor>, config: &Proxy) -> Result<ProxyServer<Running>, Error> {
        let context = Arc::new(Context::new(config, governor));

        let listener = self.state.launcher.bind()?;

        let (tx_start, rx_start) = tokio::sync::oneshot::channel::<Started>();
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        let task = self.state.launcher.start(listener, context, tx_start, rx_halt);

        let binding = rx_start.await.map_err(|_| Error::UnableToStart)?.address;

        tracing::trace!(target: PROXY_LOG_TARGET, %binding, "ProxyServer<Stopped>::start (running)");

        Ok(ProxyServer {
            state: Running {
                binding,
                halt_task: tx_halt,
                task,
            },
        })
    }
}

impl ProxyServer<Running> {
    /// It stops the server and returns a `ProxyServer` controller in
    /// `stopped` state.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the halt channel was closed or the server task
    /// can't be joined.
    pub async fn stop(self) -> Result<ProxyServer<Stopped>, Error> {
        self.state
            .halt_task
            .send(Halted::Normal)
            .map_err(|_| Error::UnableToSendHaltingMessage)?;

        let launcher = self.state.task.await.map_err(|err| Error::UnableToJoin { err })?;

        Ok(ProxyServer {
            state: Stopped { launcher },
        })
    }
}
