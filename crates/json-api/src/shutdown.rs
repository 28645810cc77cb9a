//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::{fmt, io};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "ctrl_c",
            Self::Terminate => "terminate",
        })
    }
}

/// Wait for a shutdown signal, then let in-flight requests finish.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let received = wait().await?;

    info!(signal = %received, "shutdown signal received, draining requests");

    handle.stop_graceful(None);

    Ok(())
}

#[cfg(unix)]
async fn wait() -> Result<Signal, ShutdownSignalError> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?;

    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;

            Ok(Signal::Interrupt)
        }
        _ = terminate.recv() => Ok(Signal::Terminate),
    }
}

#[cfg(not(unix))]
async fn wait() -> Result<Signal, ShutdownSignalError> {
    signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;

    Ok(Signal::Interrupt)
}
