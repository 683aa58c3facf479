//! Shutdown signal handling for the server

use std::fmt;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// Why the server is shutting down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl ShutdownReason {
    pub const fn signal_name(&self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signal_name())
    }
}

/// Listens for SIGINT/SIGTERM.
///
/// Handlers are installed on construction, so signals arriving before
/// [`wait`](Self::wait) is polled are not lost.
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<ShutdownReason>,
}

impl ShutdownSignal {
    /// Install the signal handlers
    pub fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(2);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            let _ = tx_int.send(ShutdownReason::Interrupt).await;
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            let _ = tx.send(ShutdownReason::Terminate).await;
        });

        Ok(Self { receiver: rx })
    }

    /// Resolve once the first shutdown signal arrives
    pub async fn wait(mut self) -> Option<ShutdownReason> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_reason_equality() {
        assert_eq!(ShutdownReason::Interrupt, ShutdownReason::Interrupt);
        assert_ne!(ShutdownReason::Interrupt, ShutdownReason::Terminate);
    }

    #[test]
    fn shutdown_reason_names_signal() {
        assert_eq!(ShutdownReason::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownReason::Terminate.to_string(), "SIGTERM");
    }

    #[tokio::test]
    async fn handlers_install_inside_runtime() {
        assert!(ShutdownSignal::new().is_ok());
    }
}
