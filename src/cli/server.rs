//! HTTP endpoint receiving alert webhooks
//!
//! Every POST, on any path, is decoded and handed to the dispatcher; the
//! caller always gets `200 {"status":"ok"}` back, whatever happens to the
//! notification afterwards. Other methods are answered `405` by the router.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::application::ports::Launcher;
use crate::application::DispatchAlertUseCase;

/// Server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Server not bound")]
    NotBound,

    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}

/// State shared by all request handlers
struct AlertState<L: Launcher> {
    dispatcher: Arc<DispatchAlertUseCase<L>>,
}

impl<L: Launcher> Clone for AlertState<L> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

/// Build the webhook router.
///
/// Bodies are read in full regardless of size so every POST is acknowledged.
pub fn router<L>(dispatcher: Arc<DispatchAlertUseCase<L>>) -> Router
where
    L: Launcher + 'static,
{
    Router::new()
        .route("/", post(receive_alert::<L>))
        .route("/{*path}", post(receive_alert::<L>))
        .layer(DefaultBodyLimit::disable())
        .with_state(AlertState { dispatcher })
}

async fn receive_alert<L>(State(state): State<AlertState<L>>, body: Bytes) -> impl IntoResponse
where
    L: Launcher + 'static,
{
    // Launch outcome is deliberately not part of the response
    let _ = state.dispatcher.dispatch_body(&body);
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Loopback HTTP server for alert webhooks
pub struct AlertServer {
    addr: SocketAddr,
    listener: Option<TcpListener>,
}

impl AlertServer {
    /// Create a new server for `addr`
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            listener: None,
        }
    }

    /// Bind the listening socket
    pub async fn bind(&mut self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr,
                source,
            })?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Address actually bound (differs from the requested one for port 0)
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        let listener = self.listener.as_ref().ok_or(ServerError::NotBound)?;
        Ok(listener.local_addr()?)
    }

    /// Serve `router` until `shutdown` resolves
    pub async fn run<F>(self, router: Router, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.listener.ok_or(ServerError::NotBound)?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
