//! Traits for the remote script-execution channel.
//!
//! The channel is an external collaborator (gRPC stub, WebSocket bridge,
//! test double). This crate only fixes the seam: a provider hands out an
//! owned channel per call, and dropping the channel releases it, so every
//! exit path -- transport failure included -- releases unconditionally.

use async_trait::async_trait;
use thiserror::Error;

use crate::response::ScriptResponse;

/// Transport error.
///
/// Surfaced to the caller unchanged; retry policy, if any, belongs to the
/// channel implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to acquire execution channel: {0}")]
    Acquire(String),
    #[error("connection lost: {0}")]
    ConnectionLost(String),
    #[error("remote execution failed: {0}")]
    RemoteException(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A scoped connection that executes script text on the remote engine.
#[async_trait]
pub trait RemoteExecutionChannel: Send {
    /// Execute `script` remotely and return its response.
    ///
    /// # Errors
    /// Returns [`TransportError`] if the exchange fails.
    async fn execute_script(&mut self, script: &str) -> Result<ScriptResponse, TransportError>;
}

/// Source of per-call execution channels.
#[async_trait]
pub trait ChannelProvider: Send + Sync {
    /// Channel type handed out by this provider.
    type Channel: RemoteExecutionChannel;

    /// Acquire a fresh channel for a single exchange.
    ///
    /// # Errors
    /// Returns [`TransportError::Acquire`] if no channel can be opened.
    async fn acquire(&self) -> Result<Self::Channel, TransportError>;
}
