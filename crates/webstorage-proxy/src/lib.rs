//! Keyed storage proxy for remote `localStorage`/`sessionStorage`.
//!
//! Orchestrates one RPC exchange per call: build the command, acquire a
//! channel from the provider, send the rendered script, emit the remote
//! diagnostic log, and for reads decode the JSON payload and optionally
//! route it through the assertion verifier. Holds no cross-call state.

use serde_json::Value;
use thiserror::Error;

use webstorage_assertion::{AssertionError, AssertionOperator, verify_value};
use webstorage_core::{
    ChannelProvider, CommandBuildError, DecodeError, RemoteExecutionChannel, ScriptResponse,
    StorageCommand, StorageKind, StorageOp, TransportError, decode_result,
};

/// Storage proxy error.
#[derive(Debug, Error)]
pub enum StorageProxyError {
    #[error(transparent)]
    Command(#[from] CommandBuildError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{kind}.getItem({key:?}): {source}")]
    Decode {
        kind: StorageKind,
        key: String,
        #[source]
        source: DecodeError,
    },
    #[error(transparent)]
    Assertion(#[from] AssertionError),
}

/// Proxy over a remote browser's keyed storage.
///
/// Generic over the [`ChannelProvider`] so the same orchestration drives a
/// real RPC stub in production and an in-memory fake in tests. Calls are
/// independent; concurrent calls to the same key are ordered by the remote
/// store, not by this type.
pub struct KeyedStorageProxy<P: ChannelProvider> {
    provider: P,
}

impl<P: ChannelProvider> KeyedStorageProxy<P> {
    /// Create a proxy over the given channel provider.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get the value stored under `key`, optionally verifying it.
    ///
    /// With no operator the decoded value is returned unchanged; a missing
    /// key decodes to [`Value::Null`]. With an operator, the decoded
    /// value, operator, and `expected` go to the assertion verifier and
    /// its (possibly transformed) outcome value is returned.
    ///
    /// # Errors
    /// Returns error if the exchange fails, the payload is not valid
    /// JSON, or the assertion does not hold.
    pub async fn get(
        &self,
        kind: StorageKind,
        key: &str,
        operator: Option<AssertionOperator>,
        expected: Option<Value>,
    ) -> Result<Value, StorageProxyError> {
        let decoded = self
            .dispatch(kind, StorageOp::Get, Some(key.to_owned()), None)
            .await?
            .unwrap_or(Value::Null);
        let context = format!("{kind} ");
        Ok(verify_value(decoded, operator, expected, &context)?)
    }

    /// Store `value` under `key`.
    ///
    /// # Errors
    /// Returns error if the exchange fails.
    pub async fn set(
        &self,
        kind: StorageKind,
        key: &str,
        value: &str,
    ) -> Result<(), StorageProxyError> {
        self.dispatch(kind, StorageOp::Set, Some(key.to_owned()), Some(value.to_owned()))
            .await?;
        Ok(())
    }

    /// Remove the entry stored under `key`.
    ///
    /// # Errors
    /// Returns error if the exchange fails.
    pub async fn remove(&self, kind: StorageKind, key: &str) -> Result<(), StorageProxyError> {
        self.dispatch(kind, StorageOp::Remove, Some(key.to_owned()), None)
            .await?;
        Ok(())
    }

    /// Remove every entry from the store.
    ///
    /// # Errors
    /// Returns error if the exchange fails.
    pub async fn clear(&self, kind: StorageKind) -> Result<(), StorageProxyError> {
        self.dispatch(kind, StorageOp::Clear, None, None).await?;
        Ok(())
    }

    /// Generic entry point behind the four typed operations.
    ///
    /// Builds and validates the command, runs the exchange, and decodes
    /// the result payload when the operation produces one (`Ok(Some(..))`
    /// for Get, `Ok(None)` otherwise).
    ///
    /// # Errors
    /// Returns [`CommandBuildError`] wrapped in [`StorageProxyError`] when
    /// a required argument is absent, plus the transport and decode
    /// failures of the exchange itself.
    pub async fn dispatch(
        &self,
        kind: StorageKind,
        op: StorageOp,
        key: Option<String>,
        value: Option<String>,
    ) -> Result<Option<Value>, StorageProxyError> {
        let command = StorageCommand::build(kind, op, key, value)?;
        let response = self.execute(&command).await?;
        if !command.produces_result() {
            return Ok(None);
        }
        let decoded = response
            .result
            .ok_or(DecodeError::MissingResult)
            .and_then(|raw| decode_result(&raw))
            .map_err(|source| StorageProxyError::Decode {
                kind,
                key: command.key().unwrap_or_default().to_owned(),
                source,
            })?;
        Ok(Some(decoded))
    }

    /// Single-shot exchange: acquire, send, log.
    ///
    /// The channel is owned by this frame, so it is dropped (released) on
    /// every exit path, including transport failures and the decode and
    /// assertion failures in the callers above.
    async fn execute(
        &self,
        command: &StorageCommand,
    ) -> Result<ScriptResponse, StorageProxyError> {
        let mut channel = self.provider.acquire().await?;
        let script = command.render();
        let response = channel.execute_script(&script).await?;
        tracing::info!(
            storage = command.kind().name(),
            op = ?command.op(),
            "{}",
            response.log
        );
        Ok(response)
    }
}
