//! Storage command building and rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::script::script_literal;

/// Which of the browser's two key-value stores a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Origin-scoped persistent store (`window.localStorage`).
    Local,
    /// Page-scoped session store (`window.sessionStorage`).
    Session,
}

impl StorageKind {
    /// The global object the rendered script addresses.
    #[must_use]
    pub const fn global_object(self) -> &'static str {
        match self {
            Self::Local => "window.localStorage",
            Self::Session => "window.sessionStorage",
        }
    }

    /// Short name used in logs and assertion context labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage operation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageOp {
    /// Read a value; the only operation that produces a result payload.
    Get,
    /// Write a key/value pair.
    Set,
    /// Delete a single key.
    Remove,
    /// Delete every key in the store.
    Clear,
}

impl StorageOp {
    const fn method(self) -> &'static str {
        match self {
            Self::Get => "getItem",
            Self::Set => "setItem",
            Self::Remove => "removeItem",
            Self::Clear => "clear",
        }
    }
}

/// Command build error.
///
/// A missing required argument is a programmer error in the caller; it is
/// never retried.
#[derive(Debug, Error)]
pub enum CommandBuildError {
    #[error("{op:?} on {kind} requires a key")]
    MissingKey { kind: StorageKind, op: StorageOp },
    #[error("Set on {kind} requires a value")]
    MissingValue { kind: StorageKind },
}

/// Immutable storage command.
///
/// Constructed per call, rendered once, and discarded after the response
/// is consumed. The typed constructors uphold the argument invariant by
/// construction; [`StorageCommand::build`] checks it for callers arriving
/// with optional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageCommand {
    kind: StorageKind,
    op: StorageOp,
    key: Option<String>,
    value: Option<String>,
}

impl StorageCommand {
    /// Read the value stored under `key`.
    #[must_use]
    pub fn get(kind: StorageKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            op: StorageOp::Get,
            key: Some(key.into()),
            value: None,
        }
    }

    /// Store `value` under `key`.
    #[must_use]
    pub fn set(kind: StorageKind, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            op: StorageOp::Set,
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }

    /// Delete the entry stored under `key`.
    #[must_use]
    pub fn remove(kind: StorageKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            op: StorageOp::Remove,
            key: Some(key.into()),
            value: None,
        }
    }

    /// Delete every entry in the store.
    #[must_use]
    pub const fn clear(kind: StorageKind) -> Self {
        Self {
            kind,
            op: StorageOp::Clear,
            key: None,
            value: None,
        }
    }

    /// Build a command from optional arguments, validating presence.
    ///
    /// # Errors
    /// Returns [`CommandBuildError`] if a required argument is absent for
    /// the requested operation.
    pub fn build(
        kind: StorageKind,
        op: StorageOp,
        key: Option<String>,
        value: Option<String>,
    ) -> Result<Self, CommandBuildError> {
        match op {
            StorageOp::Clear => Ok(Self::clear(kind)),
            StorageOp::Get | StorageOp::Remove => {
                let key = key.ok_or(CommandBuildError::MissingKey { kind, op })?;
                Ok(Self {
                    kind,
                    op,
                    key: Some(key),
                    value: None,
                })
            }
            StorageOp::Set => {
                let key = key.ok_or(CommandBuildError::MissingKey { kind, op })?;
                let value = value.ok_or(CommandBuildError::MissingValue { kind })?;
                Ok(Self::set(kind, key, value))
            }
        }
    }

    /// Storage kind this command targets.
    #[must_use]
    pub const fn kind(&self) -> StorageKind {
        self.kind
    }

    /// Operation shape.
    #[must_use]
    pub const fn op(&self) -> StorageOp {
        self.op
    }

    /// Key the command addresses, if the operation takes one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Whether executing this command yields a result payload.
    #[must_use]
    pub const fn produces_result(&self) -> bool {
        matches!(self.op, StorageOp::Get)
    }

    /// Render the command to script text.
    ///
    /// Arguments pass through [`script_literal`], so the rendered text is
    /// a single call expression no matter what the key or value contains.
    #[must_use]
    pub fn render(&self) -> String {
        let target = self.kind.global_object();
        let method = self.op.method();
        match (&self.key, &self.value) {
            (Some(key), Some(value)) => format!(
                "{target}.{method}({}, {})",
                script_literal(key),
                script_literal(value)
            ),
            (Some(key), None) => format!("{target}.{method}({})", script_literal(key)),
            _ => format!("{target}.{method}()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_get() {
        let cmd = StorageCommand::get(StorageKind::Local, "token");
        assert_eq!(cmd.render(), "window.localStorage.getItem(\"token\")");
    }

    #[test]
    fn test_render_set() {
        let cmd = StorageCommand::set(StorageKind::Session, "k", "v");
        assert_eq!(cmd.render(), "window.sessionStorage.setItem(\"k\", \"v\")");
    }

    #[test]
    fn test_render_remove_and_clear() {
        let remove = StorageCommand::remove(StorageKind::Local, "k");
        assert_eq!(remove.render(), "window.localStorage.removeItem(\"k\")");
        let clear = StorageCommand::clear(StorageKind::Session);
        assert_eq!(clear.render(), "window.sessionStorage.clear()");
    }

    #[test]
    fn test_render_escapes_hostile_key() {
        let cmd = StorageCommand::get(StorageKind::Local, "a\"b");
        assert_eq!(cmd.render(), "window.localStorage.getItem(\"a\\\"b\")");
    }

    #[test]
    fn test_build_checks_required_arguments() {
        let err = StorageCommand::build(StorageKind::Local, StorageOp::Get, None, None)
            .unwrap_err();
        assert!(matches!(err, CommandBuildError::MissingKey { .. }));

        let err = StorageCommand::build(
            StorageKind::Session,
            StorageOp::Set,
            Some("k".into()),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CommandBuildError::MissingValue { .. }));

        let cmd =
            StorageCommand::build(StorageKind::Local, StorageOp::Clear, None, None).unwrap();
        assert_eq!(cmd, StorageCommand::clear(StorageKind::Local));
    }

    #[test]
    fn test_only_get_produces_result() {
        assert!(StorageCommand::get(StorageKind::Local, "k").produces_result());
        assert!(!StorageCommand::set(StorageKind::Local, "k", "v").produces_result());
        assert!(!StorageCommand::remove(StorageKind::Local, "k").produces_result());
        assert!(!StorageCommand::clear(StorageKind::Local).produces_result());
    }
}
