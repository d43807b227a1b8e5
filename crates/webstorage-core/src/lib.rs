//! Core abstractions for driving a browser's web storage over RPC.
//!
//! This crate provides the fundamental building blocks:
//! - `script_literal` - Injection-safe string literal encoding
//! - `StorageCommand` - Renderable get/set/remove/clear commands
//! - `ScriptResponse` / `decode_result` - RPC response envelope and decoding
//! - `RemoteExecutionChannel` / `ChannelProvider` traits

pub mod channel;
pub mod command;
pub mod response;
pub mod script;

pub use channel::{ChannelProvider, RemoteExecutionChannel, TransportError};
pub use command::{CommandBuildError, StorageCommand, StorageKind, StorageOp};
pub use response::{DecodeError, ScriptResponse, decode_result};
pub use script::script_literal;
