//! Language Server Protocol base messages.
//!
//! This crate turns [`jaktls_json::Value`]s into typed JSON-RPC messages and
//! back:
//! - [`Message`]: the shared `"jsonrpc": "2.0"` envelope
//! - [`RequestMessage`], [`NotificationMessage`], [`IncomingMessage`]:
//!   inbound messages, built only by validation (or typed constructors)
//! - [`ResponseMessage`]: outbound only, built by [`ResponseMessage::ok`] or
//!   [`ResponseMessage::err`]
//! - [`CancelParams`]: payload of `$/cancelRequest`
//! - [`ErrorCode`]: the JSON-RPC and LSP error code taxonomy
//!
//! # Validation
//!
//! Every inbound type implements [`Validate`]. Validation runs in two
//! phases: a read-only [`Validate::check`] that decides whether the object
//! has the right shape, then [`Validate::extract`], which moves the
//! recognized fields out. A rejected payload is therefore left untouched.
//! [`Validate::decode`] also hands back the fields nobody recognized.
//!
//! Rejections carry no diagnostic; the caller maps them onto an
//! [`ErrorCode`] such as `InvalidRequest`.
//!
//! ```
//! use jaktls_json::parse;
//! use jaktls_protocol::{RequestId, RequestMessage, Validate};
//!
//! let mut value = parse(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#).unwrap();
//! let request = RequestMessage::validate(&mut value).unwrap();
//! assert_eq!(request.id(), &RequestId::Number(1));
//! assert_eq!(request.method(), "initialize");
//! ```

#![forbid(unsafe_code)]

mod decode;
mod jsonrpc;
mod messages;
mod response;
mod types;

pub use decode::{Decoded, Dump, Validate};
pub use jsonrpc::{
    ID_INTEGER_TOLERANCE, IncomingMessage, IncomingShape, JSONRPC_VERSION, Message, NotificationMessage,
    NotificationShape, Params, RequestId, RequestMessage, RequestShape,
};
pub use messages::{CancelParams, CancelShape};
pub use response::{Outcome, ResponseError, ResponseId, ResponseMessage};
pub use types::{ErrorBand, ErrorCode, JSONRPC_RESERVED, LSP_RESERVED, is_jsonrpc_reserved, is_lsp_reserved};
