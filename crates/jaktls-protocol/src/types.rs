//! Error code taxonomy.
//!
//! Codes come from three bands: the codes JSON-RPC predefines, the range
//! JSON-RPC reserves for implementations, and the range LSP reserves for
//! itself. This crate only names the codes; choosing one is up to the
//! dispatcher.

use std::fmt;
use std::ops::RangeInclusive;

/// Codes JSON-RPC reserves for implementation-defined server errors.
pub const JSONRPC_RESERVED: RangeInclusive<i64> = -32099..=-32000;

/// Codes the Language Server Protocol reserves for itself.
pub const LSP_RESERVED: RangeInclusive<i64> = -32899..=-32800;

#[must_use]
pub fn is_jsonrpc_reserved(code: i64) -> bool {
    JSONRPC_RESERVED.contains(&code)
}

#[must_use]
pub fn is_lsp_reserved(code: i64) -> bool {
    LSP_RESERVED.contains(&code)
}

/// Which band a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorBand {
    /// Predefined by JSON-RPC (-32700, -32600..=-32603).
    JsonRpc,
    /// JSON-RPC implementation-reserved range.
    JsonRpcReserved,
    /// LSP-reserved range.
    LspReserved,
}

impl ErrorBand {
    /// Classifies an arbitrary code; `None` for application-defined codes.
    #[must_use]
    pub fn of(code: i64) -> Option<Self> {
        if code == -32700 || (-32603..=-32600).contains(&code) {
            Some(ErrorBand::JsonRpc)
        } else if is_jsonrpc_reserved(code) {
            Some(ErrorBand::JsonRpcReserved)
        } else if is_lsp_reserved(code) {
            Some(ErrorBand::LspReserved)
        } else {
            None
        }
    }
}

/// Error codes used in [`crate::ResponseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid JSON was received.
    ParseError,
    /// The JSON sent is not a valid request object.
    InvalidRequest,
    /// The method does not exist or is not available.
    MethodNotFound,
    /// Invalid method parameters.
    InvalidParams,
    /// Internal JSON-RPC error.
    InternalError,
    /// A notification or request arrived before `initialize`.
    ServerNotInitialized,
    UnknownErrorCode,
    /// The request was well-formed and understood, but failed.
    RequestFailed,
    /// The server cancelled a request that supports server cancellation.
    ServerCancelled,
    /// The document changed outside normal conditions; a result computed
    /// on the older state may still be useful.
    ContentModified,
    /// The client cancelled the request and the server noticed.
    RequestCancelled,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::ParseError,
        ErrorCode::InvalidRequest,
        ErrorCode::MethodNotFound,
        ErrorCode::InvalidParams,
        ErrorCode::InternalError,
        ErrorCode::ServerNotInitialized,
        ErrorCode::UnknownErrorCode,
        ErrorCode::RequestFailed,
        ErrorCode::ServerCancelled,
        ErrorCode::ContentModified,
        ErrorCode::RequestCancelled,
    ];

    /// The wire value.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::ServerNotInitialized => -32002,
            ErrorCode::UnknownErrorCode => -32001,
            ErrorCode::RequestFailed => -32803,
            ErrorCode::ServerCancelled => -32802,
            ErrorCode::ContentModified => -32801,
            ErrorCode::RequestCancelled => -32800,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Default human-readable message.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ServerNotInitialized => "Server not initialized",
            ErrorCode::UnknownErrorCode => "Unknown error",
            ErrorCode::RequestFailed => "Request failed",
            ErrorCode::ServerCancelled => "Server cancelled",
            ErrorCode::ContentModified => "Content modified",
            ErrorCode::RequestCancelled => "Request cancelled",
        }
    }

    #[must_use]
    pub fn band(self) -> ErrorBand {
        match self {
            ErrorCode::ParseError
            | ErrorCode::InvalidRequest
            | ErrorCode::MethodNotFound
            | ErrorCode::InvalidParams
            | ErrorCode::InternalError => ErrorBand::JsonRpc,
            ErrorCode::ServerNotInitialized | ErrorCode::UnknownErrorCode => ErrorBand::JsonRpcReserved,
            ErrorCode::RequestFailed
            | ErrorCode::ServerCancelled
            | ErrorCode::ContentModified
            | ErrorCode::RequestCancelled => ErrorBand::LspReserved,
        }
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<i64> for ErrorCode {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        ErrorCode::from_code(code).ok_or(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}
