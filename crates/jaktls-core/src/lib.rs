//! Core support for the jaktls language server.
//!
//! This crate provides the ambient pieces every other jaktls crate shares:
//! - [`logging`]: the `log` facade re-exports and hierarchical log targets
//! - [`config`]: [`ServerConfig`], loaded from TOML and the environment
//! - [`JaktlsError`] / [`JaktlsResult`] for fallible operations outside the
//!   JSON and protocol core
//!
//! The JSON model and the protocol validators deliberately report data
//! errors as absent results rather than through [`JaktlsError`]; the error
//! type here covers I/O, configuration and precondition failures.

#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod logging;

pub use config::ServerConfig;
pub use error::{JaktlsError, JaktlsResult};
