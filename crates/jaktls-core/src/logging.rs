//! Structured logging for jaktls.
//!
//! Built on the standard [`log`] facade. Library crates only emit records;
//! the `jaktls` binary installs the logger.
//!
//! # Log Levels
//!
//! - **error**: Unrecoverable failures (unreadable config, I/O errors)
//! - **warn**: Failed preconditions, rejected input in the CLI
//! - **info**: Lifecycle events (config loaded, checks started)
//! - **debug**: Validation decisions in the protocol layer
//! - **trace**: Parser failure offsets, field-level detail
//!
//! # Log Targets
//!
//! - `jaktls`: Root target
//! - `jaktls::json`: Parser and serializer
//! - `jaktls::protocol`: Message validation and dumping
//! - `jaktls::config`: Configuration loading
//! - `jaktls::cli`: Command-line front end
//!
//! Example filter: `JAKTLS_LOG=debug`

pub use log::{debug, error, info, trace, warn};

pub use log::{Level, LevelFilter};

/// Log targets used by jaktls components.
pub mod targets {
    /// Root target for all jaktls logs.
    pub const JAKTLS: &str = "jaktls";

    /// JSON parsing and serialization.
    pub const JSON: &str = "jaktls::json";

    /// Base protocol validation and dumping.
    pub const PROTOCOL: &str = "jaktls::protocol";

    /// Configuration loading.
    pub const CONFIG: &str = "jaktls::config";

    /// Command-line front end.
    pub const CLI: &str = "jaktls::cli";
}

/// Returns whether logging is enabled at the given level for the given target.
#[inline]
#[must_use]
pub fn is_enabled(level: Level, target: &str) -> bool {
    log::log_enabled!(target: target, level)
}

/// Parses a level filter name (`off`, `error`, `warn`, `info`, `debug`,
/// `trace`), case-insensitively.
#[must_use]
pub fn parse_level_filter(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}
