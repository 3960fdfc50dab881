//! Stderr logger for the `jaktls` binary.
//!
//! Lines look like `12:04:31 DEBUG jaktls::protocol: CancelParams rejected`.
//! The level filter lives in `log::max_level()`, so it can be raised or
//! lowered after the logger is installed.

use std::io::{self, Write};

use console::{StyledObject, style};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::OffsetDateTime;
use time::macros::format_description;

static LOGGER: StderrLogger = StderrLogger;

/// `log::Log` implementation writing one line per record to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrLogger;

impl StderrLogger {
    /// Installs the logger with `level` as the initial filter.
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }

    /// Installs the logger, ignoring an already-installed one.
    pub fn try_init(level: LevelFilter) {
        if Self::init(level).is_err() {
            log::set_max_level(level);
        }
    }
}

fn level_label(level: Level) -> StyledObject<&'static str> {
    let label = match level {
        Level::Error => style("ERROR").red().bold(),
        Level::Warn => style("WARN").yellow().bold(),
        Level::Info => style("INFO").green(),
        Level::Debug => style("DEBUG").blue(),
        Level::Trace => style("TRACE").dim(),
    };
    label.for_stderr()
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default()
}

/// Renders a record without the timestamp.
fn format_record(record: &Record<'_>) -> String {
    format!("{} {}: {}", level_label(record.level()), record.target(), record.args())
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{} {}", style(timestamp()).dim().for_stderr(), format_record(record));
        let _ = writeln!(io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
