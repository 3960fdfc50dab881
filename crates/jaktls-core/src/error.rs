//! Error type for fallible operations outside the JSON/protocol core.

use std::fmt;
use std::path::PathBuf;

/// Result alias used across jaktls crates.
pub type JaktlsResult<T> = Result<T, JaktlsError>;

/// Errors raised by configuration, I/O and precondition checks.
#[derive(Debug)]
pub enum JaktlsError {
    /// Underlying I/O failure.
    Io(std::io::Error),
    /// A configuration file could not be parsed or holds a bad value.
    Config {
        /// File the configuration came from, if any.
        path: Option<PathBuf>,
        /// What was wrong with it.
        message: String,
    },
    /// A startup precondition did not hold.
    Precondition {
        /// Human-readable precondition name.
        name: String,
        /// Why the check failed.
        reason: String,
    },
    /// Input text was not a valid JSON-RPC message.
    InvalidMessage(String),
}

impl JaktlsError {
    /// Creates a configuration error not tied to a file.
    pub fn config(message: impl Into<String>) -> Self {
        JaktlsError::Config {
            path: None,
            message: message.into(),
        }
    }

    /// Creates a precondition failure.
    pub fn precondition(name: impl Into<String>, reason: impl Into<String>) -> Self {
        JaktlsError::Precondition {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for JaktlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JaktlsError::Io(e) => write!(f, "I/O error: {e}"),
            JaktlsError::Config {
                path: Some(path),
                message,
            } => write!(f, "invalid config {}: {message}", path.display()),
            JaktlsError::Config { path: None, message } => write!(f, "invalid config: {message}"),
            JaktlsError::Precondition { name, reason } => write!(f, "{name}: {reason}"),
            JaktlsError::InvalidMessage(message) => write!(f, "invalid message: {message}"),
        }
    }
}

impl std::error::Error for JaktlsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JaktlsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for JaktlsError {
    fn from(err: std::io::Error) -> Self {
        JaktlsError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_formats() {
        let err = JaktlsError::precondition("compiler path", "can't find compiler binary");
        assert_eq!(err.to_string(), "compiler path: can't find compiler binary");

        let err = JaktlsError::Config {
            path: Some(PathBuf::from("/tmp/c.toml")),
            message: "bad".into(),
        };
        assert_eq!(err.to_string(), "invalid config /tmp/c.toml: bad");
        assert_eq!(JaktlsError::config("x").to_string(), "invalid config: x");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: JaktlsError = io.into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));
    }
}
