//! Server configuration.
//!
//! `ServerConfig` gathers the few knobs the server has, from a TOML file,
//! the environment and finally command-line flags (applied by the binary).
//!
//! ```toml
//! compiler = "/opt/jakt/bin/jakt"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;

use crate::logging::{self, targets};
use crate::{JaktlsError, JaktlsResult};

/// Environment variable overriding the compiler path.
pub const ENV_COMPILER: &str = "JAKTLS_COMPILER";

/// Environment variable overriding the log level.
pub const ENV_LOG: &str = "JAKTLS_LOG";

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    compiler: Option<PathBuf>,
    log_level: Option<String>,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerConfig {
    /// Path to the Jakt compiler, if configured.
    pub compiler: Option<PathBuf>,
    /// Log level filter, if configured.
    pub log_level: Option<LevelFilter>,
}

impl ServerConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> JaktlsResult<Self> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| JaktlsError::config(e.to_string()))?;
        let log_level = match file.log_level {
            Some(name) => Some(
                logging::parse_level_filter(&name)
                    .ok_or_else(|| JaktlsError::config(format!("unknown log level `{name}`")))?,
            ),
            None => None,
        };
        Ok(Self {
            compiler: file.compiler,
            log_level,
        })
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> JaktlsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text).map_err(|err| match err {
            JaktlsError::Config { message, .. } => JaktlsError::Config {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })?;
        log::info!(target: targets::CONFIG, "loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the file at [`Self::default_config_path`] if it exists,
    /// otherwise returns the default configuration.
    pub fn load_default() -> JaktlsResult<Self> {
        match Self::default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Builds a configuration from the environment alone.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overrides fields from `JAKTLS_COMPILER` and `JAKTLS_LOG`.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overrides fields using `lookup` as the environment.
    ///
    /// Empty values are ignored, as are unrecognized log levels (with a
    /// warning).
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(compiler) = lookup(ENV_COMPILER).filter(|v| !v.is_empty()) {
            self.compiler = Some(PathBuf::from(compiler));
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            match logging::parse_level_filter(&level) {
                Some(filter) => self.log_level = Some(filter),
                None => log::warn!(target: targets::CONFIG, "ignoring {ENV_LOG}={level}: unknown level"),
            }
        }
    }

    /// `<config dir>/jaktls/config.toml`.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jaktls").join("config.toml"))
    }

    /// The configured compiler, or [`default_compiler_path`].
    #[must_use]
    pub fn compiler_or_default(&self) -> Option<PathBuf> {
        self.compiler.clone().or_else(default_compiler_path)
    }
}

/// Where `cargo install` puts the Jakt compiler: `~/.cargo/bin/jakt`.
#[must_use]
pub fn default_compiler_path() -> Option<PathBuf> {
    let binary = if cfg!(windows) { "jakt.exe" } else { "jakt" };
    dirs::home_dir().map(|home| home.join(".cargo").join("bin").join(binary))
}
