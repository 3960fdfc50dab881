//! jaktls CLI - startup checks and message tooling for the Jakt language server.
//!
//! Commands:
//! - (none) - Check that the compiler binary is usable
//! - `inspect` - Parse and classify a JSON-RPC message file

#![forbid(unsafe_code)]

mod inspect;
mod logger;
mod precondition;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use jaktls_core::logging::{LevelFilter, targets};
use jaktls_core::{JaktlsError, JaktlsResult, ServerConfig};

use crate::logger::StderrLogger;
use crate::precondition::{CompilerPathCheck, check_preconditions};

/// jaktls - Jakt language server tooling.
#[derive(Parser)]
#[command(name = "jaktls")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Where the compiler is located (default: ~/.cargo/bin/jakt).
    #[arg(long, short = 'C', global = true, value_name = "PATH")]
    compiler: Option<PathBuf>,

    /// Configuration file (default: <config dir>/jaktls/config.toml).
    #[arg(long, global = true, value_name = "FILE", env = "JAKTLS_CONFIG")]
    config: Option<PathBuf>,

    /// More log output; repeat for more.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the compiler binary is usable (the default).
    Check,

    /// Parse a JSON-RPC message and show how it is classified.
    ///
    /// Prints the message kind, method, id and any unrecognized keys,
    /// followed by the message serialized back to JSON.
    Inspect {
        /// File holding one JSON message.
        file: PathBuf,
    },
}

impl Cli {
    fn log_level(&self, config: &ServerConfig) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => config.log_level.unwrap_or(LevelFilter::Warn),
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    StderrLogger::try_init(LevelFilter::Warn);

    let result = load_config(cli.config.as_deref()).and_then(|mut config| {
        log::set_max_level(cli.log_level(&config));
        if let Some(compiler) = &cli.compiler {
            config.compiler = Some(compiler.clone());
        }
        match &cli.command {
            None | Some(Commands::Check) => cmd_check(&config),
            Some(Commands::Inspect { file }) => cmd_inspect(file),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported next to the failing check.
        Err(JaktlsError::Precondition { .. }) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold().for_stderr());
            ExitCode::FAILURE
        }
    }
}

/// File (explicit or default), then environment.
fn load_config(path: Option<&Path>) -> JaktlsResult<ServerConfig> {
    let mut config = match path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::load_default()?,
    };
    config.apply_env();
    log::debug!(target: targets::CLI, "effective config: {config:?}");
    Ok(config)
}

fn cmd_check(config: &ServerConfig) -> JaktlsResult<()> {
    let compiler = config
        .compiler_or_default()
        .ok_or_else(|| JaktlsError::config("no compiler path given and no home directory to default to"))?;
    let check = CompilerPathCheck::new(compiler);
    check_preconditions(&[&check], &mut io::stderr().lock())
}

fn cmd_inspect(file: &Path) -> JaktlsResult<()> {
    let report = inspect::inspect_file(file)?;
    print!("{report}");
    Ok(())
}
