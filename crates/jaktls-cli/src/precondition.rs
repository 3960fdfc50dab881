//! Startup preconditions.
//!
//! Every check runs and reports, even after an earlier one failed, so a
//! user sees all problems at once.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use console::style;
use jaktls_core::logging::targets;
use jaktls_core::{JaktlsError, JaktlsResult};

/// Something that must hold before the server can start.
pub trait PreconditionCheck {
    /// Shown as `Checking <name>`.
    fn name(&self) -> String;

    /// `Err` carries the reason the precondition does not hold.
    fn perform_check(&self) -> Result<(), String>;
}

/// The compiler binary exists, is a regular file and is usable by others.
#[derive(Debug, Clone)]
pub struct CompilerPathCheck {
    path: PathBuf,
}

impl CompilerPathCheck {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreconditionCheck for CompilerPathCheck {
    fn name(&self) -> String {
        format!("compiler path: {:?}", self.path.display().to_string())
    }

    fn perform_check(&self) -> Result<(), String> {
        let Ok(metadata) = fs::metadata(&self.path) else {
            return Err("can't find compiler binary".to_string());
        };
        if !metadata.is_file() {
            return Err("compiler binary must be a normal executable file".to_string());
        }
        check_permissions(&metadata)
    }
}

#[cfg(unix)]
fn check_permissions(metadata: &fs::Metadata) -> Result<(), String> {
    use std::os::unix::fs::PermissionsExt;

    // o+r and o+x
    const NEEDED: u32 = 0o005;
    if metadata.permissions().mode() & NEEDED == NEEDED {
        Ok(())
    } else {
        Err("cannot use compiler binary due to permissions. Check that o+r and o+x are there.".to_string())
    }
}

#[cfg(not(unix))]
fn check_permissions(_metadata: &fs::Metadata) -> Result<(), String> {
    Ok(())
}

/// Runs one check, printing `Checking <name>  OK|ERROR` to `out`.
pub fn check_single(check: &dyn PreconditionCheck, out: &mut impl Write) -> io::Result<Result<(), String>> {
    let name = check.name();
    write!(out, "Checking {name}")?;
    let outcome = check.perform_check();
    match &outcome {
        Ok(()) => writeln!(out, "  {}", style("OK").green().bold())?,
        Err(reason) => {
            writeln!(out, "  {}", style("ERROR").red().bold())?;
            writeln!(out, "  {reason}")?;
            log::debug!(target: targets::CLI, "precondition failed: {name}: {reason}");
        }
    }
    Ok(outcome)
}

/// Runs every check and fails with the first failure, after all have
/// been reported.
pub fn check_preconditions(checks: &[&dyn PreconditionCheck], out: &mut impl Write) -> JaktlsResult<()> {
    let mut first_failure = None;
    for check in checks {
        if let Err(reason) = check_single(*check, out)? {
            if first_failure.is_none() {
                first_failure = Some(JaktlsError::precondition(check.name(), reason));
            }
        }
    }
    first_failure.map_or(Ok(()), Err)
}
