//! Hands the finished document to the system print spooler.

use crate::error::AppError;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::{debug, info, instrument, warn};

/// The spooling client used when none is configured.
pub const DEFAULT_SPOOLER: &str = "lp";

/// What the spooling client reported for one submission.
#[derive(Debug)]
pub struct SpoolOutcome {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl SpoolOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, or a description of the signal that ended the process.
    pub fn status_text(&self) -> String {
        match self.status.code() {
            Some(code) => format!("exit code {}", code),
            None => "no exit code (terminated by signal)".to_string(),
        }
    }
}

/// An external print-spooling client invoked as `<program> -d <printer> <file>`.
#[derive(Debug, Clone)]
pub struct Spooler {
    program: OsString,
}

impl Default for Spooler {
    fn default() -> Self {
        Self::new(DEFAULT_SPOOLER)
    }
}

impl Spooler {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    /// Runs the spooler to completion and captures what it reported.
    ///
    /// Only a failure to launch the program is an error here; a non-zero exit is returned
    /// in the outcome for the caller to judge.
    pub fn submit(&self, file_path: &Path, printer: &str) -> Result<SpoolOutcome, AppError> {
        debug!(
            program = %self.program.to_string_lossy(),
            printer,
            file = %file_path.display(),
            "invoking spooler"
        );
        let output = Command::new(&self.program)
            .arg("-d")
            .arg(printer)
            .arg(file_path)
            .output()
            .map_err(|source| AppError::SpoolerLaunch {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        Ok(SpoolOutcome {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Submits `file_path` to `printer` and turns a rejected submission into an error.
///
/// Whatever the spooler printed on success is passed on: stdout (usually the job id) to
/// stdout, warnings to stderr.
#[instrument(skip(spooler), fields(program = %spooler.program().to_string_lossy()))]
pub fn dispatch(spooler: &Spooler, file_path: &Path, printer: &str) -> Result<(), AppError> {
    let outcome = spooler.submit(file_path, printer)?;

    if !outcome.success() {
        warn!(status = %outcome.status_text(), "spooler rejected the job");
        return Err(AppError::SpoolerRejected {
            program: spooler.program().to_string_lossy().into_owned(),
            printer: printer.to_string(),
            status: outcome.status_text(),
            stderr: outcome.stderr,
        });
    }

    let reply = outcome.stdout.trim();
    if !reply.is_empty() {
        println!("{}", reply);
    }
    let warnings = outcome.stderr.trim();
    if !warnings.is_empty() {
        warn!(stderr = warnings, "spooler reported warnings");
        eprintln!("{}", warnings);
    }
    info!("job accepted");
    Ok(())
}
