//! The main library for the `nozzle-exerciser` application.
//!
//! This crate generates a one-page PDF with four solid CMYK bars at a random position
//! and submits it to a printer, so that every ink channel fires at least once.
//! The primary entry point is the `run` function, which takes the parsed CLI arguments
//! and executes the whole run.
//!
//! The library is structured into several modules:
//! - `cli`: Defines the command-line interface.
//! - `config`: Validates the command line into an immutable run configuration.
//! - `layout`: Page sizes, bar geometry and random placement.
//! - `composer`: Serializes a placed bar group into a PDF file.
//! - `dispatcher`: Submits the file to the print spooler (`lp`).
//! - `artifact`: Decides whether the generated file is removed after printing.
//! - `logger`: Diagnostics on stderr.
//! - `error`: Defines the application's custom error type.

use anyhow::{Context, Result};
use tracing::info;

pub mod artifact;
pub mod cli;
pub mod composer;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod layout;
pub mod logger;

use crate::artifact::OutputArtifact;
use crate::cli::Cli;
use crate::config::Config;

/// The main entry point for the application logic.
///
/// This function orchestrates the entire process:
/// 1.  It validates the arguments, rejecting bars that cannot fit on the page.
/// 2.  It writes the test page to the requested or a temporary path. A temporary file
///     that could not be written is removed again.
/// 3.  Unless in debug mode, it submits the page to the printer.
/// 4.  It removes the temporary file once the printer accepted the job.
///
/// A failed submission leaves the file on disk.
///
/// # Errors
///
/// Returns an error if validation, writing, printing or cleanup fails.
pub fn run(cli: &Cli) -> Result<()> {
    // 1. Validate
    let config = Config::from_cli(cli).context("Invalid bar dimensions")?;
    let mut rng = config.rng();

    // 2. Compose the page
    let artifact = OutputArtifact::resolve(config.output.as_deref())?;
    let composed = composer::compose(
        artifact.path(),
        config.page_size,
        config.bars.width_mm,
        config.bars.height_mm,
        &mut rng,
    );
    let path = match composed {
        Ok(path) => path,
        Err(e) => {
            artifact.abandon();
            return Err(e.into());
        }
    };
    println!("Generated test page: {}", path.display());

    if config.debug {
        println!("Debug mode: not printing or deleting the file.");
        return Ok(());
    }

    // 3. Print
    dispatcher::dispatch(&config.spooler, &path, &config.printer)
        .with_context(|| format!("Test page left at {}", path.display()))?;
    println!("Sent to printer: {}", config.printer);
    info!(printer = %config.printer, "test page submitted");

    // 4. Clean up
    if artifact.release()? {
        println!("Temporary file removed.");
    }

    Ok(())
}
