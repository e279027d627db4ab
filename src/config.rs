//! The validated, immutable settings for one run.

use crate::cli::Cli;
use crate::dispatcher::Spooler;
use crate::error::AppError;
use crate::layout::{BarSpec, PageSize};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub printer: String,
    pub page_size: PageSize,
    pub bars: BarSpec,
    pub debug: bool,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub spooler: Spooler,
}

impl Config {
    /// Validates the command line.
    ///
    /// Bars that are not strictly positive, or whose group would not fit on the selected
    /// page, are rejected here so that no file is created for an impossible layout.
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let bars = BarSpec::new(cli.bar_width, cli.bar_height)?;
        bars.placement_range(cli.page_size)?;

        Ok(Self {
            printer: cli.printer.clone(),
            page_size: cli.page_size,
            bars,
            debug: cli.debug,
            output: cli.output.clone(),
            seed: cli.seed,
            spooler: Spooler::new(&cli.spooler),
        })
    }

    /// The random source for bar placement: seeded when requested, from entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
