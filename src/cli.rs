use crate::dispatcher::DEFAULT_SPOOLER;
use crate::layout::PageSize;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate and print a CMYK nozzle exerciser page."
)]
pub struct Cli {
    /// Printer name, as known to CUPS.
    #[arg(long, env = "PRINTER")]
    pub printer: String,

    /// Page size.
    #[arg(long, value_enum, default_value_t = PageSize::A4)]
    pub page_size: PageSize,

    /// Bar width in mm.
    #[arg(long, default_value_t = 7.0)]
    pub bar_width: f64,

    /// Bar height in mm.
    #[arg(long, default_value_t = 40.0)]
    pub bar_height: f64,

    /// Debug mode: only generate and save the PDF, do not print or delete.
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Output PDF filename.
    /// Defaults to a temporary file that is removed after printing.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Seed for the bar placement, to reproduce a page exactly.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print spooling command, invoked as `<spooler> -d <printer> <file>`.
    #[arg(long, default_value = DEFAULT_SPOOLER)]
    pub spooler: String,

    /// Log diagnostics to stderr.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
