use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bar {dimension} must be a positive number of millimeters, got {value}")]
    InvalidBarSize { dimension: &'static str, value: f64 },

    #[error(
        "Bar group of {group_width_mm:.1} x {group_height_mm:.1} mm does not fit on a \
         {page_width_mm:.1} x {page_height_mm:.1} mm page"
    )]
    BarGroupExceedsPage {
        group_width_mm: f64,
        group_height_mm: f64,
        page_width_mm: f64,
        page_height_mm: f64,
    },

    #[error("Failed to allocate a temporary file for the test page")]
    TempArtifact(#[source] std::io::Error),

    #[error("Failed to write test page to {path}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove temporary file {path}")]
    ArtifactRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not launch print spooler '{program}'")]
    SpoolerLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error printing file: '{program}' exited with {status} for printer '{printer}'{}", stderr_suffix(.stderr))]
    SpoolerRejected {
        program: String,
        printer: String,
        status: String,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
