//! Error types for the disassembler front end.

use std::io;
use std::path::PathBuf;

use disasm_core::ConfigError;
use thiserror::Error;

/// Failures surfaced to the command line user.
#[derive(Debug, Error)]
pub enum CliError {
    /// The arguments could not be parsed.
    #[error("{0}")]
    Usage(String),
    /// The ROM could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadRom {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The listing could not be written.
    #[error("failed to write listing to {}: {source}", path.display())]
    WriteListing {
        /// Destination path, or `-` for standard output.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The diagnostic report could not be written.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] io::Error),
    /// The disassembly configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}
