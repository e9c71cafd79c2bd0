use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use disasm_core::{disassemble, DisasmConfig, Listing, NullReport, WriterReport};

use crate::errors::CliError;

/// Resolved command line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// ROM to disassemble.
    pub rom: PathBuf,
    /// Listing destination; standard output when `None`.
    pub output: Option<PathBuf>,
    /// Load address and entry point.
    pub config: DisasmConfig,
    /// Whether to print the reachability report.
    pub report: bool,
}

impl Options {
    /// Options for `rom` with every default applied.
    #[must_use]
    pub fn new(rom: impl Into<PathBuf>) -> Self {
        Self {
            rom: rom.into(),
            output: None,
            config: DisasmConfig::default(),
            report: true,
        }
    }
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Words in the ROM.
    pub words: usize,
    /// Words listed as code.
    pub reachable: usize,
}

/// Disassembles `options.rom`, sending the report to `report_to`.
///
/// # Errors
///
/// Returns [`CliError`] if the ROM cannot be read, the configuration is
/// invalid, or the listing or report cannot be written.
pub fn run<E: Write>(options: &Options, report_to: E) -> Result<Summary, CliError> {
    let bytes = fs::read(&options.rom).map_err(|source| CliError::ReadRom {
        path: options.rom.clone(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), options.rom.display());

    let result = if options.report {
        let mut report = WriterReport::new(report_to);
        let result = disassemble(&bytes, &options.config, &mut report)?;
        report.finish().map_err(CliError::WriteReport)?;
        result
    } else {
        disassemble(&bytes, &options.config, &mut NullReport)?
    };

    write_listing(&result.listing, options.output.as_deref())?;

    Ok(Summary {
        words: result.image.len(),
        reachable: result.reachability.reachable_count(),
    })
}

/// Writes `listing` to `path`, or to standard output when `path` is `None`.
///
/// # Errors
///
/// Returns [`CliError::WriteListing`] if the destination cannot be created or written.
pub fn write_listing(listing: &Listing, path: Option<&Path>) -> Result<(), CliError> {
    let result = match path {
        Some(path) => File::create(path).and_then(|file| listing.write_to(BufWriter::new(file))),
        None => listing.write_to(io::stdout().lock()),
    };
    result.map_err(|source| CliError::WriteListing {
        path: path.map_or_else(|| PathBuf::from("-"), Path::to_path_buf),
        source,
    })
}
