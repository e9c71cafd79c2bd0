//! Public entry points for hosts embedding the disassembler.

use crate::analysis::{analyze, Reachability};
use crate::encoding::{index_to_address, DEFAULT_LOAD_ADDRESS, MAX_ADDRESS, WORD_BYTES};
use crate::error::ConfigError;
use crate::image::ProgramImage;
use crate::listing::Listing;
use crate::report::{ReportEvent, ReportSink};

/// Configuration for a disassembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DisasmConfig {
    /// Address of the first word of the image.
    pub load_address: u16,
    /// Word index at which execution starts.
    pub entry_index: usize,
}

impl Default for DisasmConfig {
    fn default() -> Self {
        Self {
            load_address: DEFAULT_LOAD_ADDRESS,
            entry_index: 0,
        }
    }
}

impl DisasmConfig {
    /// Checks that the load address is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for odd load addresses or addresses above `0xFFF`.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.load_address > MAX_ADDRESS {
            return Err(ConfigError::LoadAddressOutOfRange(self.load_address));
        }
        if self.load_address as usize % WORD_BYTES != 0 {
            return Err(ConfigError::UnalignedLoadAddress(self.load_address));
        }
        Ok(())
    }
}

/// Everything produced by one disassembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// The loaded image.
    pub image: ProgramImage,
    /// Per-word classification.
    pub reachability: Reachability,
    /// The rendered listing.
    pub listing: Listing,
}

/// Loads `bytes`, classifies every word and builds the listing.
///
/// Progress and the classification table are sent to `sink` before the
/// listing is built.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` fails [`DisasmConfig::validate`].
pub fn disassemble(
    bytes: &[u8],
    config: &DisasmConfig,
    sink: &mut dyn ReportSink,
) -> Result<Disassembly, ConfigError> {
    config.validate()?;
    Ok(disassemble_image(
        ProgramImage::from_bytes(bytes),
        config,
        sink,
    ))
}

/// Classifies and lists an already loaded image.
///
/// The configuration is not validated here; see [`disassemble`].
pub fn disassemble_image(
    image: ProgramImage,
    config: &DisasmConfig,
    sink: &mut dyn ReportSink,
) -> Disassembly {
    sink.on_event(ReportEvent::AnalysisStarted { words: image.len() });
    let reachability = analyze(image.words(), config.entry_index, config.load_address);
    sink.on_event(ReportEvent::AnalysisFinished {
        reachable: reachability.reachable_count(),
        total: image.len(),
    });

    for (index, &word) in image.words().iter().enumerate() {
        sink.on_event(ReportEvent::Classified {
            index,
            address: index_to_address(config.load_address, index),
            word,
            reachable: reachability.is_reachable(index),
        });
    }
    if let Some(byte) = image.trailing_byte() {
        sink.on_event(ReportEvent::TrailingByte { byte });
    }

    let listing = Listing::build(image.words(), &reachability, config.load_address);
    Disassembly {
        image,
        reachability,
        listing,
    }
}
