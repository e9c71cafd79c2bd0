//! Core of the CHIP-8 reachability disassembler.

/// Opcode groups, operand fields and address/index mapping.
pub mod encoding;
pub use encoding::{
    address_to_index, index_to_address, Fields, OpcodeClass, DEFAULT_LOAD_ADDRESS, MAX_ADDRESS,
    WORD_BYTES,
};

/// Total instruction decoder.
pub mod decoder;
pub use decoder::{AluOp, ControlFlow, Decoder, Instruction, Register};

/// Mnemonic rendering.
pub mod disasm;
pub use disasm::{render, DataWord};

/// Program image loading.
pub mod image;
pub use image::{ProgramImage, MAX_PROGRAM_BYTES};

/// Reachability analysis over the instruction stream.
pub mod analysis;
pub use analysis::{analyze, Reachability, Successors, VisitState, INDEXED_JUMP_SPAN};

/// Listing emitter.
pub mod listing;
pub use listing::{LineKind, Listing, ListingLine};

/// Diagnostic report events and sinks.
pub mod report;
pub use report::{NullReport, RecordingReport, ReportEvent, ReportSink, WriterReport};

/// Configuration errors.
pub mod error;
pub use error::ConfigError;

/// Host-facing configuration and pipeline entry points.
pub mod api;
pub use api::{disassemble, disassemble_image, DisasmConfig, Disassembly};

#[cfg(test)]
use proptest as _;
