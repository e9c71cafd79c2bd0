//! CHIP-8 disassembler front end.

use env_logger as _;

/// Error types reported by the `c8dasm` binary.
pub mod errors;
/// ROM loading, report routing and listing output.
pub mod pipeline;
