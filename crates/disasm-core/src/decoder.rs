//! Instruction decoder for the CHIP-8 instruction set.
//!
//! Every 16-bit word decodes to some [`Instruction`]. Encodings that are not
//! assigned within their opcode group become [`Instruction::Unknown`], which
//! keeps the raw word so it can still be shown to a reader.

use std::fmt;

use crate::encoding::{Fields, OpcodeClass};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the sixteen general purpose registers `V0`..`VF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Register(u8);

impl Register {
    /// `V0`, the offset register of indexed jumps.
    pub const V0: Self = Self(0);
    /// `VF`, the flag register.
    pub const VF: Self = Self(0xF);

    /// Converts a 4-bit register field into a register.
    #[must_use]
    pub const fn from_u4(value: u8) -> Option<Self> {
        if value <= 0xF {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the register number.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    const fn from_field(value: u8) -> Self {
        Self(value & 0xF)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

/// Register-to-register operations of the `8XYN` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum AluOp {
    Mov,
    Or,
    And,
    Xor,
    Add,
    Sub,
    Shr,
    ReverseSub,
    Shl,
}

impl AluOp {
    /// Converts the low nibble of an `8XYN` word into an operation.
    #[must_use]
    pub const fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0x0 => Some(Self::Mov),
            0x1 => Some(Self::Or),
            0x2 => Some(Self::And),
            0x3 => Some(Self::Xor),
            0x4 => Some(Self::Add),
            0x5 => Some(Self::Sub),
            0x6 => Some(Self::Shr),
            0x7 => Some(Self::ReverseSub),
            0xE => Some(Self::Shl),
            _ => None,
        }
    }

    /// Returns the listing mnemonic, padded to three columns.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mov => "mov",
            Self::Or => "or ",
            Self::And => "and",
            Self::Xor => "xor",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Shr => "shr",
            Self::ReverseSub => "rsu",
            Self::Shl => "shl",
        }
    }
}

/// A decoded CHIP-8 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum Instruction {
    /// `00E0`
    ClearScreen,
    /// `00EE`
    Return,
    /// `0NNN`, a call into native machine code.
    MachineCall { address: u16 },
    /// `1NNN`
    Jump { address: u16 },
    /// `2NNN`
    Call { address: u16 },
    /// `3XKK`
    SkipEqImmediate { x: Register, byte: u8 },
    /// `4XKK`
    SkipNeImmediate { x: Register, byte: u8 },
    /// `5XY0`; the low nibble is not checked.
    SkipEqRegister { x: Register, y: Register },
    /// `9XY0`; the low nibble is not checked.
    SkipNeRegister { x: Register, y: Register },
    /// `6XKK`
    LoadImmediate { x: Register, byte: u8 },
    /// `7XKK`
    AddImmediate { x: Register, byte: u8 },
    /// `8XYN`
    Alu { op: AluOp, x: Register, y: Register },
    /// `ANNN`
    LoadIndex { address: u16 },
    /// `BNNN`, jump to `NNN + V0`.
    JumpIndexed { address: u16 },
    /// `CXKK`
    Random { x: Register, mask: u8 },
    /// `DXYN`
    Draw { x: Register, y: Register, height: u8 },
    /// `EX9E`
    SkipKeyDown { x: Register },
    /// `EXA1`
    SkipKeyUp { x: Register },
    /// `FX07`
    GetDelay { x: Register },
    /// `FX0A`
    WaitKey { x: Register },
    /// `FX15`
    SetDelay { x: Register },
    /// `FX18`
    SetSound { x: Register },
    /// `FX1E`
    AddIndex { x: Register },
    /// `FX29`
    FontChar { x: Register },
    /// `FX33`
    Bcd { x: Register },
    /// `FX55`
    Dump { x: Register },
    /// `FX65`
    Load { x: Register },
    /// An unassigned encoding inside a known opcode group.
    Unknown { word: u16 },
}

/// How an instruction hands control to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlFlow {
    /// Execution continues with the next word.
    FallThrough,
    /// Unconditional transfer to an address; the next word is not reached.
    Jump(u16),
    /// Subroutine call; execution resumes at the next word after the callee returns.
    Call(u16),
    /// Conditionally skips the next word.
    Skip,
    /// Transfer to an address plus the run-time value of `V0`.
    IndexedJump(u16),
}

impl Instruction {
    /// Returns the control flow effect used by reachability analysis.
    ///
    /// `Return` falls through: the analysis does not model the call stack and
    /// keeps walking the words that follow a return.
    #[must_use]
    pub const fn control_flow(self) -> ControlFlow {
        match self {
            Self::Jump { address } => ControlFlow::Jump(address),
            Self::Call { address } => ControlFlow::Call(address),
            Self::JumpIndexed { address } => ControlFlow::IndexedJump(address),
            Self::SkipEqImmediate { .. }
            | Self::SkipNeImmediate { .. }
            | Self::SkipEqRegister { .. }
            | Self::SkipNeRegister { .. }
            | Self::SkipKeyDown { .. }
            | Self::SkipKeyUp { .. } => ControlFlow::Skip,
            _ => ControlFlow::FallThrough,
        }
    }

    /// Returns true for encodings the decoder could not assign.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

/// Instruction decoder for CHIP-8 words.
pub struct Decoder;

impl Decoder {
    /// Decodes a 16-bit instruction word.
    ///
    /// Dispatches on the opcode nibble and then, for the `0`, `8`, `E` and `F`
    /// groups, on the secondary field. Never fails.
    #[must_use]
    pub const fn decode(word: u16) -> Instruction {
        let fields = Fields::of(word);
        let x = Register::from_field(fields.x);
        let y = Register::from_field(fields.y);

        match fields.class() {
            OpcodeClass::System => match fields.address {
                0x0E0 => Instruction::ClearScreen,
                0x0EE => Instruction::Return,
                address => Instruction::MachineCall { address },
            },
            OpcodeClass::Jump => Instruction::Jump {
                address: fields.address,
            },
            OpcodeClass::Call => Instruction::Call {
                address: fields.address,
            },
            OpcodeClass::SkipEqImmediate => Instruction::SkipEqImmediate {
                x,
                byte: fields.byte,
            },
            OpcodeClass::SkipNeImmediate => Instruction::SkipNeImmediate {
                x,
                byte: fields.byte,
            },
            OpcodeClass::SkipEqRegister => Instruction::SkipEqRegister { x, y },
            OpcodeClass::LoadImmediate => Instruction::LoadImmediate {
                x,
                byte: fields.byte,
            },
            OpcodeClass::AddImmediate => Instruction::AddImmediate {
                x,
                byte: fields.byte,
            },
            OpcodeClass::Arithmetic => match AluOp::from_nibble(fields.nibble) {
                Some(op) => Instruction::Alu { op, x, y },
                None => Instruction::Unknown { word },
            },
            OpcodeClass::SkipNeRegister => Instruction::SkipNeRegister { x, y },
            OpcodeClass::LoadIndex => Instruction::LoadIndex {
                address: fields.address,
            },
            OpcodeClass::JumpIndexed => Instruction::JumpIndexed {
                address: fields.address,
            },
            OpcodeClass::Random => Instruction::Random {
                x,
                mask: fields.byte,
            },
            OpcodeClass::Draw => Instruction::Draw {
                x,
                y,
                height: fields.nibble,
            },
            OpcodeClass::Key => match fields.byte {
                0x9E => Instruction::SkipKeyDown { x },
                0xA1 => Instruction::SkipKeyUp { x },
                _ => Instruction::Unknown { word },
            },
            OpcodeClass::Misc => match fields.byte {
                0x07 => Instruction::GetDelay { x },
                0x0A => Instruction::WaitKey { x },
                0x15 => Instruction::SetDelay { x },
                0x18 => Instruction::SetSound { x },
                0x1E => Instruction::AddIndex { x },
                0x29 => Instruction::FontChar { x },
                0x33 => Instruction::Bcd { x },
                0x55 => Instruction::Dump { x },
                0x65 => Instruction::Load { x },
                _ => Instruction::Unknown { word },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(n: u8) -> Register {
        Register::from_u4(n).expect("register in range")
    }

    #[rstest]
    #[case(0x00E0, Instruction::ClearScreen)]
    #[case(0x00EE, Instruction::Return)]
    #[case(0x0123, Instruction::MachineCall { address: 0x123 })]
    #[case(0x1ABC, Instruction::Jump { address: 0xABC })]
    #[case(0x2ABC, Instruction::Call { address: 0xABC })]
    #[case(0x3A42, Instruction::SkipEqImmediate { x: v(0xA), byte: 0x42 })]
    #[case(0x4A42, Instruction::SkipNeImmediate { x: v(0xA), byte: 0x42 })]
    #[case(0x5AB0, Instruction::SkipEqRegister { x: v(0xA), y: v(0xB) })]
    #[case(0x6312, Instruction::LoadImmediate { x: v(3), byte: 0x12 })]
    #[case(0x7312, Instruction::AddImmediate { x: v(3), byte: 0x12 })]
    #[case(0x8126, Instruction::Alu { op: AluOp::Shr, x: v(1), y: v(2) })]
    #[case(0x812E, Instruction::Alu { op: AluOp::Shl, x: v(1), y: v(2) })]
    #[case(0x9AB0, Instruction::SkipNeRegister { x: v(0xA), y: v(0xB) })]
    #[case(0xA123, Instruction::LoadIndex { address: 0x123 })]
    #[case(0xB123, Instruction::JumpIndexed { address: 0x123 })]
    #[case(0xC50F, Instruction::Random { x: v(5), mask: 0x0F })]
    #[case(0xD125, Instruction::Draw { x: v(1), y: v(2), height: 5 })]
    #[case(0xE79E, Instruction::SkipKeyDown { x: v(7) })]
    #[case(0xE7A1, Instruction::SkipKeyUp { x: v(7) })]
    #[case(0xF307, Instruction::GetDelay { x: v(3) })]
    #[case(0xF30A, Instruction::WaitKey { x: v(3) })]
    #[case(0xF315, Instruction::SetDelay { x: v(3) })]
    #[case(0xF318, Instruction::SetSound { x: v(3) })]
    #[case(0xF31E, Instruction::AddIndex { x: v(3) })]
    #[case(0xF329, Instruction::FontChar { x: v(3) })]
    #[case(0xF333, Instruction::Bcd { x: v(3) })]
    #[case(0xF355, Instruction::Dump { x: v(3) })]
    #[case(0xF365, Instruction::Load { x: v(3) })]
    fn decodes_assigned_encodings(#[case] word: u16, #[case] expected: Instruction) {
        assert_eq!(Decoder::decode(word), expected);
    }

    #[rstest]
    #[case(0x8128)]
    #[case(0x812D)]
    #[case(0x812F)]
    #[case(0xE100)]
    #[case(0xE19F)]
    #[case(0xF100)]
    #[case(0xF1FF)]
    fn unassigned_secondary_fields_decode_as_unknown(#[case] word: u16) {
        assert_eq!(Decoder::decode(word), Instruction::Unknown { word });
    }

    #[test]
    fn every_arithmetic_nibble_is_classified() {
        for nibble in 0u16..=0xF {
            let decoded = Decoder::decode(0x8120 | nibble);
            let assigned = matches!(nibble, 0x0..=0x7 | 0xE);
            assert_eq!(!decoded.is_unknown(), assigned, "nibble {nibble:X}");
        }
    }

    #[test]
    fn control_flow_follows_instruction_kind() {
        assert_eq!(
            Decoder::decode(0x1208).control_flow(),
            ControlFlow::Jump(0x208)
        );
        assert_eq!(
            Decoder::decode(0x2208).control_flow(),
            ControlFlow::Call(0x208)
        );
        assert_eq!(
            Decoder::decode(0xB300).control_flow(),
            ControlFlow::IndexedJump(0x300)
        );
        for word in [0x3000, 0x4000, 0x5010, 0x9010, 0xE09E, 0xE0A1] {
            assert_eq!(
                Decoder::decode(word).control_flow(),
                ControlFlow::Skip,
                "{word:04X}"
            );
        }
        for word in [0x00EE, 0x00E0, 0x0123, 0xE0A2, 0xF065, 0x812F] {
            assert_eq!(
                Decoder::decode(word).control_flow(),
                ControlFlow::FallThrough,
                "{word:04X}"
            );
        }
    }

    #[test]
    fn register_display_uses_single_hex_digit() {
        assert_eq!(Register::V0.to_string(), "V0");
        assert_eq!(Register::VF.to_string(), "VF");
        assert_eq!(v(0xA).index(), 0xA);
        assert_eq!(Register::from_u4(0x10), None);
    }

    #[test]
    fn exhaustive_decode_keeps_unknown_words_intact() {
        for word in 0u16..=u16::MAX {
            if let Instruction::Unknown { word: raw } = Decoder::decode(word) {
                assert_eq!(raw, word);
                let opcode = word >> 12;
                assert!(
                    matches!(opcode, 0x8 | 0xE | 0xF),
                    "unexpected unknown in group {opcode:X}"
                );
            }
        }
    }
}
