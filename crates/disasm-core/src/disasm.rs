//! Mnemonic rendering for decoded CHIP-8 instructions.
//!
//! Mnemonics are three letters wide, operands are upper-case hex without a
//! prefix, and anything that is not an instruction is written as a `db`
//! directive holding the raw word.

use std::fmt;

use crate::decoder::{Decoder, Instruction};

/// Wraps a raw word so it renders as a data directive (`db  WWWW`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataWord(pub u16);

impl fmt::Display for DataWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "db  {:04X}", self.0)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ClearScreen => f.write_str("clr"),
            Self::Return => f.write_str("ret"),
            Self::MachineCall { address } => write!(f, "njp {address:03X} ; db 0{address:03X}"),
            Self::Jump { address } => write!(f, "jmp {address:03X}"),
            Self::Call { address } => write!(f, "cll {address:03X}"),
            Self::SkipEqImmediate { x, byte } => write!(f, "seq {x}, {byte:02X}"),
            Self::SkipNeImmediate { x, byte } => write!(f, "sne {x}, {byte:02X}"),
            Self::SkipEqRegister { x, y } => write!(f, "seq {x}, {y}"),
            Self::SkipNeRegister { x, y } => write!(f, "sne {x}, {y}"),
            Self::LoadImmediate { x, byte } => write!(f, "mov {x}, {byte:02X}"),
            Self::AddImmediate { x, byte } => write!(f, "add {x}, {byte:02X}"),
            Self::Alu { op, x, y } => write!(f, "{} {x}, {y}", op.mnemonic()),
            Self::LoadIndex { address } => write!(f, "mov I, {address:03X}"),
            Self::JumpIndexed { address } => write!(f, "jmp [{address:03X} + V0]"),
            Self::Random { x, mask } => write!(f, "mov {x}, [random & {mask:02X}]"),
            Self::Draw { x, y, height } => write!(f, "drw {x}, {y}, {height:01X}"),
            Self::SkipKeyDown { x } => write!(f, "skd {:01X}", x.index()),
            Self::SkipKeyUp { x } => write!(f, "sku {:01X}", x.index()),
            Self::GetDelay { x } => write!(f, "mov {x}, DL"),
            Self::WaitKey { x } => write!(f, "wky {x}"),
            Self::SetDelay { x } => write!(f, "mov DL, {x}"),
            Self::SetSound { x } => write!(f, "mov SN, {x}"),
            Self::AddIndex { x } => write!(f, "mov I,  {x}"),
            Self::FontChar { x } => write!(f, "fnt I,  {x}"),
            Self::Bcd { x } => write!(f, "bcd {x}"),
            Self::Dump { x } => write!(f, "dump V0..{x}"),
            Self::Load { x } => write!(f, "load V0..{x}"),
            Self::Unknown { word } => fmt::Display::fmt(&DataWord(word), f),
        }
    }
}

/// Decodes `word` and renders its mnemonic.
#[must_use]
pub fn render(word: u16) -> String {
    Decoder::decode(word).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x00E0, "clr")]
    #[case(0x00EE, "ret")]
    #[case(0x0ABC, "njp ABC ; db 0ABC")]
    #[case(0x1200, "jmp 200")]
    #[case(0x22F0, "cll 2F0")]
    #[case(0x3A0F, "seq VA, 0F")]
    #[case(0x4B10, "sne VB, 10")]
    #[case(0x5120, "seq V1, V2")]
    #[case(0x9120, "sne V1, V2")]
    #[case(0x6C7F, "mov VC, 7F")]
    #[case(0x7D01, "add VD, 01")]
    #[case(0x8120, "mov V1, V2")]
    #[case(0x8121, "or  V1, V2")]
    #[case(0x8122, "and V1, V2")]
    #[case(0x8123, "xor V1, V2")]
    #[case(0x8124, "add V1, V2")]
    #[case(0x8125, "sub V1, V2")]
    #[case(0x8126, "shr V1, V2")]
    #[case(0x8127, "rsu V1, V2")]
    #[case(0x812E, "shl V1, V2")]
    #[case(0x8129, "db  8129")]
    #[case(0xA2EA, "mov I, 2EA")]
    #[case(0xB208, "jmp [208 + V0]")]
    #[case(0xC30F, "mov V3, [random & 0F]")]
    #[case(0xD01F, "drw V0, V1, F")]
    #[case(0xE49E, "skd 4")]
    #[case(0xE4A1, "sku 4")]
    #[case(0xE4A2, "db  E4A2")]
    #[case(0xF507, "mov V5, DL")]
    #[case(0xF50A, "wky V5")]
    #[case(0xF515, "mov DL, V5")]
    #[case(0xF518, "mov SN, V5")]
    #[case(0xF51E, "mov I,  V5")]
    #[case(0xF529, "fnt I,  V5")]
    #[case(0xF533, "bcd V5")]
    #[case(0xF555, "dump V0..V5")]
    #[case(0xF565, "load V0..V5")]
    #[case(0xF5FF, "db  F5FF")]
    fn renders_listing_mnemonics(#[case] word: u16, #[case] expected: &str) {
        assert_eq!(render(word), expected);
    }

    #[test]
    fn data_word_pads_to_four_digits() {
        assert_eq!(DataWord(0x00AB).to_string(), "db  00AB");
        assert_eq!(DataWord(0xFFFF).to_string(), "db  FFFF");
    }

    #[test]
    fn every_word_renders_non_empty() {
        for word in 0u16..=u16::MAX {
            assert!(!render(word).is_empty(), "{word:04X} rendered empty");
        }
    }
}
