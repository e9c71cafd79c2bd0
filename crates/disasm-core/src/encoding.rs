/// Primary opcode groups selected by the top nibble (bits 15..12) of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum OpcodeClass {
    System = 0x0,
    Jump = 0x1,
    Call = 0x2,
    SkipEqImmediate = 0x3,
    SkipNeImmediate = 0x4,
    SkipEqRegister = 0x5,
    LoadImmediate = 0x6,
    AddImmediate = 0x7,
    Arithmetic = 0x8,
    SkipNeRegister = 0x9,
    LoadIndex = 0xA,
    JumpIndexed = 0xB,
    Random = 0xC,
    Draw = 0xD,
    Key = 0xE,
    Misc = 0xF,
}

impl OpcodeClass {
    /// Converts the low nibble of `op` into its primary opcode class.
    ///
    /// Bits above the low nibble are ignored, so every input maps to a class.
    #[must_use]
    pub const fn from_nibble(op: u8) -> Self {
        match op & 0xF {
            0x0 => Self::System,
            0x1 => Self::Jump,
            0x2 => Self::Call,
            0x3 => Self::SkipEqImmediate,
            0x4 => Self::SkipNeImmediate,
            0x5 => Self::SkipEqRegister,
            0x6 => Self::LoadImmediate,
            0x7 => Self::AddImmediate,
            0x8 => Self::Arithmetic,
            0x9 => Self::SkipNeRegister,
            0xA => Self::LoadIndex,
            0xB => Self::JumpIndexed,
            0xC => Self::Random,
            0xD => Self::Draw,
            0xE => Self::Key,
            // 0xF is the only value left after masking.
            _ => Self::Misc,
        }
    }
}

/// Operand fields of an instruction word.
///
/// All fields are views over the same 16 bits; which ones are meaningful
/// depends on the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fields {
    /// Bits 15..12.
    pub opcode: u8,
    /// Bits 11..8, usually the first register operand.
    pub x: u8,
    /// Bits 7..4, usually the second register operand.
    pub y: u8,
    /// Bits 3..0.
    pub nibble: u8,
    /// Bits 11..0.
    pub address: u16,
    /// Bits 7..0.
    pub byte: u8,
}

impl Fields {
    /// Splits a word into its operand fields.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn of(word: u16) -> Self {
        Self {
            opcode: ((word >> 12) & 0xF) as u8,
            x: ((word >> 8) & 0xF) as u8,
            y: ((word >> 4) & 0xF) as u8,
            nibble: (word & 0xF) as u8,
            address: word & 0x0FFF,
            byte: (word & 0xFF) as u8,
        }
    }

    /// Returns the primary opcode class of these fields.
    #[must_use]
    pub const fn class(self) -> OpcodeClass {
        OpcodeClass::from_nibble(self.opcode)
    }
}

/// Address at which CHIP-8 programs are conventionally loaded.
pub const DEFAULT_LOAD_ADDRESS: u16 = 0x200;

/// Highest address reachable by the 12-bit address field.
pub const MAX_ADDRESS: u16 = 0x0FFF;

/// Size in bytes of every instruction word.
pub const WORD_BYTES: usize = 2;

/// Returns the memory address of the word at `index` for an image loaded at `load_address`.
#[must_use]
pub const fn index_to_address(load_address: u16, index: usize) -> usize {
    load_address as usize + WORD_BYTES * index
}

/// Returns the (possibly negative) word index addressed by `address`.
///
/// The division rounds toward negative infinity, so an odd address maps to
/// the word that contains it and any address below `load_address` yields a
/// negative index.
#[must_use]
pub const fn address_to_index(load_address: u16, address: u16) -> isize {
    let offset = address as isize - load_address as isize;
    offset.div_euclid(WORD_BYTES as isize)
}

#[cfg(test)]
mod tests {
    use super::{address_to_index, index_to_address, Fields, OpcodeClass, DEFAULT_LOAD_ADDRESS};

    #[test]
    fn fields_split_every_view() {
        let fields = Fields::of(0xD4A7);
        assert_eq!(fields.opcode, 0xD);
        assert_eq!(fields.x, 0x4);
        assert_eq!(fields.y, 0xA);
        assert_eq!(fields.nibble, 0x7);
        assert_eq!(fields.address, 0x4A7);
        assert_eq!(fields.byte, 0xA7);
        assert_eq!(fields.class(), OpcodeClass::Draw);
    }

    #[test]
    fn every_nibble_has_a_class() {
        for op in 0u8..=0xF {
            assert_eq!(OpcodeClass::from_nibble(op) as u8, op);
        }
    }

    #[test]
    fn high_bits_are_ignored_by_class_lookup() {
        assert_eq!(OpcodeClass::from_nibble(0x1F), OpcodeClass::Misc);
        assert_eq!(OpcodeClass::from_nibble(0xF0), OpcodeClass::System);
        assert_eq!(OpcodeClass::from_nibble(0xAB), OpcodeClass::JumpIndexed);
        for word in [0x0000u16, 0x1234, 0x8FFE, 0xF065] {
            let fields = Fields::of(word);
            assert_eq!(fields.class() as u8, fields.opcode);
        }
    }

    #[test]
    fn index_and_address_map_both_ways() {
        assert_eq!(index_to_address(DEFAULT_LOAD_ADDRESS, 0), 0x200);
        assert_eq!(index_to_address(DEFAULT_LOAD_ADDRESS, 3), 0x206);
        assert_eq!(address_to_index(DEFAULT_LOAD_ADDRESS, 0x200), 0);
        assert_eq!(address_to_index(DEFAULT_LOAD_ADDRESS, 0x206), 3);
    }

    #[test]
    fn odd_and_low_addresses_round_down() {
        assert_eq!(address_to_index(DEFAULT_LOAD_ADDRESS, 0x203), 1);
        assert_eq!(address_to_index(DEFAULT_LOAD_ADDRESS, 0x1FF), -1);
        assert_eq!(address_to_index(DEFAULT_LOAD_ADDRESS, 0x1FE), -1);
        assert_eq!(address_to_index(DEFAULT_LOAD_ADDRESS, 0x000), -256);
    }
}
