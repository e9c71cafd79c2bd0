//! Listing emitter.

use std::fmt;
use std::io::{self, Write};

use crate::analysis::Reachability;
use crate::decoder::{Decoder, Instruction};
use crate::disasm::DataWord;
use crate::encoding::index_to_address;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a listing line presents its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineKind {
    /// Reachable word, shown as its decoded instruction.
    Code(Instruction),
    /// Unreachable word, shown as a data directive.
    Data,
}

/// One word of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListingLine {
    /// Memory address of the word.
    pub address: usize,
    /// Raw word value.
    pub word: u16,
    /// Presentation of the word.
    pub kind: LineKind,
}

impl ListingLine {
    /// Returns true if the word is shown as code.
    #[must_use]
    pub const fn is_code(&self) -> bool {
        matches!(self.kind, LineKind::Code(_))
    }

    /// Returns the text after the address column.
    #[must_use]
    pub fn text(&self) -> String {
        match self.kind {
            LineKind::Code(instruction) => instruction.to_string(),
            LineKind::Data => DataWord(self.word).to_string(),
        }
    }
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LineKind::Code(instruction) => write!(f, "{:03X}: {instruction}", self.address),
            LineKind::Data => write!(f, "{:03X}: {}", self.address, DataWord(self.word)),
        }
    }
}

/// A complete listing in ascending address order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Listing {
    lines: Vec<ListingLine>,
}

impl Listing {
    /// Builds the listing for `words` using a finished analysis.
    ///
    /// Words the analysis reached are decoded; all others become data.
    #[must_use]
    pub fn build(words: &[u16], reachability: &Reachability, load_address: u16) -> Self {
        let lines = words
            .iter()
            .enumerate()
            .map(|(index, &word)| ListingLine {
                address: index_to_address(load_address, index),
                word,
                kind: if reachability.is_reachable(index) {
                    LineKind::Code(Decoder::decode(word))
                } else {
                    LineKind::Data
                },
            })
            .collect();
        Self { lines }
    }

    /// Returns the lines in address order.
    #[must_use]
    pub fn lines(&self) -> &[ListingLine] {
        &self.lines
    }

    /// Writes one line per word to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any error from `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::encoding::DEFAULT_LOAD_ADDRESS;

    fn listing_of(words: &[u16]) -> Listing {
        let reachability = analyze(words, 0, DEFAULT_LOAD_ADDRESS);
        Listing::build(words, &reachability, DEFAULT_LOAD_ADDRESS)
    }

    #[test]
    fn clear_then_jump_to_self() {
        let listing = listing_of(&[0x00E0, 0x1200]);
        assert_eq!(listing.lines().len(), 2);
        assert!(listing.lines().iter().all(ListingLine::is_code));
        assert_eq!(listing.to_string(), "200: clr\n202: jmp 200\n");
    }

    #[test]
    fn unreachable_words_are_data() {
        let listing = listing_of(&[0x1204, 0xF0F0, 0x1204]);
        assert_eq!(
            listing.to_string(),
            "200: jmp 204\n202: db  F0F0\n204: jmp 204\n"
        );
        assert_eq!(listing.lines()[1].text(), "db  F0F0");
        assert!(!listing.lines()[1].is_code());
    }

    #[test]
    fn reachable_unknown_encoding_still_renders_as_data() {
        let listing = listing_of(&[0xE1A2, 0x1202]);
        assert!(listing.lines()[0].is_code());
        assert_eq!(listing.lines()[0].text(), "db  E1A2");
    }

    #[test]
    fn write_to_matches_display() {
        let listing = listing_of(&[0x00E0, 0x1200]);
        let mut out = Vec::new();
        listing.write_to(&mut out).expect("vec writer");
        assert_eq!(String::from_utf8(out).expect("utf8"), listing.to_string());
    }

    #[test]
    fn addresses_wider_than_three_digits_are_not_truncated() {
        let words = vec![0x1000u16; 0x800];
        let reachability = analyze(&words, 0, 0xF00);
        let listing = Listing::build(&words, &reachability, 0xF00);
        let last = listing.lines().last().expect("non-empty");
        assert_eq!(last.address, 0xF00 + 2 * 0x7FF);
        assert!(last.to_string().starts_with("1EFE: "));
    }
}
