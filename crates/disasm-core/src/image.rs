//! Program image loading.

use crate::encoding::WORD_BYTES;

/// Bytes of program memory available to a CHIP-8 program loaded at `0x200`.
pub const MAX_PROGRAM_BYTES: usize = 0xE00;

/// A ROM split into big-endian instruction words.
///
/// A final odd byte cannot form a word; it is kept aside and never decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramImage {
    words: Vec<u16>,
    trailing_byte: Option<u8>,
}

impl ProgramImage {
    /// Splits raw ROM bytes into words.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let chunks = bytes.chunks_exact(WORD_BYTES);
        let trailing_byte = chunks.remainder().first().copied();
        let words = chunks
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        if bytes.len() > MAX_PROGRAM_BYTES {
            log::warn!(
                "image is {} bytes, larger than the {MAX_PROGRAM_BYTES} bytes of CHIP-8 program memory",
                bytes.len()
            );
        }
        if let Some(byte) = trailing_byte {
            log::warn!("ignoring dangling trailing byte {byte:02X}");
        }

        Self {
            words,
            trailing_byte,
        }
    }

    /// Builds an image directly from words.
    #[must_use]
    pub const fn from_words(words: Vec<u16>) -> Self {
        Self {
            words,
            trailing_byte: None,
        }
    }

    /// Returns the instruction words in address order.
    #[must_use]
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Returns the byte left over after the last full word, if any.
    #[must_use]
    pub const fn trailing_byte(&self) -> Option<u8> {
        self.trailing_byte
    }

    /// Returns the number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the image holds no complete word.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ProgramImage;

    #[test]
    fn words_are_big_endian() {
        let image = ProgramImage::from_bytes(&[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(image.words(), &[0x00E0, 0x1200]);
        assert_eq!(image.trailing_byte(), None);
        assert_eq!(image.len(), 2);
    }

    #[test]
    fn odd_trailing_byte_is_not_a_word() {
        let image = ProgramImage::from_bytes(&[0x00, 0xE0, 0x12]);
        assert_eq!(image.words(), &[0x00E0]);
        assert_eq!(image.trailing_byte(), Some(0x12));
    }

    #[test]
    fn single_byte_yields_empty_image() {
        let image = ProgramImage::from_bytes(&[0xAB]);
        assert!(image.is_empty());
        assert_eq!(image.trailing_byte(), Some(0xAB));
    }

    #[test]
    fn oversized_images_are_still_loaded() {
        let bytes = vec![0u8; super::MAX_PROGRAM_BYTES + 4];
        let image = ProgramImage::from_bytes(&bytes);
        assert_eq!(image.len(), super::MAX_PROGRAM_BYTES / 2 + 2);
    }
}
