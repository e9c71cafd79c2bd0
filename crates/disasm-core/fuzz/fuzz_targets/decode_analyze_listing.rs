#![no_main]

use disasm_core::{
    analyze, disassemble, render, Decoder, DisasmConfig, NullReport, ProgramImage,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let word = u16::from_be_bytes([data[0], data[1]]);
    let instruction = Decoder::decode(word);
    let text = render(word);
    assert!(!text.is_empty());
    assert_eq!(instruction.to_string(), text);
    assert_eq!(instruction.is_unknown(), text == format!("db  {word:04X}"));

    let image = ProgramImage::from_bytes(&data[2..]);
    let first = analyze(image.words(), 0, 0x200);
    let second = analyze(image.words(), 0, 0x200);
    assert_eq!(first, second);
    assert!(first.visit_order().len() <= image.len());

    let config = DisasmConfig {
        load_address: u16::from(data[0] & 0x0E) << 8,
        entry_index: usize::from(data[1]),
    };
    if let Ok(result) = disassemble(&data[2..], &config, &mut NullReport) {
        assert_eq!(result.listing.lines().len(), image.len());
    }
});
