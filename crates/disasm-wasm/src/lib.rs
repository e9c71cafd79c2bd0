use disasm_core::{disassemble, ConfigError, DisasmConfig, Disassembly, RecordingReport, ReportEvent};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (debug_log(&format!($($t)*)))
}

/// JS-compatible listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmListingRow {
    pub address: usize,
    pub word: u16,
    pub reachable: bool,
    pub text: String,
}

/// JS-compatible result of a disassembly run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmDisassembly {
    pub rows: Vec<WasmListingRow>,
    pub reachable: usize,
    pub trailing_byte: Option<u8>,
    pub report: Vec<ReportEvent>,
}

fn rows_of(result: &Disassembly) -> Vec<WasmListingRow> {
    result
        .listing
        .lines()
        .iter()
        .map(|line| WasmListingRow {
            address: line.address,
            word: line.word,
            reachable: line.is_code(),
            text: line.text(),
        })
        .collect()
}

fn run(program: &[u8], load_address: u16) -> Result<WasmDisassembly, ConfigError> {
    let config = DisasmConfig {
        load_address,
        ..DisasmConfig::default()
    };
    let mut report = RecordingReport::default();
    let result = disassemble(program, &config, &mut report)?;
    Ok(WasmDisassembly {
        rows: rows_of(&result),
        reachable: result.reachability.reachable_count(),
        trailing_byte: result.image.trailing_byte(),
        report: report.events,
    })
}

#[wasm_bindgen]
pub struct WasmDisassembler {
    load_address: u16,
}

#[wasm_bindgen]
impl WasmDisassembler {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            load_address: disasm_core::DEFAULT_LOAD_ADDRESS,
        }
    }

    /// Sets the address the next program is assumed to load at.
    pub fn set_load_address(&mut self, load_address: u16) {
        self.load_address = load_address;
    }

    /// Disassembles a ROM.
    /// Returns a `WasmDisassembly` as a JSON object.
    pub fn disassemble(&self, program: &[u8]) -> Result<JsValue, JsValue> {
        let result = run(program, self.load_address).map_err(|e| JsValue::from_str(&e.to_string()))?;
        console_log!(
            "Disassembled {} words, {} reachable",
            result.rows.len(),
            result.reachable
        );
        serde_wasm_bindgen::to_value(&result).map_err(Into::into)
    }

    /// Returns the listing as plain text, one line per word.
    pub fn listing_text(&self, program: &[u8]) -> Result<String, JsValue> {
        let config = DisasmConfig {
            load_address: self.load_address,
            ..DisasmConfig::default()
        };
        disassemble(program, &config, &mut disasm_core::NullReport)
            .map(|result| result.listing.to_string())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the ROM words as a Uint16Array.
    pub fn words(&self, program: &[u8]) -> js_sys::Uint16Array {
        let image = disasm_core::ProgramImage::from_bytes(program);
        js_sys::Uint16Array::from(image.words())
    }
}

impl Default for WasmDisassembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs a message to the browser console through `web-sys`.
#[wasm_bindgen]
pub fn debug_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
