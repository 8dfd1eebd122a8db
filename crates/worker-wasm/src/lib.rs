//! WASM-compatible wrapper for adding script text boxes to PPTX files.
//!
//! This crate exposes script preview and conversion to JavaScript so a web
//! page or Cloudflare Worker can supply the script and file bytes and offer
//! the result for download.

use script_core::{parse_script, ConversionRequest, PatchReport, ScriptBlock, DEFAULT_OUTPUT_SUFFIX};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Parsed script, for showing a preview before converting.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScriptPreview {
    /// Number of distinct slides addressed by the script.
    pub slide_count: usize,
    /// Blocks in ascending slide order.
    pub slides: Vec<ScriptBlock>,
}

/// Outcome of a conversion, handed back to JavaScript.
#[wasm_bindgen]
pub struct ConversionResult {
    filename: String,
    archive: Vec<u8>,
    report: PatchReport,
}

#[wasm_bindgen]
impl ConversionResult {
    /// Suggested download name.
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// Bytes of the patched .pptx (a `Uint8Array` on the JS side).
    #[wasm_bindgen(getter)]
    pub fn archive(&self) -> Vec<u8> {
        self.archive.clone()
    }

    /// `{ patched: number[], skipped: [number, string][] }`.
    #[wasm_bindgen(getter)]
    pub fn report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.report)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

/// Parse script text into a preview of the slides it addresses.
#[wasm_bindgen]
pub fn preview_script(script: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&preview_script_impl(script))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn preview_script_impl(script: &str) -> ScriptPreview {
    let mapping = parse_script(script);
    ScriptPreview {
        slide_count: mapping.len(),
        slides: mapping.iter().cloned().collect(),
    }
}

/// Add script text boxes to a presentation.
///
/// # Arguments
/// * `data` - The raw bytes of the .pptx file
/// * `script` - Script text with `[SLIDE N]` blocks
/// * `filename` - The original filename (used to name the output)
///
/// # Returns
/// A `ConversionResult`, or throws with a readable reason.
#[wasm_bindgen]
pub fn convert_presentation(
    data: &[u8],
    script: &str,
    filename: &str,
) -> Result<ConversionResult, JsValue> {
    convert_presentation_impl(data, script, filename).map_err(|e| JsValue::from_str(&e))
}

fn convert_presentation_impl(
    data: &[u8],
    script: &str,
    filename: &str,
) -> Result<ConversionResult, String> {
    let request = ConversionRequest::new(filename, script, data.to_vec());
    let output = script_pptx::convert(&request, DEFAULT_OUTPUT_SUFFIX)
        .map_err(|e| format!("Error processing file: {}", e))?;

    Ok(ConversionResult {
        filename: output.filename,
        archive: output.archive,
        report: output.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_script() {
        let preview = preview_script_impl("[SLIDE 3]\nC\n[SLIDE 1]\nA\nbody");

        assert_eq!(preview.slide_count, 2);
        assert_eq!(preview.slides[0], ScriptBlock::new(1, "A", "body"));
        assert_eq!(preview.slides[1], ScriptBlock::new(3, "C", ""));
    }

    #[test]
    fn test_convert_reports_reason() {
        let err = convert_presentation_impl(b"not a zip", "[SLIDE 1]\nA", "deck.pptx")
            .err()
            .unwrap();
        assert!(err.starts_with("Error processing file:"));

        let err = convert_presentation_impl(b"PK\x03\x04", "", "deck.pptx")
            .err()
            .unwrap();
        assert!(err.contains("No slide content"));
    }
}
