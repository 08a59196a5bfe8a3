//! Stateful resolver that holds a parsed OCR structure in Rust memory
//!
//! A viewer typically highlights many fields of the same document, so the
//! structure is parsed and validated once and every later call only pays for
//! resolution.

use crate::error::EvidenceWebError;
use crate::overlay::{to_pixel_boxes, PixelBox};
use crate::parse_options;
use evidence_engine::{compute_smart_bounding_boxes, ResolveOptions};
use evidence_types::{OcrStructure, SmartBoundingBox};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct EvidenceResolver {
    structure: OcrStructure,
    options: ResolveOptions,
}

impl EvidenceResolver {
    /// Parse and validate without touching `JsValue`
    pub fn from_json(ocr_json: &str, options_json: Option<&str>) -> Result<Self, EvidenceWebError> {
        let structure = OcrStructure::from_json(ocr_json)
            .map_err(|e| EvidenceWebError::ParseStructure(e.to_string()))?;
        structure.validate()?;
        let options = parse_options(options_json)?;

        Ok(Self { structure, options })
    }

    pub fn structure(&self) -> &OcrStructure {
        &self.structure
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn resolve_boxes(
        &self,
        page_number: u32,
        char_start: usize,
        char_end: usize,
    ) -> Vec<SmartBoundingBox> {
        compute_smart_bounding_boxes(
            &self.structure,
            page_number,
            char_start,
            char_end,
            &self.options,
        )
    }

    pub fn resolve_pixel_boxes(
        &self,
        page_number: u32,
        char_start: usize,
        char_end: usize,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Vec<PixelBox> {
        let boxes = self.resolve_boxes(page_number, char_start, char_end);
        to_pixel_boxes(&boxes, canvas_width, canvas_height)
    }
}

// WASM bindings
#[wasm_bindgen]
impl EvidenceResolver {
    /// Create a resolver from an OCR structure JSON string and optional
    /// options JSON
    #[wasm_bindgen(constructor)]
    pub fn new(
        ocr_json: &str,
        options_json: Option<String>,
    ) -> Result<EvidenceResolver, JsValue> {
        Self::from_json(ocr_json, options_json.as_deref()).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.structure.pages.len()
    }

    /// Resolve a character range to boxes in inches
    pub fn resolve(
        &self,
        page_number: u32,
        char_start: usize,
        char_end: usize,
    ) -> Result<JsValue, JsValue> {
        let boxes = self.resolve_boxes(page_number, char_start, char_end);
        serde_wasm_bindgen::to_value(&boxes)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Resolve a character range straight to canvas pixels
    #[wasm_bindgen(js_name = resolveToPixels)]
    pub fn resolve_to_pixels(
        &self,
        page_number: u32,
        char_start: usize,
        char_end: usize,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Result<JsValue, JsValue> {
        let boxes = self.resolve_pixel_boxes(
            page_number,
            char_start,
            char_end,
            canvas_width,
            canvas_height,
        );
        serde_wasm_bindgen::to_value(&boxes)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
