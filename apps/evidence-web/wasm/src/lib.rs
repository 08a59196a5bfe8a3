//! WASM bindings for evidence region resolution
//!
//! The document viewer calls into this module to find where an extracted
//! value came from and to place highlight overlays on the rendered page.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, {
//!   EvidenceResolver,
//!   compute_smart_bounding_boxes_json,
//! } from './pkg/evidence_wasm.js';
//!
//! await init();
//!
//! // One-shot
//! const boxes = JSON.parse(compute_smart_bounding_boxes_json(ocrJson, 1, 120, 134));
//!
//! // Many fields of the same document
//! const resolver = new EvidenceResolver(ocrJson, JSON.stringify({ wordGapThreshold: 0.25 }));
//! for (const field of fields) {
//!   const highlights = resolver.resolveToPixels(field.page, field.start, field.end,
//!                                              canvas.width, canvas.height);
//!   highlights.forEach((h) => drawOverlay(h.rect));
//! }
//! ```
//!
//! Every export has a plain Rust counterpart taking `&str`/slices so the
//! logic is testable off wasm.

pub mod error;
pub mod overlay;
pub mod session;

use evidence_engine::{OptionsError, ResolveOptions};
use evidence_types::{OcrStructure, Polygon};
use wasm_bindgen::prelude::*;

pub use error::EvidenceWebError;
pub use overlay::{to_pixel_boxes, PixelBox};
pub use session::EvidenceResolver;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Defaults when absent or blank, otherwise parsed and validated
pub fn parse_options(options_json: Option<&str>) -> Result<ResolveOptions, EvidenceWebError> {
    match options_json.map(str::trim) {
        None | Some("") => Ok(ResolveOptions::default()),
        Some(json) => ResolveOptions::from_json_str(json).map_err(|e| match e {
            OptionsError::Parse(msg) => EvidenceWebError::ParseOptions(msg),
            invalid => EvidenceWebError::Options(invalid),
        }),
    }
}

/// Resolve a range of a JSON-encoded structure into a JSON array of boxes
pub fn resolve_json(
    ocr_json: &str,
    page_number: u32,
    char_start: usize,
    char_end: usize,
    options_json: Option<&str>,
) -> Result<String, EvidenceWebError> {
    let structure = OcrStructure::from_json(ocr_json)
        .map_err(|e| EvidenceWebError::ParseStructure(e.to_string()))?;
    let options = parse_options(options_json)?;

    let boxes = evidence_engine::compute_smart_bounding_boxes(
        &structure,
        page_number,
        char_start,
        char_end,
        &options,
    );

    serde_json::to_string(&boxes).map_err(|e| EvidenceWebError::Serialization(e.to_string()))
}

/// Scale raw polygon coordinates from inches to pixels
pub fn transform_coords(
    coords: &[f64],
    page_width_inches: f64,
    page_height_inches: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Vec<f64>, EvidenceWebError> {
    let polygon = Polygon::try_from(coords)?;
    let pixels = evidence_engine::transform_polygon_to_pixels(
        &polygon,
        page_width_inches,
        page_height_inches,
        canvas_width,
        canvas_height,
    );
    Ok(pixels.to_vec())
}

/// WASM entry point taking and returning JSON strings
#[wasm_bindgen]
pub fn compute_smart_bounding_boxes_json(
    ocr_json: &str,
    page_number: u32,
    char_start: usize,
    char_end: usize,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    resolve_json(
        ocr_json,
        page_number,
        char_start,
        char_end,
        options_json.as_deref(),
    )
    .map_err(JsValue::from)
}

/// WASM entry point taking and returning JS objects
///
/// `options` may be `undefined` or `null` for the defaults.
#[wasm_bindgen]
pub fn compute_smart_bounding_boxes(
    ocr: JsValue,
    page_number: u32,
    char_start: usize,
    char_end: usize,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let structure: OcrStructure = serde_wasm_bindgen::from_value(ocr)
        .map_err(|e| EvidenceWebError::ParseStructure(e.to_string()))?;

    let options = if options.is_undefined() || options.is_null() {
        ResolveOptions::default()
    } else {
        let options: ResolveOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| EvidenceWebError::ParseOptions(e.to_string()))?;
        options.validate().map_err(EvidenceWebError::from)?;
        options
    };

    let boxes = evidence_engine::compute_smart_bounding_boxes(
        &structure,
        page_number,
        char_start,
        char_end,
        &options,
    );

    serde_wasm_bindgen::to_value(&boxes)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Scale an 8-number polygon from page inches to canvas pixels
#[wasm_bindgen]
pub fn transform_polygon_to_pixels(
    polygon: Vec<f64>,
    page_width_inches: f64,
    page_height_inches: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Vec<f64>, JsValue> {
    transform_coords(
        &polygon,
        page_width_inches,
        page_height_inches,
        canvas_width,
        canvas_height,
    )
    .map_err(JsValue::from)
}



#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use evidence_types::{BoxSource, SmartBoundingBox};
    use wasm_bindgen_test::*;

    // "Net 30 days"
    const TERMS: &str = r#"{
        "pages": [{
            "pageNumber": 1,
            "width": 8.5,
            "height": 11,
            "words": [
                {"content": "Net", "span": {"offset": 0, "length": 3},
                 "polygon": [1, 3, 1.375, 3, 1.375, 3.25, 1, 3.25], "confidence": 0.9},
                {"content": "30", "span": {"offset": 4, "length": 2},
                 "polygon": [1.5, 3, 1.75, 3, 1.75, 3.25, 1.5, 3.25], "confidence": 0.7},
                {"content": "days", "span": {"offset": 7, "length": 4},
                 "polygon": [1.875, 3, 2.25, 3, 2.25, 3.25, 1.875, 3.25], "confidence": 0.8}
            ],
            "lines": [
                {"content": "Net 30 days", "spans": [{"offset": 0, "length": 11}],
                 "polygon": [1, 3, 2.25, 3, 2.25, 3.25, 1, 3.25]}
            ]
        }]
    }"#;

    fn terms_value() -> JsValue {
        let structure = OcrStructure::from_json(TERMS).unwrap();
        serde_wasm_bindgen::to_value(&structure).unwrap()
    }

    fn boxes_of(value: JsValue) -> Vec<SmartBoundingBox> {
        serde_wasm_bindgen::from_value(value).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_transform_polygon_to_pixels_export() {
        let page = vec![0.0, 0.0, 8.5, 0.0, 8.5, 11.0, 0.0, 11.0];
        let px = transform_polygon_to_pixels(page, 8.5, 11.0, 816.0, 1056.0).unwrap();
        assert_eq!(px, vec![0.0, 0.0, 816.0, 0.0, 816.0, 1056.0, 0.0, 1056.0]);
    }

    #[wasm_bindgen_test]
    fn test_wrong_length_polygon_is_an_error() {
        assert!(transform_polygon_to_pixels(vec![1.0, 2.0], 8.5, 11.0, 816.0, 1056.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_json_export() {
        let json = compute_smart_bounding_boxes_json(
            r#"{"pages": [{"pageNumber": 1, "width": 8.5, "height": 11}]}"#,
            1,
            0,
            10,
            None,
        )
        .unwrap();
        assert_eq!(json, "[]");
    }

    #[wasm_bindgen_test]
    fn test_object_export_with_undefined_options() {
        let result =
            compute_smart_bounding_boxes(terms_value(), 1, 0, 11, JsValue::UNDEFINED).unwrap();
        let boxes = boxes_of(result);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].source, BoxSource::Line);
    }

    #[wasm_bindgen_test]
    fn test_object_export_with_null_options() {
        let result = compute_smart_bounding_boxes(terms_value(), 1, 4, 6, JsValue::NULL).unwrap();
        let boxes = boxes_of(result);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].source, BoxSource::Word);
        assert_eq!(boxes[0].confidence, Some(0.7));
    }

    #[wasm_bindgen_test]
    fn test_object_export_with_options_object() {
        let options = ResolveOptions::default().with_line_preference(false);
        let options = serde_wasm_bindgen::to_value(&options).unwrap();
        let result = compute_smart_bounding_boxes(terms_value(), 1, 0, 11, options).unwrap();
        let boxes = boxes_of(result);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].source, BoxSource::Merged);
    }

    #[wasm_bindgen_test]
    fn test_object_export_rejects_invalid_options() {
        let options = ResolveOptions::default().with_line_coverage_threshold(2.0);
        let options = serde_wasm_bindgen::to_value(&options).unwrap();
        assert!(compute_smart_bounding_boxes(terms_value(), 1, 0, 11, options).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resolver_resolve() {
        let resolver = EvidenceResolver::new(TERMS, None).unwrap();
        assert_eq!(resolver.page_count(), 1);

        let boxes = boxes_of(resolver.resolve(1, 4, 11).unwrap());
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].source, BoxSource::Merged);
        assert_eq!(boxes[0].polygon.to_vec(), vec![1.5, 3.0, 2.25, 3.0, 2.25, 3.25, 1.5, 3.25]);
    }

    #[wasm_bindgen_test]
    fn test_resolver_resolve_to_pixels() {
        let resolver = EvidenceResolver::new(TERMS, None).unwrap();
        let value = resolver.resolve_to_pixels(1, 0, 11, 816.0, 1056.0).unwrap();
        let highlights: Vec<PixelBox> = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].source, BoxSource::Line);
        assert_eq!(highlights[0].rect.top, 288.0);
        assert_eq!(highlights[0].rect.height, 24.0);
    }

    #[wasm_bindgen_test]
    fn test_resolver_rejects_invalid_options() {
        let options = Some(r#"{"wordGapThreshold": -1}"#.to_string());
        assert!(EvidenceResolver::new(TERMS, options).is_err());
    }
}
