use evidence_engine::OptionsError;
use evidence_types::{PolygonError, StructureError};
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum EvidenceWebError {
    #[error("Failed to parse OCR structure: {0}")]
    ParseStructure(String),

    #[error("Failed to parse options: {0}")]
    ParseOptions(String),

    #[error("Invalid OCR structure: {0}")]
    Structure(#[from] StructureError),

    #[error("Invalid options: {0}")]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Polygon(#[from] PolygonError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<EvidenceWebError> for JsValue {
    fn from(err: EvidenceWebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
