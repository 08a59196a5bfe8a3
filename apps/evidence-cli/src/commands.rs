//! Subcommand implementations
//!
//! Each command returns a serializable report; `main` decides how to print it.

use crate::cli::ResolveArgs;
use crate::config::Config;
use anyhow::Context;
use evidence_engine::{
    compute_smart_bounding_boxes, transform_box_to_pixels, PixelRect, ResolveOptions,
};
use evidence_types::{OcrStructure, SmartBoundingBox};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub page_number: u32,
    pub char_start: usize,
    pub char_end: usize,
    pub options: ResolveOptions,
    pub boxes: Vec<SmartBoundingBox>,
    /// Present when a canvas size was given, one entry per box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Vec<PixelHighlight>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PixelHighlight {
    pub polygon: Vec<f64>,
    pub rect: PixelRect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub pages: usize,
    pub words: usize,
    pub lines: usize,
    pub tables: usize,
    pub cells: usize,
}

/// Read an OCR structure from disk without validating it
pub fn load_structure(path: &Path) -> anyhow::Result<OcrStructure> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read OCR structure: {}", path.display()))?;
    OcrStructure::from_json(&content)
        .with_context(|| format!("Failed to parse OCR structure: {}", path.display()))
}

pub fn resolve(args: &ResolveArgs) -> anyhow::Result<ResolveReport> {
    let config = Config::load(args.config.as_deref())?;
    let options = args.apply_overrides(config.resolve);
    options.validate().context("Invalid resolve options")?;

    let structure = load_structure(&args.ocr)?;
    structure
        .validate()
        .with_context(|| format!("Invalid OCR structure: {}", args.ocr.display()))?;
    debug!(?options, pages = structure.pages.len(), "loaded structure");

    let boxes =
        compute_smart_bounding_boxes(&structure, args.page, args.start, args.end, &options);
    info!(
        page = args.page,
        start = args.start,
        end = args.end,
        boxes = boxes.len(),
        source = boxes.first().map(|b| b.source.as_str()).unwrap_or("none"),
        "resolved evidence"
    );

    let pixels = args.canvas().map(|(width, height)| {
        boxes
            .iter()
            .map(|b| {
                let polygon = transform_box_to_pixels(b, width, height);
                PixelHighlight {
                    rect: PixelRect::from_polygon(&polygon),
                    polygon: polygon.to_vec(),
                }
            })
            .collect()
    });

    Ok(ResolveReport {
        page_number: args.page,
        char_start: args.start,
        char_end: args.end,
        options,
        boxes,
        pixels,
    })
}

pub fn validate(path: &Path) -> anyhow::Result<ValidationReport> {
    let structure = load_structure(path)?;
    structure
        .validate()
        .with_context(|| format!("Invalid OCR structure: {}", path.display()))?;

    let report = ValidationReport {
        pages: structure.pages.len(),
        words: structure.pages.iter().map(|p| p.words.len()).sum(),
        lines: structure.pages.iter().map(|p| p.lines.len()).sum(),
        tables: structure.tables.len(),
        cells: structure.tables.iter().map(|t| t.cells.len()).sum(),
    };
    info!(?report, "structure is valid");
    Ok(report)
}
