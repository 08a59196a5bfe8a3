//! Tiered evidence resolution
//!
//! | Tier  | Fires when                                            | Source            |
//! |-------|-------------------------------------------------------|-------------------|
//! | Table | matched cells cover the whole query                   | `cell`            |
//! | Line  | mutual line coverage >= `lineCoverageThreshold`       | `line`            |
//! | Word  | any word overlaps (always available as the fallback)  | `merged` / `word` |
//!
//! The first tier that fires wins; later tiers are never consulted.

use crate::grouping::merge_adjacent_words;
use crate::lines::find_lines_in_range;
use crate::options::ResolveOptions;
use crate::tables::find_cells_in_range;
use crate::words::find_words_in_range;
use evidence_types::{OcrStructure, SmartBoundingBox, Span};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A caller's evidence range on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceQuery {
    pub page_number: u32,
    pub char_start: usize,
    pub char_end: usize,
}

impl EvidenceQuery {
    pub fn new(page_number: u32, char_start: usize, char_end: usize) -> Self {
        Self {
            page_number,
            char_start,
            char_end,
        }
    }

    pub fn from_span(page_number: u32, span: &Span) -> Self {
        Self::new(page_number, span.start(), span.end())
    }

    pub fn is_valid(&self) -> bool {
        self.char_end > self.char_start
    }

    pub fn resolve(
        &self,
        structure: &OcrStructure,
        options: &ResolveOptions,
    ) -> Vec<SmartBoundingBox> {
        compute_smart_bounding_boxes(
            structure,
            self.page_number,
            self.char_start,
            self.char_end,
            options,
        )
    }
}

/// Resolve `[char_start, char_end)` on `page_number` into highlight regions.
///
/// Never fails: an inverted or empty range, a missing page, or a range that
/// touches nothing all produce an empty `Vec`.
///
/// # Example
///
/// ```
/// use evidence_engine::{compute_smart_bounding_boxes, ResolveOptions};
/// use evidence_types::OcrStructure;
///
/// let structure = OcrStructure::default();
/// let boxes = compute_smart_bounding_boxes(&structure, 1, 0, 10, &ResolveOptions::default());
/// assert!(boxes.is_empty());
/// ```
#[instrument(level = "debug", skip(structure, options))]
pub fn compute_smart_bounding_boxes(
    structure: &OcrStructure,
    page_number: u32,
    char_start: usize,
    char_end: usize,
    options: &ResolveOptions,
) -> Vec<SmartBoundingBox> {
    if char_end <= char_start {
        debug!("rejected empty or inverted range");
        return Vec::new();
    }

    let Some(page) = structure.page(page_number) else {
        debug!("page not found");
        return Vec::new();
    };

    if options.enable_table_detection {
        let cells = find_cells_in_range(structure, page_number, char_start, char_end);
        if !cells.is_empty() && cells.fully_cover(char_start, char_end) {
            let boxes = cells.to_boxes(page);
            debug!(tier = "cell", cells = cells.cell_count(), boxes = boxes.len(), "resolved");
            return boxes;
        }
    }

    if options.enable_line_preference {
        if let Some(lines) = find_lines_in_range(page, char_start, char_end) {
            let coverage = lines.coverage(char_start, char_end);
            if coverage.ratio() >= options.line_coverage_threshold {
                let boxes = lines.to_boxes();
                debug!(
                    tier = "line",
                    query_ratio = coverage.query_ratio,
                    line_ratio = coverage.line_ratio,
                    boxes = boxes.len(),
                    "resolved"
                );
                return boxes;
            }
            debug!(
                query_ratio = coverage.query_ratio,
                line_ratio = coverage.line_ratio,
                "line coverage below threshold"
            );
        }
    }

    let Some(matched) = find_words_in_range(structure, page_number, char_start, char_end) else {
        return Vec::new();
    };
    if matched.words.is_empty() {
        debug!("no structural match");
        return Vec::new();
    }

    let boxes = merge_adjacent_words(
        &matched.words,
        page_number,
        matched.page_width,
        matched.page_height,
        options.line_y_threshold,
        options.word_gap_threshold,
    );
    debug!(tier = "word", words = matched.words.len(), boxes = boxes.len(), "resolved");
    boxes
}

/// Resolve every span of a multi-span field value and concatenate the results
/// in span order
pub fn compute_smart_bounding_boxes_for_spans(
    structure: &OcrStructure,
    page_number: u32,
    spans: &[Span],
    options: &ResolveOptions,
) -> Vec<SmartBoundingBox> {
    spans
        .iter()
        .flat_map(|span| EvidenceQuery::from_span(page_number, span).resolve(structure, options))
        .collect()
}
