//! Read-only OCR layout structure for a document
//!
//! Mirrors the layout output of the document-intelligence service: pages with
//! words and lines, plus document-level tables whose cells point back at pages
//! through bounding regions. Every entity locates its text in the document's
//! plain-text content through one or more [`Span`]s.

use crate::polygon::Polygon;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Half-open character interval `[offset, offset + length)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub offset: usize,
    pub length: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Span covering `[start, end)`. Returns an empty span at `start` when `end <= start`.
    pub fn from_range(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            length: end.saturating_sub(start),
        }
    }

    pub fn start(&self) -> usize {
        self.offset
    }

    /// Exclusive end offset, clamped at `usize::MAX`
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Exclusive end offset, or `None` when it does not fit in `usize`
    pub fn checked_end(&self) -> Option<usize> {
        self.offset.checked_add(self.length)
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// A single recognized token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default)]
    pub content: String,
    pub span: Span,
    pub polygon: Polygon,
    pub confidence: f64,
}

/// A visually contiguous line of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    #[serde(default)]
    pub content: String,
    pub spans: Vec<Span>,
    pub polygon: Polygon,
}

/// Where an entity appears on a specific page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRegion {
    pub page_number: u32,
    pub polygon: Polygon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub row_index: u32,
    pub column_index: u32,
    #[serde(default = "default_cell_extent")]
    pub row_span: u32,
    #[serde(default = "default_cell_extent")]
    pub column_span: u32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

fn default_cell_extent() -> u32 {
    1
}

impl TableCell {
    /// Bounding regions that fall on `page_number`
    pub fn regions_on_page(&self, page_number: u32) -> impl Iterator<Item = &BoundingRegion> {
        self.bounding_regions
            .iter()
            .filter(move |region| region.page_number == page_number)
    }

    pub fn appears_on_page(&self, page_number: u32) -> bool {
        self.regions_on_page(page_number).next().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub row_count: u32,
    #[serde(default)]
    pub column_count: u32,
    pub cells: Vec<TableCell>,
}

fn default_unit() -> String {
    "inch".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number
    pub page_number: u32,
    /// Physical width (inches)
    pub width: f64,
    /// Physical height (inches)
    pub height: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

/// Per-document OCR output consumed by the evidence engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrStructure {
    pub pages: Vec<Page>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructureError {
    #[error("Page number must be >= 1")]
    ZeroPageNumber,

    #[error("Duplicate page number: {0}")]
    DuplicatePage(u32),

    #[error("Page {page} has invalid dimensions {width} x {height}")]
    InvalidDimensions { page: u32, width: f64, height: f64 },

    #[error("Word {index} on page {page} has confidence {confidence} outside [0, 1]")]
    InvalidConfidence {
        page: u32,
        index: usize,
        confidence: f64,
    },

    #[error("{entity} span at offset {offset} with length {length} overflows")]
    SpanOverflow {
        entity: &'static str,
        offset: usize,
        length: usize,
    },

    #[error("Table {table} cell ({row}, {column}) refers to missing page {page}")]
    UnknownCellPage {
        table: usize,
        row: u32,
        column: u32,
        page: u32,
    },
}

impl OcrStructure {
    /// Look up a page by its 1-based number
    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the invariants the engine relies on.
    ///
    /// Deserialization already guarantees well-formed polygons; this covers the
    /// cross-entity rules that serde can't express.
    pub fn validate(&self) -> Result<(), StructureError> {
        let mut seen = HashSet::new();

        for page in &self.pages {
            if page.page_number == 0 {
                return Err(StructureError::ZeroPageNumber);
            }
            if !seen.insert(page.page_number) {
                return Err(StructureError::DuplicatePage(page.page_number));
            }

            let valid_dimension = |d: f64| d.is_finite() && d > 0.0;
            if !valid_dimension(page.width) || !valid_dimension(page.height) {
                return Err(StructureError::InvalidDimensions {
                    page: page.page_number,
                    width: page.width,
                    height: page.height,
                });
            }

            if let Some((index, word)) = page
                .words
                .iter()
                .enumerate()
                .find(|(_, w)| !(0.0..=1.0).contains(&w.confidence))
            {
                return Err(StructureError::InvalidConfidence {
                    page: page.page_number,
                    index,
                    confidence: word.confidence,
                });
            }

            check_spans("Word", page.words.iter().map(|w| &w.span))?;
            check_spans("Line", page.lines.iter().flat_map(|l| &l.spans))?;
        }

        for (table_index, table) in self.tables.iter().enumerate() {
            for cell in &table.cells {
                check_spans("Cell", &cell.spans)?;
                if let Some(region) = cell
                    .bounding_regions
                    .iter()
                    .find(|r| !seen.contains(&r.page_number))
                {
                    return Err(StructureError::UnknownCellPage {
                        table: table_index,
                        row: cell.row_index,
                        column: cell.column_index,
                        page: region.page_number,
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_spans<'a>(
    entity: &'static str,
    spans: impl IntoIterator<Item = &'a Span>,
) -> Result<(), StructureError> {
    match spans.into_iter().find(|s| s.checked_end().is_none()) {
        Some(span) => Err(StructureError::SpanOverflow {
            entity,
            offset: span.offset,
            length: span.length,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32) -> Page {
        Page {
            page_number: number,
            width: 8.5,
            height: 11.0,
            unit: default_unit(),
            words: Vec::new(),
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_span_end_is_exclusive() {
        let span = Span::new(10, 5);
        assert_eq!(span.end(), 15);
        assert_eq!(span.checked_end(), Some(15));
    }

    #[test]
    fn test_span_end_saturates() {
        let span = Span::new(usize::MAX, 2);
        assert_eq!(span.end(), usize::MAX);
        assert_eq!(span.checked_end(), None);
    }

    #[test]
    fn test_span_from_inverted_range_is_empty() {
        let span = Span::from_range(10, 4);
        assert!(span.is_empty());
        assert_eq!(span.start(), 10);
    }

    #[test]
    fn test_deserialize_page_defaults() {
        let json = r#"{"pages":[{"pageNumber":1,"width":8.5,"height":11}]}"#;
        let structure = OcrStructure::from_json(json).unwrap();
        let page = structure.page(1).unwrap();
        assert_eq!(page.unit, "inch");
        assert!(page.words.is_empty());
        assert!(structure.tables.is_empty());
    }

    #[test]
    fn test_deserialize_cell_defaults() {
        let json = r#"{"rowIndex":2,"columnIndex":1,"spans":[{"offset":4,"length":3}],
            "boundingRegions":[{"pageNumber":1,"polygon":[0,0,1,0,1,1,0,1]}]}"#;
        let cell: TableCell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.row_span, 1);
        assert_eq!(cell.column_span, 1);
        assert!(cell.appears_on_page(1));
        assert!(!cell.appears_on_page(2));
    }

    #[test]
    fn test_page_lookup_missing() {
        let structure = OcrStructure {
            pages: vec![page(1), page(2)],
            tables: Vec::new(),
        };
        assert!(structure.page(2).is_some());
        assert!(structure.page(3).is_none());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let structure = OcrStructure {
            pages: vec![page(1), page(2)],
            tables: Vec::new(),
        };
        assert_eq!(structure.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicate_page() {
        let structure = OcrStructure {
            pages: vec![page(1), page(1)],
            tables: Vec::new(),
        };
        assert_eq!(structure.validate(), Err(StructureError::DuplicatePage(1)));
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let mut bad = page(1);
        bad.width = 0.0;
        let structure = OcrStructure {
            pages: vec![bad],
            tables: Vec::new(),
        };
        assert!(matches!(
            structure.validate(),
            Err(StructureError::InvalidDimensions { page: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_confidence_out_of_range() {
        let mut p = page(1);
        p.words.push(Word {
            content: "x".to_string(),
            span: Span::new(0, 1),
            polygon: Polygon::from_rect(0.0, 0.0, 1.0, 1.0),
            confidence: 1.5,
        });
        let structure = OcrStructure {
            pages: vec![p],
            tables: Vec::new(),
        };
        assert!(matches!(
            structure.validate(),
            Err(StructureError::InvalidConfidence { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_cell_on_unknown_page() {
        let structure = OcrStructure {
            pages: vec![page(1)],
            tables: vec![Table {
                row_count: 1,
                column_count: 1,
                cells: vec![TableCell {
                    row_index: 0,
                    column_index: 0,
                    row_span: 1,
                    column_span: 1,
                    content: String::new(),
                    spans: vec![Span::new(0, 3)],
                    bounding_regions: vec![BoundingRegion {
                        page_number: 4,
                        polygon: Polygon::from_rect(0.0, 0.0, 1.0, 1.0),
                    }],
                }],
            }],
        };
        assert_eq!(
            structure.validate(),
            Err(StructureError::UnknownCellPage {
                table: 0,
                row: 0,
                column: 0,
                page: 4
            })
        );
    }

    #[test]
    fn test_validate_rejects_overflowing_word_span() {
        let mut p = page(1);
        p.words.push(Word {
            content: "x".to_string(),
            span: Span::new(usize::MAX, 2),
            polygon: Polygon::from_rect(0.0, 0.0, 1.0, 1.0),
            confidence: 0.9,
        });
        let structure = OcrStructure {
            pages: vec![p],
            tables: Vec::new(),
        };
        assert_eq!(
            structure.validate(),
            Err(StructureError::SpanOverflow {
                entity: "Word",
                offset: usize::MAX,
                length: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_overflowing_line_span() {
        let mut p = page(1);
        p.lines.push(Line {
            content: String::new(),
            spans: vec![Span::new(0, 4), Span::new(usize::MAX - 1, 5)],
            polygon: Polygon::from_rect(0.0, 0.0, 1.0, 1.0),
        });
        let structure = OcrStructure {
            pages: vec![p],
            tables: Vec::new(),
        };
        assert!(matches!(
            structure.validate(),
            Err(StructureError::SpanOverflow { entity: "Line", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_overflowing_cell_span() {
        let structure = OcrStructure {
            pages: vec![page(1)],
            tables: vec![Table {
                row_count: 1,
                column_count: 1,
                cells: vec![TableCell {
                    row_index: 0,
                    column_index: 0,
                    row_span: 1,
                    column_span: 1,
                    content: String::new(),
                    spans: vec![Span::new(usize::MAX, usize::MAX)],
                    bounding_regions: Vec::new(),
                }],
            }],
        };
        assert!(matches!(
            structure.validate(),
            Err(StructureError::SpanOverflow { entity: "Cell", .. })
        ));
    }
}
