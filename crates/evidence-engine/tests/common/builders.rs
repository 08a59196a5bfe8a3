//! Builders for OCR structures used across integration tests
//!
//! Dimensions are multiples of 1/8 inch so merged rectangles compare exactly.

#![allow(dead_code)]

use evidence_types::{
    BoundingRegion, Line, OcrStructure, Page, Polygon, Span, Table, TableCell, Word,
};

pub const WORD_HEIGHT: f64 = 0.25;
pub const WORD_GAP: f64 = 0.125;

/// Lays words out left to right on one visual line, advancing the character
/// offset by each word plus one separator.
pub struct Row {
    offset: usize,
    start: usize,
    x: f64,
    y: f64,
    words: Vec<Word>,
}

impl Row {
    pub fn at(offset: usize, x: f64, y: f64) -> Self {
        Self {
            offset,
            start: offset,
            x,
            y,
            words: Vec::new(),
        }
    }

    /// Widen the gap before the next word
    pub fn space(mut self, inches: f64) -> Self {
        self.x += inches;
        self
    }

    pub fn word(mut self, text: &str, width: f64, confidence: f64) -> Self {
        self.words.push(Word {
            content: text.to_string(),
            span: Span::new(self.offset, text.len()),
            polygon: Polygon::from_rect(self.x, self.y, self.x + width, self.y + WORD_HEIGHT),
            confidence,
        });
        self.offset += text.len() + 1;
        self.x += width + WORD_GAP;
        self
    }

    /// Exclusive end offset of the last word
    pub fn end(&self) -> usize {
        self.words.last().map_or(self.start, |w| w.span.end())
    }

    /// The OCR line covering every word in the row
    pub fn line(&self) -> Line {
        let min_x = self.words.first().map_or(self.x, |w| w.polygon.coords()[0]);
        let max_x = self.words.last().map_or(self.x, |w| w.polygon.coords()[2]);
        Line {
            content: self
                .words
                .iter()
                .map(|w| w.content.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            spans: vec![Span::from_range(self.start, self.end())],
            polygon: Polygon::from_rect(min_x, self.y, max_x, self.y + WORD_HEIGHT),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

pub struct PageBuilder {
    page: Page,
}

impl PageBuilder {
    pub fn letter(page_number: u32) -> Self {
        Self {
            page: Page {
                page_number,
                width: 8.5,
                height: 11.0,
                unit: "inch".to_string(),
                words: Vec::new(),
                lines: Vec::new(),
            },
        }
    }

    /// Adds the row's words and its line
    pub fn row(mut self, row: Row) -> Self {
        self.page.lines.push(row.line());
        self.page.words.extend(row.words);
        self
    }

    /// Adds the row's words without an OCR line
    pub fn words_only(mut self, row: Row) -> Self {
        self.page.words.extend(row.words);
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.page.lines.push(line);
        self
    }

    pub fn build(self) -> Page {
        self.page
    }
}

pub fn cell(row: u32, column: u32, span: Span, regions: &[(u32, Polygon)]) -> TableCell {
    TableCell {
        row_index: row,
        column_index: column,
        row_span: 1,
        column_span: 1,
        content: String::new(),
        spans: vec![span],
        bounding_regions: regions
            .iter()
            .map(|&(page_number, polygon)| BoundingRegion {
                page_number,
                polygon,
            })
            .collect(),
    }
}

pub fn table(cells: Vec<TableCell>) -> Table {
    let row_count = cells.iter().map(|c| c.row_index + 1).max().unwrap_or(0);
    let column_count = cells.iter().map(|c| c.column_index + 1).max().unwrap_or(0);
    Table {
        row_count,
        column_count,
        cells,
    }
}

pub fn structure(pages: Vec<Page>, tables: Vec<Table>) -> OcrStructure {
    OcrStructure { pages, tables }
}
