//! Table cell matching
//!
//! Cells live at document level and reach pages through bounding regions, so
//! matching filters on both the page and the character span.

use crate::geometry::spans_overlap;
use crate::intervals::{covers, Interval};
use evidence_types::{BoxSource, CellRef, OcrStructure, Page, SmartBoundingBox, TableCell};
use std::collections::BTreeMap;

/// A cell that overlaps the query, with the index of its table
#[derive(Debug, Clone, Copy)]
pub struct CellMatch<'a> {
    pub table_index: usize,
    pub cell: &'a TableCell,
}

impl CellMatch<'_> {
    pub fn cell_ref(&self) -> CellRef {
        CellRef {
            table_index: self.table_index,
            row_index: self.cell.row_index,
            column_index: self.cell.column_index,
        }
    }
}

/// Matched cells grouped by table index
#[derive(Debug, Clone, Default)]
pub struct TableMatches<'a> {
    pub by_table: BTreeMap<usize, Vec<CellMatch<'a>>>,
}

impl<'a> TableMatches<'a> {
    pub fn is_empty(&self) -> bool {
        self.by_table.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellMatch<'a>> {
        self.by_table.values().flatten()
    }

    pub fn cell_count(&self) -> usize {
        self.by_table.values().map(Vec::len).sum()
    }

    /// True when the union of every matched cell's spans covers the whole
    /// query with no gap
    pub fn fully_cover(&self, char_start: usize, char_end: usize) -> bool {
        let query = Interval::new(char_start, char_end);
        covers(self.cells().flat_map(|m| m.cell.spans.iter()), &query)
    }

    /// One box per bounding region on `page` per matched cell
    pub fn to_boxes(&self, page: &Page) -> Vec<SmartBoundingBox> {
        self.cells()
            .flat_map(|m| {
                let cell_ref = m.cell_ref();
                m.cell
                    .regions_on_page(page.page_number)
                    .map(move |region| SmartBoundingBox {
                        page_number: page.page_number,
                        polygon: region.polygon,
                        page_width_inches: page.width,
                        page_height_inches: page.height,
                        source: BoxSource::Cell,
                        confidence: None,
                        cell_ref: Some(cell_ref),
                    })
            })
            .collect()
    }
}

/// Cells with a bounding region on `page_number` and a span overlapping
/// `[char_start, char_end)`, across every table in the document
pub fn find_cells_in_range(
    structure: &OcrStructure,
    page_number: u32,
    char_start: usize,
    char_end: usize,
) -> TableMatches<'_> {
    let mut by_table: BTreeMap<usize, Vec<CellMatch<'_>>> = BTreeMap::new();

    for (table_index, table) in structure.tables.iter().enumerate() {
        let matched: Vec<CellMatch<'_>> = table
            .cells
            .iter()
            .filter(|cell| cell.appears_on_page(page_number))
            .filter(|cell| {
                cell.spans
                    .iter()
                    .any(|s| spans_overlap(s.start(), s.end(), char_start, char_end))
            })
            .map(|cell| CellMatch { table_index, cell })
            .collect();

        if !matched.is_empty() {
            by_table.insert(table_index, matched);
        }
    }

    TableMatches { by_table }
}
