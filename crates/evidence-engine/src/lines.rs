//! Line matching and coverage measurement

use crate::geometry::spans_overlap;
use crate::intervals::{covered_len, merge_intervals, total_len, Interval};
use evidence_types::{BoxSource, Line, Page, SmartBoundingBox};

/// How well a set of lines and a query explain each other
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCoverage {
    /// Fraction of the queried characters that fall inside the lines
    pub query_ratio: f64,
    /// Fraction of the lines' characters that fall inside the query
    pub line_ratio: f64,
}

impl LineCoverage {
    /// The figure compared against the coverage threshold.
    ///
    /// Taking the smaller side means a line only wins when it explains almost
    /// all of the query and the query spans almost all of the line.
    pub fn ratio(&self) -> f64 {
        self.query_ratio.min(self.line_ratio)
    }
}

/// Lines on one page overlapping a character range
#[derive(Debug, Clone)]
pub struct LineMatch<'a> {
    pub page: &'a Page,
    pub lines: Vec<&'a Line>,
}

impl LineMatch<'_> {
    pub fn coverage(&self, char_start: usize, char_end: usize) -> LineCoverage {
        line_coverage(&self.lines, char_start, char_end)
    }

    /// One box per matched line, in page order
    pub fn to_boxes(&self) -> Vec<SmartBoundingBox> {
        self.lines
            .iter()
            .map(|line| SmartBoundingBox {
                page_number: self.page.page_number,
                polygon: line.polygon,
                page_width_inches: self.page.width,
                page_height_inches: self.page.height,
                source: BoxSource::Line,
                confidence: None,
                cell_ref: None,
            })
            .collect()
    }
}

/// Lines with at least one span overlapping `[char_start, char_end)`.
///
/// `None` when the page has no lines or none of them overlap.
pub fn find_lines_in_range(
    page: &Page,
    char_start: usize,
    char_end: usize,
) -> Option<LineMatch<'_>> {
    let lines: Vec<&Line> = page
        .lines
        .iter()
        .filter(|line| {
            line.spans
                .iter()
                .any(|s| spans_overlap(s.start(), s.end(), char_start, char_end))
        })
        .collect();

    if lines.is_empty() {
        return None;
    }

    Some(LineMatch { page, lines })
}

/// Coverage of `[char_start, char_end)` by the union of the lines' spans
pub fn line_coverage(lines: &[&Line], char_start: usize, char_end: usize) -> LineCoverage {
    let query = Interval::new(char_start, char_end);
    let merged = merge_intervals(
        lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .map(Interval::from),
    );

    let overlap = covered_len(&merged, &query) as f64;
    let ratio_of = |whole: usize| {
        if whole == 0 {
            0.0
        } else {
            overlap / whole as f64
        }
    };

    LineCoverage {
        query_ratio: ratio_of(query.len()),
        line_ratio: ratio_of(total_len(&merged)),
    }
}
