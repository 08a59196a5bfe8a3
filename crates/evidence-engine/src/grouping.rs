//! Word grouping and horizontal merging
//!
//! Matched words are clustered into visual lines with a single pass over a
//! center-Y ordering, then each line is split into runs wherever the horizontal
//! gap between neighbours exceeds the gap threshold. This is deliberately cheap
//! and not a full line detector: it assumes words on one visual line have
//! nearly equal center-Y. The input is sorted here, so callers may pass words
//! in any order.

use crate::geometry::{bounds_of, center_y, left_x, merge_polygons};
use evidence_types::{BoxSource, SmartBoundingBox, Word};
use std::cmp::Ordering;

/// Cluster words whose center-Y stays within `y_threshold` of the cluster's
/// running mean. Clusters come back top to bottom.
pub fn group_words_into_lines<'a>(words: &[&'a Word], y_threshold: f64) -> Vec<Vec<&'a Word>> {
    let mut sorted: Vec<(&Word, f64)> = words
        .iter()
        .map(|w| (*w, center_y(&w.polygon)))
        .collect();
    sorted.sort_by(|(a, ay), (b, by)| {
        ay.partial_cmp(by)
            .unwrap_or(Ordering::Equal)
            .then_with(|| cmp_left(a, b))
    });

    let mut clusters: Vec<Vec<&Word>> = Vec::new();
    let mut current: Vec<&Word> = Vec::new();
    let mut y_sum = 0.0;

    for (word, y) in sorted {
        if !current.is_empty() {
            let mean = y_sum / current.len() as f64;
            if (y - mean).abs() > y_threshold {
                clusters.push(std::mem::take(&mut current));
                y_sum = 0.0;
            }
        }
        current.push(word);
        y_sum += y;
    }

    if !current.is_empty() {
        clusters.push(current);
    }

    tracing::trace!(clusters = clusters.len(), "grouped words into lines");
    clusters
}

fn cmp_left(a: &Word, b: &Word) -> Ordering {
    left_x(&a.polygon)
        .partial_cmp(&left_x(&b.polygon))
        .unwrap_or(Ordering::Equal)
}

/// Split one visual line into runs of horizontally adjacent words.
///
/// A word joins the current run when the gap between its left edge and the
/// run's right edge is at most `gap_threshold`.
pub fn split_into_runs<'a>(line: &[&'a Word], gap_threshold: f64) -> Vec<Vec<&'a Word>> {
    let mut sorted: Vec<&Word> = line.to_vec();
    sorted.sort_by(|a, b| cmp_left(a, b));

    let mut runs: Vec<Vec<&Word>> = Vec::new();
    let mut current: Vec<&Word> = Vec::new();
    let mut run_right = f64::NEG_INFINITY;

    for word in sorted {
        let bounds = bounds_of(&word.polygon);
        if !current.is_empty() && bounds.min_x - run_right > gap_threshold {
            runs.push(std::mem::take(&mut current));
            run_right = f64::NEG_INFINITY;
        }
        run_right = run_right.max(bounds.max_x);
        current.push(word);
    }

    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Turn one run into a highlight box with the mean confidence of its words
fn run_to_box(
    run: &[&Word],
    page_number: u32,
    page_width: f64,
    page_height: f64,
) -> Option<SmartBoundingBox> {
    let polygons: Vec<_> = run.iter().map(|w| w.polygon).collect();
    let polygon = merge_polygons(&polygons)?;
    let confidence = run.iter().map(|w| w.confidence).sum::<f64>() / run.len() as f64;

    Some(SmartBoundingBox {
        page_number,
        polygon,
        page_width_inches: page_width,
        page_height_inches: page_height,
        source: if run.len() > 1 {
            BoxSource::Merged
        } else {
            BoxSource::Word
        },
        confidence: Some(confidence),
        cell_ref: None,
    })
}

/// Group, split and merge matched words into boxes: lines top to bottom,
/// runs left to right within each line
pub fn merge_adjacent_words(
    words: &[&Word],
    page_number: u32,
    page_width: f64,
    page_height: f64,
    y_threshold: f64,
    gap_threshold: f64,
) -> Vec<SmartBoundingBox> {
    group_words_into_lines(words, y_threshold)
        .iter()
        .flat_map(|line| split_into_runs(line, gap_threshold))
        .filter_map(|run| run_to_box(&run, page_number, page_width, page_height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidence_types::{Polygon, Span};

    fn word(text: &str, x: f64, y: f64, width: f64, confidence: f64) -> Word {
        Word {
            content: text.to_string(),
            span: Span::new(0, text.len()),
            polygon: Polygon::from_rect(x, y, x + width, y + 0.25),
            confidence,
        }
    }

    fn texts(group: &[&Word]) -> Vec<String> {
        group.iter().map(|w| w.content.clone()).collect()
    }

    #[test]
    fn test_groups_by_center_y_regardless_of_input_order() {
        let a = word("Claim", 1.0, 2.0, 0.5, 0.9);
        let b = word("Total", 1.0, 3.0, 0.5, 0.9);
        let c = word("number", 1.6, 2.02, 0.6, 0.9);
        let lines = group_words_into_lines(&[&b, &c, &a], 0.05);
        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[0]), vec!["Claim", "number"]);
        assert_eq!(texts(&lines[1]), vec!["Total"]);
    }

    #[test]
    fn test_running_mean_splits_drifting_words() {
        let a = word("a", 1.0, 2.00, 0.1, 1.0);
        let b = word("b", 1.2, 2.04, 0.1, 1.0);
        // a and b average to 2.145; c's center sits 0.06 below that
        let c = word("c", 1.4, 2.08, 0.1, 1.0);
        let lines = group_words_into_lines(&[&a, &b, &c], 0.05);
        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[0]), vec!["a", "b"]);
    }

    #[test]
    fn test_split_runs_on_wide_gap() {
        let a = word("Total:", 1.0, 2.0, 0.5, 1.0);
        let b = word("$1,200.00", 1.7, 2.0, 0.8, 1.0);
        let c = word("Paid", 3.0, 2.0, 0.4, 1.0);
        let runs = split_into_runs(&[&c, &a, &b], 0.3);
        assert_eq!(runs.len(), 2);
        assert_eq!(texts(&runs[0]), vec!["Total:", "$1,200.00"]);
        assert_eq!(texts(&runs[1]), vec!["Paid"]);
    }

    #[test]
    fn test_gap_equal_to_threshold_merges() {
        let a = word("a", 1.0, 2.0, 0.5, 1.0);
        let b = word("b", 1.75, 2.0, 0.5, 1.0);
        let runs = split_into_runs(&[&a, &b], 0.25);
        assert_eq!(runs.len(), 1);
    }

    #[test]
    fn test_merged_box_confidence_is_mean() {
        let a = word("a", 1.0, 2.0, 0.5, 0.9);
        let b = word("b", 1.625, 2.0, 0.5, 0.7);
        let boxes = merge_adjacent_words(&[&a, &b], 1, 8.5, 11.0, 0.05, 0.3);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].source, BoxSource::Merged);
        assert!((boxes[0].confidence.unwrap() - 0.8).abs() < 1e-9);
        assert_eq!(boxes[0].polygon, Polygon::from_rect(1.0, 2.0, 2.125, 2.25));
    }

    #[test]
    fn test_single_word_keeps_polygon() {
        let rotated = Word {
            content: "x".to_string(),
            span: Span::new(0, 1),
            polygon: Polygon::new([1.0, 2.05, 1.5, 2.0, 1.52, 2.15, 1.02, 2.2]),
            confidence: 0.95,
        };
        let boxes = merge_adjacent_words(&[&rotated], 1, 8.5, 11.0, 0.05, 0.3);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].source, BoxSource::Word);
        assert_eq!(boxes[0].polygon, rotated.polygon);
        assert_eq!(boxes[0].confidence, Some(0.95));
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_adjacent_words(&[], 1, 8.5, 11.0, 0.05, 0.3).is_empty());
    }
}
