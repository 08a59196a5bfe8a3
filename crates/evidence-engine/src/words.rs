use crate::geometry::spans_overlap;
use evidence_types::{OcrStructure, Word};

/// Words on one page that overlap a character range
#[derive(Debug, Clone)]
pub struct WordMatch<'a> {
    pub words: Vec<&'a Word>,
    pub page_width: f64,
    pub page_height: f64,
}

/// Find the words on `page_number` whose span overlaps `[char_start, char_end)`.
///
/// Returns `None` only when the page does not exist; a page with no matching
/// words yields an empty match. Words keep page order, which is not
/// necessarily reading order.
pub fn find_words_in_range(
    structure: &OcrStructure,
    page_number: u32,
    char_start: usize,
    char_end: usize,
) -> Option<WordMatch<'_>> {
    let page = structure.page(page_number)?;

    let words = page
        .words
        .iter()
        .filter(|w| spans_overlap(w.span.start(), w.span.end(), char_start, char_end))
        .collect();

    Some(WordMatch {
        words,
        page_width: page.width,
        page_height: page.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidence_types::{Page, Polygon, Span};

    fn word(content: &str, offset: usize) -> Word {
        Word {
            content: content.to_string(),
            span: Span::new(offset, content.len()),
            polygon: Polygon::from_rect(0.0, 0.0, 1.0, 0.2),
            confidence: 0.9,
        }
    }

    fn structure() -> OcrStructure {
        OcrStructure {
            pages: vec![Page {
                page_number: 1,
                width: 8.5,
                height: 11.0,
                unit: "inch".to_string(),
                words: vec![word("Policy", 0), word("number:", 7), word("PX-1187", 15)],
                lines: Vec::new(),
            }],
            tables: Vec::new(),
        }
    }

    #[test]
    fn test_finds_overlapping_words() {
        let s = structure();
        let m = find_words_in_range(&s, 1, 9, 17).unwrap();
        let contents: Vec<_> = m.words.iter().map(|w| w.content.as_str()).collect();
        assert_eq!(contents, vec!["number:", "PX-1187"]);
        assert_eq!(m.page_width, 8.5);
        assert_eq!(m.page_height, 11.0);
    }

    #[test]
    fn test_touching_word_is_excluded() {
        let s = structure();
        // "Policy" is [0, 6); a query starting at 6 only touches it
        let m = find_words_in_range(&s, 1, 6, 8).unwrap();
        let contents: Vec<_> = m.words.iter().map(|w| w.content.as_str()).collect();
        assert_eq!(contents, vec!["number:"]);
    }

    #[test]
    fn test_missing_page_is_none() {
        assert!(find_words_in_range(&structure(), 2, 0, 5).is_none());
    }

    #[test]
    fn test_no_overlap_is_empty_match() {
        let s = structure();
        let m = find_words_in_range(&s, 1, 100, 120).unwrap();
        assert!(m.words.is_empty());
    }
}
