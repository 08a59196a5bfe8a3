//! Interval union over character spans
//!
//! Both coverage tests reduce to the same operation: merge the matched spans
//! into disjoint runs, then measure how much of the query they cover.

use evidence_types::Span;

/// Half-open `[start, end)` interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the part shared with `other`
    pub fn overlap_len(&self, other: &Interval) -> usize {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.saturating_sub(start)
    }
}

impl From<&Span> for Interval {
    fn from(span: &Span) -> Self {
        Interval::new(span.start(), span.end())
    }
}

/// Sort and merge into disjoint intervals. Overlapping and touching intervals
/// collapse into one; empty intervals are dropped.
pub fn merge_intervals<I>(intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    let mut sorted: Vec<Interval> = intervals.into_iter().filter(|i| !i.is_empty()).collect();
    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Total length of a disjoint interval set
pub fn total_len(merged: &[Interval]) -> usize {
    merged.iter().map(Interval::len).sum()
}

/// Characters of `query` explained by a disjoint interval set
pub fn covered_len(merged: &[Interval], query: &Interval) -> usize {
    merged.iter().map(|i| i.overlap_len(query)).sum()
}

/// True when the union of `spans` leaves no hole anywhere in `query`
pub fn covers<'a, I>(spans: I, query: &Interval) -> bool
where
    I: IntoIterator<Item = &'a Span>,
{
    if query.is_empty() {
        return false;
    }
    let merged = merge_intervals(spans.into_iter().map(Interval::from));
    covered_len(&merged, query) == query.len()
}
