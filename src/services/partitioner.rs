use super::allocation::Allocation;
use crate::models::{NormalizedSheet, Part, PartRange};

/// `ceil(share / 100 * total)` per share. Negative or NaN shares give 0 rows.
pub fn row_counts(shares: &[f64], total: usize) -> Vec<usize> {
    shares
        .iter()
        .map(|share| ((share * total as f64) / 100.0).ceil() as usize)
        .collect()
}

/// Contiguous ranges, left to right. Ends are not clamped to `total`.
pub fn plan(allocation: &Allocation, total: usize) -> Vec<PartRange> {
    let mut start = 0usize;
    row_counts(allocation.shares(), total)
        .into_iter()
        .enumerate()
        .map(|(i, requested)| {
            let end = start.saturating_add(requested);
            let range = PartRange { index: i + 1, requested, start, end };
            start = end;
            range
        })
        .collect()
}

/// One part per share: the header plus the clamped slice of data rows.
/// Parts whose range lies past the data are emitted header-only.
pub fn partition<'a>(
    sheet: &'a NormalizedSheet,
    allocation: &Allocation,
) -> Vec<(PartRange, Part<'a>)> {
    let total = sheet.rows.len();
    plan(allocation, total)
        .into_iter()
        .map(|range| {
            let start = range.start.min(total);
            let end = range.end.min(total);
            let part = Part {
                index: range.index,
                header: &sheet.header,
                rows: &sheet.rows[start..end],
            };
            tracing::debug!(
                "Part {}: requested {} rows, range {}..{}, got {}",
                range.index,
                range.requested,
                range.start,
                range.end,
                part.rows.len()
            );
            (range, part)
        })
        .collect()
}
