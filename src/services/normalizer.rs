use crate::models::{Cell, Grid, NormalizedSheet, Row};

pub fn is_blank_row(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_blank)
}

/// Drops blank rows, keeping the order of the rest.
pub fn drop_blank_rows(grid: Grid) -> Grid {
    grid.into_iter().filter(|row| !is_blank_row(row)).collect()
}

/// Splits a grid into its header (first non-blank row) and data rows.
/// A grid with no non-blank rows yields an empty header and no data.
pub fn normalize(grid: Grid) -> NormalizedSheet {
    let total = grid.len();
    let kept = drop_blank_rows(grid);
    let dropped = total - kept.len();

    let mut rows = kept.into_iter();
    let header: Row = rows.next().unwrap_or_default();
    let rows: Vec<Row> = rows.collect();

    tracing::info!(
        "Normalized sheet: {} source rows, {} blank dropped, {} data rows",
        total,
        dropped,
        rows.len()
    );
    NormalizedSheet { header, rows }
}
