use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};

use super::utils::{convert_row, looks_like_text};
use crate::error::AppError;
use crate::models::{Cell, Grid};

/// Reads the first sheet (by position) of any workbook calamine understands.
/// Falls back to comma-separated text when the bytes are not a workbook.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Grid, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Decode("File is empty".to_string()));
    }

    let start = std::time::Instant::now();
    match open_workbook_auto_from_rs(Cursor::new(bytes)) {
        Ok(mut workbook) => {
            let sheet_names = workbook.sheet_names().to_vec();
            tracing::debug!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

            let range = match workbook.worksheet_range_at(0) {
                Some(range) => range.map_err(|e| {
                    tracing::error!("Failed to read first worksheet: {}", e);
                    AppError::Decode(format!("Failed to read worksheet: {}", e))
                })?,
                None => {
                    tracing::warn!("Workbook has no sheets, treating it as empty");
                    return Ok(Grid::new());
                }
            };

            let leading = range.start().map_or(0, |(_, col)| col as usize);
            let grid: Grid = range.rows().map(|row| convert_row(row, leading)).collect();
            tracing::info!(
                "Read {} rows from sheet {:?} in {:?}",
                grid.len(),
                sheet_names.first(),
                start.elapsed()
            );
            Ok(grid)
        }
        Err(e) if looks_like_text(bytes) => {
            tracing::debug!("Not a workbook ({}), reading as CSV", e);
            read_csv(bytes)
        }
        Err(e) => {
            tracing::error!("Failed to open spreadsheet: {}", e);
            Err(AppError::Decode(format!("Failed to open spreadsheet: {}", e)))
        }
    }
}

fn read_csv(bytes: &[u8]) -> Result<Grid, AppError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = Grid::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::Decode(format!("Failed to read CSV: {}", e)))?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    tracing::info!("Read {} rows from CSV input", grid.len());
    Ok(grid)
}
