use rust_xlsxwriter::{Workbook, Worksheet};

use super::utils::csv_fields;
use crate::error::AppError;
use crate::models::{Cell, Part};

/// Every part's workbook uses the same sheet name.
pub const PART_SHEET_NAME: &str = "Sheet 1";

pub fn write_xlsx(part: &Part<'_>) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(PART_SHEET_NAME)?;

    for (row_idx, row) in part.all_rows().enumerate() {
        let row_num = u32::try_from(row_idx).map_err(|_| {
            AppError::Encode(format!("Part {} has too many rows for a worksheet", part.index))
        })?;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = u16::try_from(col_idx).map_err(|_| {
                AppError::Encode(format!(
                    "Part {} has too many columns for a worksheet",
                    part.index
                ))
            })?;
            write_cell(worksheet, row_num, col_num, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), AppError> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Cell::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

/// Comma-separated rendering of the part. Rows are padded to the part's width
/// and each record ends with `\n`. A zero-width part renders as empty text.
pub fn write_csv(part: &Part<'_>) -> Result<Vec<u8>, AppError> {
    let width = part.width();
    if width == 0 {
        return Ok(Vec::new());
    }
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    for row in part.all_rows() {
        writer.write_record(csv_fields(row, width))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Encode(format!("Failed to flush CSV: {}", e)))
}
