use calamine::Data;

use crate::models::{Cell, Row};

/// Maps a calamine value onto the pipeline's cell type. Dates keep their
/// serial number so workbook output round-trips them as numbers.
pub fn convert_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
    }
}

/// Converts one sheet row, restoring `leading` empty cells when the used
/// range does not start in the first column.
pub fn convert_row(cells: &[Data], leading: usize) -> Row {
    let mut row = Vec::with_capacity(leading + cells.len());
    row.resize(leading, Cell::Empty);
    row.extend(cells.iter().map(convert_cell));
    row
}

/// Pads `row` with empty strings up to `width` fields.
pub fn csv_fields(row: &[Cell], width: usize) -> Vec<String> {
    let mut fields: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
    fields.resize(width.max(fields.len()), String::new());
    fields
}

/// Cheap sniff for text input: valid UTF-8 with no NUL bytes.
pub fn looks_like_text(bytes: &[u8]) -> bool {
    !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok()
}
