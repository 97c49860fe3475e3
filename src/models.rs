use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;

/// A single cell value read from the first sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Empty cells and whitespace-only text count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) | Cell::Bool(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(true) => f.write_str("TRUE"),
            Cell::Bool(false) => f.write_str("FALSE"),
        }
    }
}

pub type Row = Vec<Cell>;

/// Rows of the first sheet, in source order.
pub type Grid = Vec<Row>;

/// Header plus data rows left after blank-row filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSheet {
    pub header: Row,
    pub rows: Vec<Row>,
}

/// One output unit: the shared header plus a contiguous slice of data rows.
#[derive(Debug, Clone, Copy)]
pub struct Part<'a> {
    /// 1-based position, used for the file name.
    pub index: usize,
    pub header: &'a [Cell],
    pub rows: &'a [Row],
}

impl<'a> Part<'a> {
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("part_{}.{}", self.index, format.extension())
    }

    /// Header followed by the data slice.
    pub fn all_rows(&self) -> impl Iterator<Item = &'a [Cell]> {
        let (header, rows) = (self.header, self.rows);
        std::iter::once(header).chain(rows.iter().map(Vec::as_slice))
    }

    /// Widest row in the part, header included.
    pub fn width(&self) -> usize {
        self.all_rows().map(|r| r.len()).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(AppError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Row range assigned to a part, before and after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartRange {
    pub index: usize,
    /// Rows requested by the share, `ceil(share / 100 * total)`.
    pub requested: usize,
    pub start: usize,
    pub end: usize,
}

impl PartRange {
    /// Number of data rows actually available in `[start, end)` out of `total`.
    pub fn clamped_len(&self, total: usize) -> usize {
        self.end.min(total).saturating_sub(self.start.min(total))
    }
}

/// An encoded part, ready to be written out.
#[derive(Debug, Clone)]
pub struct NamedFile {
    pub name: String,
    pub range: PartRange,
    pub data_rows: usize,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text(" \t\n".into()).is_blank());
        assert!(!Cell::Text(" a ".into()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
        assert!(!Cell::Bool(false).is_blank());
    }

    #[test]
    fn parses_output_format() {
        assert_eq!("xlsx".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert_eq!(" CSV ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        let err = "ods".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, AppError::InvalidFormat(ref f) if f == "ods"));
    }

    #[test]
    fn part_file_name_uses_index_and_extension() {
        let header = vec![Cell::Text("id".into())];
        let part = Part { index: 3, header: &header, rows: &[] };
        assert_eq!(part.file_name(OutputFormat::Csv), "part_3.csv");
        assert_eq!(part.file_name(OutputFormat::Xlsx), "part_3.xlsx");
        assert_eq!(part.width(), 1);
    }

    #[test]
    fn clamped_len_handles_overrun() {
        let range = PartRange { index: 3, requested: 4, start: 8, end: 12 };
        assert_eq!(range.clamped_len(10), 2);
        let past = PartRange { index: 4, requested: 4, start: 12, end: 16 };
        assert_eq!(past.clamped_len(10), 0);
    }
}
