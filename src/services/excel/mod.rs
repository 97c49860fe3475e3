pub mod reader;
pub mod utils;
pub mod writer;

use crate::error::AppError;
use crate::models::{Grid, OutputFormat, Part};

/// Decode/encode boundary used by the splitter.
pub trait SpreadsheetCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Grid, AppError>;
    fn encode(&self, part: &Part<'_>, format: OutputFormat) -> Result<Vec<u8>, AppError>;
}

/// calamine for reading, rust_xlsxwriter and csv for writing.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookCodec;

impl SpreadsheetCodec for WorkbookCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Grid, AppError> {
        reader::read_first_sheet(bytes)
    }

    fn encode(&self, part: &Part<'_>, format: OutputFormat) -> Result<Vec<u8>, AppError> {
        match format {
            OutputFormat::Xlsx => writer::write_xlsx(part),
            OutputFormat::Csv => writer::write_csv(part),
        }
    }
}
