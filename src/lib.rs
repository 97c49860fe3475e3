//! Splits the data rows of a spreadsheet into percentage-sized parts and
//! encodes each part, with the header repeated, as xlsx or CSV.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::AppError;
pub use models::{Cell, NamedFile, OutputFormat, Part, PartRange};
pub use services::allocation::Allocation;
pub use services::excel::{SpreadsheetCodec, WorkbookCodec};
pub use services::splitter::{SheetSplitter, SplitRequest};
