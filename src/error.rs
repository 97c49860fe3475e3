use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No input file selected")]
    MissingInput,
    #[error("Failed to decode spreadsheet: {0}")]
    Decode(String),
    #[error("Invalid output format: {0}")]
    InvalidFormat(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to encode part: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Encode(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Encode(err.to_string())
    }
}

impl AppError {
    /// Short machine-readable tag, used in the JSON failure report.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingInput => "missing_input",
            AppError::Decode(_) => "decode",
            AppError::InvalidFormat(_) => "invalid_format",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Encode(_) => "encode",
            AppError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(AppError::MissingInput.to_string(), "No input file selected");
        assert_eq!(
            AppError::InvalidFormat("pdf".into()).to_string(),
            "Invalid output format: pdf"
        );
        assert_eq!(AppError::Decode("bad zip".into()).kind(), "decode");
    }
}
