/// Error types for loading census data
use thiserror::Error;

/// Main error type for census dataset loading and validation
#[derive(Error, Debug)]
pub enum CensusError {
    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A cell could not be parsed for its column
    #[error("Invalid value {value:?} for column '{column}' on line {line}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// A row has fewer cells than the header
    #[error("Row on line {line} has {found} cells, expected {expected}")]
    ShortRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The same district appears twice within one province
    #[error("Duplicate district '{district}' in province '{province}' on line {line}")]
    DuplicateDistrict {
        line: u64,
        province: String,
        district: String,
    },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to read the dataset file
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for census loading operations
pub type Result<T> = std::result::Result<T, CensusError>;
