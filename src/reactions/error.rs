use crate::tabular::ParseError;

/// Errors that can occur while building or exporting reaction lookups
#[derive(Debug, thiserror::Error)]
pub enum ReactionError {
    /// The reaction table is not valid delimited text
    #[error("Failed to parse reaction table: {0}")]
    Parse(#[from] ParseError),

    /// A required column is absent from the header
    #[error("Missing required column '{0}' in reaction table")]
    MissingColumn(String),

    /// Tolerance outside the accepted window
    #[error("Tolerance {0} Da is outside [{min}, {max}]", min = super::MIN_TOLERANCE, max = super::MAX_TOLERANCE)]
    ToleranceOutOfRange(f64),

    /// CSV writer error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
