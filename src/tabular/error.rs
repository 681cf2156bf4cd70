/// Errors that can occur while parsing delimited text
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// I/O error reading the input
    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    /// Low-level CSV/TSV error (bad quoting, invalid UTF-8)
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Input has no header line
    #[error("Missing header row")]
    MissingHeader,

    /// A row whose column count does not match the header
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        /// 1-based line number in the source text
        line: u64,
        /// Number of header columns
        expected: usize,
        /// Number of fields in the offending row
        found: usize,
    },
}

impl ParseError {
    /// Line number of the offending row, when known
    pub fn line(&self) -> Option<u64> {
        match self {
            ParseError::RaggedRow { line, .. } => Some(*line),
            ParseError::CsvError(e) => e.position().map(|p| p.line()),
            _ => None,
        }
    }
}
