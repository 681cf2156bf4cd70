use crate::tabular::ParseError;

/// Errors that can occur while loading a graph from node/edge tables
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// One of the tables is not valid delimited text
    #[error("Failed to parse {table} table: {source}")]
    Parse {
        /// `nodes` or `edges`
        table: &'static str,
        /// Underlying parse failure
        #[source]
        source: ParseError,
    },

    /// A required column is absent from the header
    #[error("Missing required column '{column}' in {table} table")]
    MissingColumn {
        /// `nodes` or `edges`
        table: &'static str,
        /// Column name
        column: String,
    },

    /// A table has no data rows
    #[error("Empty graph data received: {table} table has no rows")]
    EmptyInput {
        /// `nodes` or `edges`
        table: &'static str,
    },

    /// A typed column holds a value of the wrong kind
    #[error("Invalid value {value:?} for '{column}' at line {line} of {table} table")]
    InvalidValue {
        /// `nodes` or `edges`
        table: &'static str,
        /// 1-based source line
        line: u64,
        /// Column name
        column: String,
        /// Offending cell, as text
        value: String,
    },

    /// An `msmsSpectrum` cell is not a list of `[mz, intensity]` pairs
    #[error("Invalid msmsSpectrum at line {line}: {reason}")]
    InvalidSpectrum {
        /// 1-based source line
        line: u64,
        /// Decoder message
        reason: String,
    },
}

impl LoadError {
    /// Source line associated with the failure, when known
    pub fn line(&self) -> Option<u64> {
        match self {
            LoadError::Parse { source, .. } => source.line(),
            LoadError::InvalidValue { line, .. } | LoadError::InvalidSpectrum { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}
