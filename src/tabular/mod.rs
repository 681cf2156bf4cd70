//! # Tabular Parser
//!
//! Parses delimited text (a header line followed by data rows) into typed
//! [`Table`]s. Coercion is an explicit step: every cell goes through
//! [`Value::coerce`], which recognises boolean literals and, when dynamic
//! typing is enabled for the column, numeric literals.
//!
//! The parse is all-or-nothing. Blank lines are skipped; any other row whose
//! field count differs from the header fails with [`ParseError::RaggedRow`].
//!
//! ```rust
//! use mznet::tabular::{ParseOptions, TabularParser, Value};
//!
//! let table = TabularParser::new(ParseOptions::default())
//!     .parse_str("id,mz,isPrototype\n1,100.5,TRUE\n")?;
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.get(&table.records()[0], "mz"), Some(&Value::Number(100.5)));
//! # Ok::<(), mznet::tabular::ParseError>(())
//! ```

mod error;
mod value;

#[cfg(test)]
mod tests;

pub use error::ParseError;
pub use value::{Value, MAX_SAFE_INTEGER};

use serde::Deserialize;
use std::io::Read;

/// Field delimiter selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `,`
    Comma,
    /// `\t`
    Tab,
    /// Guess from the header line
    #[default]
    Auto,
}

impl Delimiter {
    /// Resolve to a concrete delimiter byte for the given text
    pub fn resolve(self, text: &str) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Auto => {
                let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                let tabs = header.matches('\t').count();
                let commas = header.matches(',').count();
                if tabs > commas {
                    b'\t'
                } else {
                    b','
                }
            }
        }
    }
}

/// Numeric coercion policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DynamicTyping {
    /// Strings and booleans only
    Off,
    /// Numeric-looking cells become numbers
    #[default]
    On,
    /// Numeric coercion for every column except the listed ones
    Except(Vec<String>),
}

impl DynamicTyping {
    fn applies_to(&self, column: &str) -> bool {
        match self {
            DynamicTyping::Off => false,
            DynamicTyping::On => true,
            DynamicTyping::Except(columns) => !columns.iter().any(|c| c == column),
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Field delimiter
    pub delimiter: Delimiter,
    /// Numeric coercion policy
    pub dynamic_typing: DynamicTyping,
}

impl ParseOptions {
    /// Options with numeric coercion switched off
    pub fn text_only() -> Self {
        Self {
            dynamic_typing: DynamicTyping::Off,
            ..Default::default()
        }
    }
}

/// One data row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    line: u64,
    values: Vec<Value>,
}

impl Record {
    /// 1-based source line of the row
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Values in header order
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Parsed table: header plus records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Column names, trimmed
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of a column by exact name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// True when the named column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Data rows
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no data rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a cell by column name
    pub fn get<'a>(&self, record: &'a Record, column: &str) -> Option<&'a Value> {
        self.column(column).and_then(|i| record.values.get(i))
    }

    /// Iterate `(column, value)` pairs of a record in header order
    pub fn fields<'a>(&'a self, record: &'a Record) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(record.values.iter())
    }
}

/// Delimited-text parser
#[derive(Debug, Clone, Default)]
pub struct TabularParser {
    options: ParseOptions,
}

impl TabularParser {
    /// Create a parser with the given options
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parser options
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Read the whole input and parse it
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Table, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse_str(&text)
    }

    /// Parse delimited text
    pub fn parse_str(&self, text: &str) -> Result<Table, ParseError> {
        let delimiter = self.options.delimiter.resolve(text);
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ParseError::MissingHeader);
        }

        let numeric: Vec<bool> = headers
            .iter()
            .map(|h| self.options.dynamic_typing.applies_to(h))
            .collect();

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            if row.len() == 1 && row[0].trim().is_empty() {
                continue;
            }

            if row.len() != headers.len() {
                return Err(ParseError::RaggedRow {
                    line,
                    expected: headers.len(),
                    found: row.len(),
                });
            }

            let values = row
                .iter()
                .zip(numeric.iter())
                .map(|(raw, &numeric)| Value::coerce(raw, numeric))
                .collect();

            records.push(Record { line, values });
        }

        log::debug!(
            "Parsed {} rows x {} columns (delimiter {:?})",
            records.len(),
            headers.len(),
            delimiter as char
        );

        Ok(Table { headers, records })
    }
}
