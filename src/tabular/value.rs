use serde::{Serialize, Serializer};
use std::fmt;

/// Largest magnitude whose integers all survive a round trip through `f64`.
///
/// Literals beyond it stay text so distinct large identifiers never collapse.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single coerced cell value.
///
/// Cells start out as text; [`Value::coerce`] turns boolean literals and,
/// when requested, numeric literals into typed values.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Empty cell (treated as absent downstream)
    #[default]
    Empty,
    /// `true` / `false` literal (case-insensitive in the source text)
    Bool(bool),
    /// Finite numeric literal
    Number(f64),
    /// Anything else, verbatim
    Text(String),
}

impl Value {
    /// Coerce raw cell text.
    ///
    /// Booleans are always recognised. Numbers only when `numeric` is set
    /// and their magnitude is within [`MAX_SAFE_INTEGER`].
    pub fn coerce(raw: &str, numeric: bool) -> Self {
        if raw.is_empty() {
            return Value::Empty;
        }
        if raw.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        if numeric && looks_numeric(raw) {
            if let Ok(n) = raw.trim().parse::<f64>() {
                if n.abs() <= MAX_SAFE_INTEGER {
                    return Value::Number(n);
                }
            }
        }
        Value::Text(raw.to_string())
    }

    /// Numeric view of the value, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean view of the value, if it is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text view of the value, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for empty cells
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Canonical string form.
    ///
    /// Numbers print in their shortest round-trip form, so `12` and `12.0`
    /// both become `"12"`.
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Empty => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Decimal literal check: `-?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?` with
/// surrounding whitespace. Rejects `inf`, `nan` and hex forms that
/// `f64::from_str` would otherwise accept.
pub(crate) fn looks_numeric(raw: &str) -> bool {
    let bytes = raw.trim().as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
