use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values that can be bound as query parameters.
///
/// The same enum feeds the driver binding and the literal "demo" rendering:
/// ```rust
/// use sql_powered::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// The storage kind a driver would pick for this value when no explicit kind is given.
    ///
    /// Integers bind as integers; everything else binds as a string.
    #[must_use]
    pub fn storage_kind(&self) -> StorageKind {
        match self {
            RowValues::Int(_) => StorageKind::Int,
            _ => StorageKind::Str,
        }
    }

    /// Loose integer cast: text is read up to the first non-digit, floats truncate,
    /// booleans become 0/1 and everything else becomes 0.
    #[must_use]
    pub fn cast_int(&self) -> i64 {
        match self {
            RowValues::Int(value) => *value,
            RowValues::Float(value) => *value as i64,
            RowValues::Bool(value) => i64::from(*value),
            RowValues::Text(value) => leading_integer(value),
            RowValues::Timestamp(_) | RowValues::Null | RowValues::JSON(_) | RowValues::Blob(_) => 0,
        }
    }

    /// Loose text cast used both for string wrappers and for literal rendering.
    #[must_use]
    pub fn cast_text(&self) -> String {
        match self {
            RowValues::Int(value) => value.to_string(),
            RowValues::Float(value) => value.to_string(),
            RowValues::Text(value) => value.clone(),
            RowValues::Bool(true) => "1".to_string(),
            RowValues::Bool(false) | RowValues::Null => String::new(),
            RowValues::Timestamp(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            RowValues::JSON(value) => value.to_string(),
            RowValues::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }
    if negative { -value } else { value }
}

/// Driver-level storage kind used when binding a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Int,
    Str,
    Bool,
    Null,
    Lob,
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Timestamp(value)
    }
}
