// ============================================================
// Layer 4 — Raw Table
// ============================================================
// A loosely typed, column-named table exactly as read from disk,
// before any validation has happened.
//
// Every cell is one of:
//   Null          — empty field, or one of the NULL_MARKERS below
//   Number(f64)   — anything that parses as a float
//   Text(String)  — everything else
//
// Keeping bad data representable here is what lets the validator
// report *what* is wrong (missing columns, nulls, text in a numeric
// column) instead of the CSV reader failing on the first odd cell.
//
// Reference: Rust Book §6 (Enums), §8 (Collections)

use std::fmt;

/// Field spellings read as a missing value, matched after trimming.
/// Same set pandas' `read_csv` treats as NA by default.
pub const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell of a raw table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
}

impl Value {
    /// Parse one CSV field.
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed) {
            return Value::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_nan() => Value::Null,
            Ok(n)               => Value::Number(n),
            Err(_)              => Value::Text(trimmed.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null      => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s)   => write!(f, "{s}"),
        }
    }
}

/// The inferred type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every non-null cell is a number
    Numeric,
    /// At least one non-null cell is text
    Text,
    /// Every cell is null
    Empty,
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Text    => "text",
            ColumnType::Empty   => "empty",
        }
    }
}

/// Column-named rows of raw cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows:    Vec<Vec<Value>>,
}

impl RawTable {
    /// Build a table. Short rows are padded with nulls; long rows keep
    /// their surplus cells so the validator can reject them.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, Value::Null);
                }
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// First row with more fields than the header, as
    /// `(0-based row index, field count)`.
    pub fn first_overlong_row(&self) -> Option<(usize, usize)> {
        let width = self.columns.len();
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() > width)
            .map(|(i, row)| (i, row.len()))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over the cells of one column.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    pub fn null_count(&self, idx: usize) -> usize {
        self.column(idx).filter(|v| v.is_null()).count()
    }

    pub fn column_type(&self, idx: usize) -> ColumnType {
        let mut saw_number = false;
        for value in self.column(idx) {
            match value {
                Value::Text(_)   => return ColumnType::Text,
                Value::Number(_) => saw_number = true,
                Value::Null      => {}
            }
        }
        if saw_number { ColumnType::Numeric } else { ColumnType::Empty }
    }
}
