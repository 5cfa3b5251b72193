//! In-memory tabular data as produced by the parsers.

use chrono::NaiveDateTime;
use std::fmt;

use crate::utils::{parse_locale_float, parse_timestamp};

pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell value. CSV input only ever yields `Empty` and `Text`; workbooks keep
/// their native types.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Trimmed text, with blank strings collapsed to `Empty`.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => parse_locale_float(s).ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Non-empty textual form. Integral numbers render without a fractional part, so a
    /// specimen number read as `3.0` from a workbook becomes `"3"`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            other => Some(other.to_string()),
        }
    }

    pub fn as_datetime<S: AsRef<str>>(&self, formats: &[S]) -> Option<NaiveDateTime> {
        match self {
            Cell::DateTime(dt) => Some(*dt),
            Cell::Text(s) => parse_timestamp(s, formats),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::DateTime(dt) => write!(f, "{}", dt.format(TIMESTAMP_DISPLAY_FORMAT)),
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

impl From<Option<NaiveDateTime>> for Cell {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Cell::Empty, Cell::DateTime)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Cell::Empty, Cell::Text)
    }
}

/// Named columns over rows of cells. Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Appends a row, padding with `Empty` or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `row` in the named column; `None` if either is absent.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// Relabels every column; rows are untouched.
    pub fn rename_columns<F>(self, mut rename: F) -> Table
    where
        F: FnMut(&str) -> String,
    {
        Table {
            columns: self.columns.iter().map(|c| rename(c)).collect(),
            rows: self.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_rows_are_padded_and_truncated() {
        let table = Table::from_rows(
            cols(&["a", "b"]),
            vec![
                vec![Cell::from_text("1")],
                vec![Cell::from_text("1"), Cell::from_text("2"), Cell::from_text("3")],
            ],
        );
        assert_eq!(table.rows()[0], vec![Cell::Text("1".into()), Cell::Empty]);
        assert_eq!(table.rows()[1].len(), 2);
    }

    #[test]
    fn test_cell_conversions() {
        assert_eq!(Cell::from_text("   "), Cell::Empty);
        assert_eq!(Cell::from_text(" 6,5 ").as_f64(), Some(6.5));
        assert_eq!(Cell::Text("abc".into()).as_f64(), None);
        assert_eq!(Cell::Number(3.0).as_text().as_deref(), Some("3"));
        assert_eq!(Cell::Number(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(Cell::Empty.as_text(), None);

        let formats = PipelineConfig::default().timestamp_formats;
        assert!(Cell::Text("2025-05-01 10:00".into()).as_datetime(&formats).is_some());
        assert!(Cell::Number(1.0).as_datetime(&formats).is_none());
    }

    #[test]
    fn test_get_and_rename() {
        let table = Table::from_rows(
            cols(&[" Temp "]),
            vec![vec![Cell::Number(21.0)]],
        );
        let table = table.rename_columns(|c| c.trim().to_lowercase());
        assert_eq!(table.columns(), &["temp".to_string()]);
        assert_eq!(table.get(0, "temp"), Some(&Cell::Number(21.0)));
        assert_eq!(table.get(1, "temp"), None);
        assert_eq!(table.get(0, "missing"), None);
    }
}
