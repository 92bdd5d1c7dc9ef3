//! Two-axis cell grid the layout engine writes into.
//!
//! Coordinates are 1-based `(row, column)` pairs, matching spreadsheet
//! conventions. The [`Grid`] trait is the only thing the layout engine knows
//! about; [`MemoryGrid`] stores cells in memory and [`XlsxWriter`] persists it.

pub mod memory;
pub mod xlsx;

pub use memory::MemoryGrid;
pub use xlsx::XlsxWriter;

use crate::models::ParamValue;
use serde::Serialize;
use std::fmt;

/// Value stored in a grid cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value; setting a cell to `Empty` clears it
    #[default]
    Empty,
    /// Text
    Text(String),
    /// Floating-point number
    Number(f64),
    /// Whole number
    Integer(i64),
}

impl CellValue {
    /// Returns true for [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(text: Option<&str>) -> Self {
        text.map_or(Self::Empty, Self::from)
    }
}

impl From<&ParamValue> for CellValue {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Real(number) => Self::Number(*number),
            ParamValue::Integer(number) => Self::Integer(*number),
            ParamValue::Text(text) => Self::Text(text.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Integer(number) => write!(f, "{number}"),
        }
    }
}

/// Rectangular, inclusive cell range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top row (1-based)
    pub first_row: u32,
    /// Left column (1-based)
    pub first_col: u32,
    /// Bottom row, inclusive
    pub last_row: u32,
    /// Right column, inclusive
    pub last_col: u32,
}

impl CellRange {
    /// Creates a range from two corners in any order.
    pub fn new(row_a: u32, col_a: u32, row_b: u32, col_b: u32) -> Self {
        Self {
            first_row: row_a.min(row_b),
            first_col: col_a.min(col_b),
            last_row: row_a.max(row_b),
            last_col: col_a.max(col_b),
        }
    }

    /// A horizontal span on one row.
    pub fn row_span(row: u32, first_col: u32, last_col: u32) -> Self {
        Self::new(row, first_col, row, last_col)
    }

    /// A vertical span in one column.
    pub fn column_span(col: u32, first_row: u32, last_row: u32) -> Self {
        Self::new(first_row, col, last_row, col)
    }

    /// Returns true if the range covers exactly one cell.
    pub fn is_single_cell(&self) -> bool {
        self.first_row == self.last_row && self.first_col == self.last_col
    }

    /// Returns true if the cell lies inside the range.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    /// Returns true if the two ranges share at least one cell.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }

    /// Smallest range covering both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            first_row: self.first_row.min(other.first_row),
            first_col: self.first_col.min(other.first_col),
            last_row: self.last_row.max(other.last_row),
            last_col: self.last_col.max(other.last_col),
        }
    }

    /// A1-style reference such as `D1:E1` (or `D4` for a single cell).
    pub fn to_a1(&self) -> String {
        let start = cell_reference(self.first_row, self.first_col);
        if self.is_single_cell() {
            start
        } else {
            format!("{start}:{}", cell_reference(self.last_row, self.last_col))
        }
    }
}

/// Last row a worksheet can hold.
pub const MAX_ROW: u32 = 1_048_576;

/// Last column a worksheet can hold (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;

/// Converts a 1-based column number into letters (`1` -> `A`, `27` -> `AA`).
pub fn column_name(col: u32) -> String {
    debug_assert!(col >= 1, "columns are 1-based");

    let mut letters = Vec::new();
    let mut remaining = col;
    while remaining > 0 {
        let offset = (remaining - 1) % 26;
        letters.push(char::from(b'A' + offset as u8));
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1-style reference of a single cell.
pub fn cell_reference(row: u32, col: u32) -> String {
    format!("{}{row}", column_name(col))
}

/// Abstract cell store with merged spans.
///
/// Rows and columns are 1-based.
pub trait Grid {
    /// Sets a cell, replacing any previous value. `Empty` clears the cell.
    fn set_cell(&mut self, row: u32, col: u32, value: CellValue);

    /// Reads a cell; `None` if it was never set or was cleared.
    fn cell(&self, row: u32, col: u32) -> Option<&CellValue>;

    /// Marks a rectangular range as one merged cell.
    fn merge(&mut self, range: CellRange);

    /// Merges `first_col..=last_col` on one row.
    fn merge_row_span(&mut self, row: u32, first_col: u32, last_col: u32) {
        self.merge(CellRange::row_span(row, first_col, last_col));
    }

    /// Merges `first_row..=last_row` in one column.
    fn merge_column_span(&mut self, col: u32, first_row: u32, last_row: u32) {
        self.merge(CellRange::column_span(col, first_row, last_row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(1), "A");
        assert_eq!(column_name(4), "D");
        assert_eq!(column_name(26), "Z");
        assert_eq!(column_name(27), "AA");
        assert_eq!(column_name(52), "AZ");
        assert_eq!(column_name(53), "BA");
        assert_eq!(column_name(702), "ZZ");
        assert_eq!(column_name(703), "AAA");
    }

    #[test]
    fn test_range_a1() {
        assert_eq!(CellRange::row_span(1, 4, 5).to_a1(), "D1:E1");
        assert_eq!(CellRange::column_span(2, 3, 7).to_a1(), "B3:B7");
        assert_eq!(CellRange::new(4, 4, 4, 4).to_a1(), "D4");
        // Corners are normalized
        assert_eq!(CellRange::new(5, 3, 1, 1).to_a1(), "A1:C5");
    }

    #[test]
    fn test_range_overlap_and_contains() {
        let a = CellRange::row_span(1, 4, 7);
        let b = CellRange::row_span(1, 6, 9);
        let c = CellRange::row_span(2, 4, 7);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.contains(1, 5));
        assert!(!a.contains(2, 5));
        assert_eq!(a.union(&c).to_a1(), "D1:G2");
    }

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(&ParamValue::Real(1.5)), CellValue::Number(1.5));
        assert_eq!(CellValue::from(&ParamValue::Integer(2)), CellValue::Integer(2));
        assert_eq!(CellValue::from(None::<&str>), CellValue::Empty);
        assert_eq!(CellValue::from(Some("F")), CellValue::Text("F".to_string()));
        assert!(CellValue::default().is_empty());
        assert_eq!(CellValue::Integer(7).to_string(), "7");
    }
}
