//! In-memory grid backed by an ordered map.

use super::{CellRange, CellValue, Grid};
use std::collections::BTreeMap;
use tracing::warn;

/// Sparse in-memory grid.
///
/// Cells are kept in row-major order so they can be streamed straight into a
/// worksheet. Merged ranges never overlap: a merge that would overlap an
/// existing one is dropped with a warning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGrid {
    cells: BTreeMap<(u32, u32), CellValue>,
    merges: Vec<CellRange>,
}

impl MemoryGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell holds a value.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), &CellValue)> {
        self.cells.iter().map(|(position, value)| (*position, value))
    }

    /// Merged ranges in the order they were added.
    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// Bounding box of all cells and merges, `None` for an empty grid.
    pub fn dimension(&self) -> Option<CellRange> {
        let cells = self
            .cells
            .keys()
            .map(|&(row, col)| CellRange::new(row, col, row, col));

        cells
            .chain(self.merges.iter().copied())
            .reduce(|acc, range| acc.union(&range))
    }
}

impl Grid for MemoryGrid {
    fn set_cell(&mut self, row: u32, col: u32, value: CellValue) {
        debug_assert!(row >= 1 && col >= 1, "grid coordinates are 1-based");

        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    fn merge(&mut self, range: CellRange) {
        if range.is_single_cell() || self.merges.contains(&range) {
            return;
        }

        if let Some(existing) = self.merges.iter().find(|m| m.overlaps(&range)) {
            warn!(
                range = %range.to_a1(),
                existing = %existing.to_a1(),
                "ignoring merge that overlaps an existing one"
            );
            return;
        }

        self.merges.push(range);
    }
}
