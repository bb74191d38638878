// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Table-model view of the region store.
//!
//! A plain data-access interface the display toolkit's table widget binds
//! to from outside the core. Column 0 is the 1-based display row number;
//! the coordinate columns follow the on-screen order, which differs from
//! the CSV column order.

use super::region::RegionField;
use super::store::RegionStore;
use crate::error::{Error, Result};

/// Header strings for the results table, in column order.
pub const COLUMN_HEADERS: [&str; 5] = ["Num", "Left x", "Top y", "Right x", "Bottom y"];

/// Spreadsheet-style access to an ordered row/column grid of cells.
pub trait TableModel {
    /// Number of data rows.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// The value displayed at (`row`, `column`), or `None` when the
    /// address is out of bounds.
    fn get_cell(&self, row: usize, column: usize) -> Option<u32>;

    /// Replace the value at (`row`, `column`).
    ///
    /// Fails with [`Error::InvalidIndex`] for out-of-bounds addresses and
    /// for non-editable columns; no mutation is performed in either case.
    fn set_cell(&mut self, row: usize, column: usize, value: u32) -> Result<()>;

    /// Whether cells in `column` accept edits.
    fn is_editable(&self, column: usize) -> bool;
}

fn column_field(column: usize) -> Option<RegionField> {
    match column {
        1 => Some(RegionField::Left),
        2 => Some(RegionField::Top),
        3 => Some(RegionField::Right),
        4 => Some(RegionField::Bottom),
        _ => None,
    }
}

impl TableModel for RegionStore {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn column_count(&self) -> usize {
        COLUMN_HEADERS.len()
    }

    fn get_cell(&self, row: usize, column: usize) -> Option<u32> {
        let record = self.get(row)?;

        match column {
            0 => Some((row + 1) as u32),
            1 => Some(record.left),
            2 => Some(record.top),
            3 => Some(record.right),
            4 => Some(record.bottom),
            _ => None,
        }
    }

    fn set_cell(&mut self, row: usize, column: usize, value: u32) -> Result<()> {
        let field = column_field(column).ok_or(Error::InvalidIndex { row, column })?;
        self.update(row, field, value)
            .map_err(|_| Error::InvalidIndex { row, column })
    }

    fn is_editable(&self, column: usize) -> bool {
        column_field(column).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::RegionRecord;

    fn store_with_one_region() -> RegionStore {
        let mut store = RegionStore::new();
        store.add(RegionRecord::new(10, 50, 20, 60));
        store
    }

    #[test]
    fn test_cells_follow_display_column_order() {
        let store = store_with_one_region();

        assert_eq!(store.get_cell(0, 0), Some(1)); // 1-based row number
        assert_eq!(store.get_cell(0, 1), Some(20)); // left
        assert_eq!(store.get_cell(0, 2), Some(10)); // top
        assert_eq!(store.get_cell(0, 3), Some(60)); // right
        assert_eq!(store.get_cell(0, 4), Some(50)); // bottom
    }

    #[test]
    fn test_out_of_bounds_cell_is_none() {
        let store = store_with_one_region();

        assert_eq!(store.get_cell(1, 0), None);
        assert_eq!(store.get_cell(0, 5), None);
    }

    #[test]
    fn test_set_cell_routes_to_the_store() {
        let mut store = store_with_one_region();

        store.set_cell(0, 4, 77).unwrap();

        assert_eq!(*store.get(0).unwrap(), RegionRecord::new(10, 77, 20, 60));
    }

    #[test]
    fn test_row_number_column_rejects_edits() {
        let mut store = store_with_one_region();

        assert!(!store.is_editable(0));
        assert!(matches!(
            store.set_cell(0, 0, 3),
            Err(Error::InvalidIndex { row: 0, column: 0 })
        ));
    }

    #[test]
    fn test_dimensions_track_the_store() {
        let store = store_with_one_region();

        assert_eq!(store.row_count(), 1);
        assert_eq!(store.column_count(), 5);
    }
}
