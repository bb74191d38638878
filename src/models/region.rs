// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Region data structures.
//!
//! This module defines the rectangle value type that every other part of
//! the crate stores, serializes, and edits.

use serde::{Deserialize, Serialize};

/// A rectangular region of interest in source-image pixel coordinates.
///
/// Field order is significant: `top, bottom, left, right` is the column
/// order of the CSV interchange format and the field order of the autosave
/// binary record.
///
/// No ordering is enforced between `top`/`bottom` or `left`/`right`; the
/// coordinates are stored exactly as the user entered them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl RegionRecord {
    /// Create a new region from raw pixel coordinates.
    pub fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

/// The editable fields of a [`RegionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionField {
    Top,
    Bottom,
    Left,
    Right,
}

impl RegionField {
    /// Position of the field in the record's canonical order.
    pub fn index(self) -> usize {
        match self {
            RegionField::Top => 0,
            RegionField::Bottom => 1,
            RegionField::Left => 2,
            RegionField::Right => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_field_wise() {
        let a = RegionRecord::new(10, 50, 20, 60);
        let b = RegionRecord::new(10, 50, 20, 60);
        let c = RegionRecord::new(10, 50, 20, 61);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_inverted_coordinates_are_preserved() {
        // top greater than bottom is legal and must not be normalized
        let r = RegionRecord::new(50, 10, 60, 20);

        assert_eq!(r.top, 50);
        assert_eq!(r.bottom, 10);
        assert_eq!(r.left, 60);
        assert_eq!(r.right, 20);
    }
}
