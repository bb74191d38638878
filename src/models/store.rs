// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The ordered region collection and its change notification.
//!
//! This module manages the in-memory region list for one annotation
//! session. Insertion order is significant: it determines the display row
//! number in the table view and the row order of the CSV interchange file.
//!
//! Consumers that need to repaint after an edit register a callback with
//! [`RegionStore::on_change`]; callbacks run synchronously after every
//! successful mutation.

use super::region::{RegionField, RegionRecord};
use crate::error::{Error, Result};

/// What part of the store a change notification covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeScope {
    /// The whole collection changed (append or bulk replace).
    AllRows,
    /// A single row was edited in place.
    Row(usize),
}

/// Callback invoked after every successful mutation.
pub type ChangeListener = Box<dyn FnMut(ChangeScope)>;

/// An ordered, observable collection of [`RegionRecord`].
///
/// Owned by a single session; mutation is single-threaded.
#[derive(Default)]
pub struct RegionStore {
    regions: Vec<RegionRecord>,
    listeners: Vec<ChangeListener>,
}

impl RegionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region to the end of the collection.
    pub fn add(&mut self, record: RegionRecord) {
        self.regions.push(record);
        self.notify(ChangeScope::AllRows);
    }

    /// Discard all current regions and install `records` verbatim,
    /// preserving the caller's order. Used when loading a CSV file or
    /// recovering a backup.
    pub fn replace(&mut self, records: Vec<RegionRecord>) {
        self.regions = records;
        self.notify(ChangeScope::AllRows);
    }

    /// Owned snapshot of the current contents, in insertion order.
    /// Later mutations are not visible through a returned snapshot.
    pub fn get_all(&self) -> Vec<RegionRecord> {
        self.regions.clone()
    }

    /// Edit one field of the region at `row` in place.
    ///
    /// Returns [`Error::InvalidIndex`] without mutating or notifying when
    /// `row` is out of bounds.
    pub fn update(&mut self, row: usize, field: RegionField, value: u32) -> Result<()> {
        let record = self.regions.get_mut(row).ok_or(Error::InvalidIndex {
            row,
            column: field.index(),
        })?;

        match field {
            RegionField::Top => record.top = value,
            RegionField::Bottom => record.bottom = value,
            RegionField::Left => record.left = value,
            RegionField::Right => record.right = value,
        }

        self.notify(ChangeScope::Row(row));
        Ok(())
    }

    /// Number of regions in the store.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Check if the store has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate over the regions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, RegionRecord> {
        self.regions.iter()
    }

    /// The region at `row`, if in bounds.
    pub fn get(&self, row: usize) -> Option<&RegionRecord> {
        self.regions.get(row)
    }

    /// Register a callback invoked synchronously after every successful
    /// mutation.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(ChangeScope) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, scope: ChangeScope) {
        for listener in &mut self.listeners {
            listener(scope);
        }
    }
}

impl std::fmt::Debug for RegionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionStore")
            .field("regions", &self.regions)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
