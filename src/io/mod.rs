// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: the CSV interchange format and the autosave
//! crash-recovery snapshots.

pub mod autosave;
pub mod csv;
