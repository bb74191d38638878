// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: region records, the observable region store, and the
//! table-model view the display layer binds to.

pub mod region;
pub mod store;
pub mod table;
