// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! regiondraw - region annotation data core
//!
//! The headless core of a desktop image-annotation tool: the ordered
//! collection of rectangular regions of interest, the CSV interchange
//! format they are saved to, the crash-recovery autosave snapshots, and
//! the session controller that ties load/save/recovery policy together.
//!
//! Windowing, painting, drag interaction, and dialogs live in a separate
//! UI layer that calls into [`SessionController`] and answers its
//! prompts through [`UiBridge`].

pub mod error;
pub mod io;
pub mod models;
pub mod session;

pub use error::{Error, Result};
pub use models::region::{RegionField, RegionRecord};
pub use models::store::{ChangeScope, RegionStore};
pub use models::table::{COLUMN_HEADERS, TableModel};
pub use session::{LoadOutcome, SessionController, SessionState, UiBridge};
