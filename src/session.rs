// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session orchestration: load/save policy, backup recovery, and the
//! autosave-on-every-mutation rule.
//!
//! The controller owns the region store for one open project and is the
//! single integration point the UI layer calls into. Yes/no prompts and
//! the project-name dialog are supplied by the UI through [`UiBridge`];
//! everything else (state checks, duplicate-backup detection, autosave
//! scheduling) lives here.

use crate::error::{Error, Result};
use crate::io::autosave::{self, AutoSave};
use crate::io::csv;
use crate::models::region::{RegionField, RegionRecord};
use crate::models::store::{ChangeScope, RegionStore};
use std::path::{Path, PathBuf};

/// Decision points the excluded UI layer answers synchronously.
pub trait UiBridge {
    /// Ask the user a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Ask the user for a project name, offering `default`. `None` means
    /// the user cancelled.
    fn choose_project_name(&mut self, default: &str) -> Option<String>;
}

/// Whether an image is currently open in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoImage,
    ImageLoaded,
}

/// What a load request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The chosen CSV file was decoded and installed.
    LoadedCsv,
    /// A matching backup snapshot was recovered instead of the CSV.
    LoadedBackup,
    /// The user declined a confirmation; nothing changed.
    Cancelled,
}

const OVERWRITE_PROMPT: &str = "You will lose the current data. Continue?";
const DUPLICATE_BACKUP_PROMPT: &str = "A backup of the project exists. Load instead?";

/// Orchestrates one annotation session over a single open project.
///
/// Every successful data mutation is followed by a full rewrite of the
/// session's autosave file, created lazily on the first mutation. The
/// backup directory doubles as the discovery namespace for recovering
/// earlier sessions; one running instance per directory is assumed.
pub struct SessionController {
    state: SessionState,
    project: Option<String>,
    store: RegionStore,
    autosave: Option<AutoSave>,
    backup_dir: PathBuf,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    /// Create a controller using the process working directory for
    /// autosave and backup discovery.
    pub fn new() -> Self {
        Self::with_backup_dir(PathBuf::from("."))
    }

    /// Create a controller with an explicit backup directory.
    pub fn with_backup_dir(backup_dir: PathBuf) -> Self {
        Self {
            state: SessionState::NoImage,
            project: None,
            store: RegionStore::new(),
            autosave: None,
            backup_dir,
        }
    }

    /// Begin an image session: prompt for a project name (defaulting to
    /// `default_name`, typically the image file's stem) and mark the
    /// session as having an image.
    ///
    /// Returns the chosen project name, or `None` when the user
    /// cancelled, in which case nothing changes.
    pub fn load_image_session(
        &mut self,
        default_name: &str,
        ui: &mut dyn UiBridge,
    ) -> Option<String> {
        let reply = ui.choose_project_name(default_name)?;

        // An empty reply falls back to the offered default.
        let name = if reply.is_empty() {
            default_name.to_string()
        } else {
            reply
        };

        log::info!("Starting image session for project {:?}", name);
        self.project = Some(name.clone());
        self.state = SessionState::ImageLoaded;
        Some(name)
    }

    /// Append a region and autosave.
    pub fn add_region(&mut self, record: RegionRecord) -> Result<()> {
        self.store.add(record);
        self.autosave_now()
    }

    /// Replace the whole region list and autosave.
    pub fn replace_regions(&mut self, records: Vec<RegionRecord>) -> Result<()> {
        self.store.replace(records);
        self.autosave_now()
    }

    /// Edit one field of one region (table-cell edit) and autosave.
    pub fn update_region(&mut self, row: usize, field: RegionField, value: u32) -> Result<()> {
        self.store.update(row, field, value)?;
        self.autosave_now()
    }

    /// Load region data from a CSV file.
    ///
    /// Requires an image to be present. When regions already exist the
    /// user must confirm the overwrite. Before touching the CSV, the
    /// backup directory is scanned for a snapshot of the same project;
    /// if one exists the user may recover it instead (backups are
    /// treated as potentially more recent than the CSV). A malformed
    /// CSV fails the whole load and the store is left untouched.
    pub fn load_csv(&mut self, path: &Path, ui: &mut dyn UiBridge) -> Result<LoadOutcome> {
        if self.state == SessionState::NoImage {
            return Err(Error::PreconditionFailed(
                "loading region data requires an image".to_string(),
            ));
        }

        if !self.store.is_empty() && !ui.confirm(OVERWRITE_PROMPT) {
            log::info!("CSV load cancelled at overwrite prompt");
            return Ok(LoadOutcome::Cancelled);
        }

        if let Some(backup) = self.find_matching_backup() {
            if ui.confirm(DUPLICATE_BACKUP_PROMPT) {
                return self.load_backup(&backup);
            }
        }

        let (project, regions) = csv::decode_from_path(path)?;
        log::info!(
            "Loaded {} region(s) for project {:?} from {}",
            regions.len(),
            project,
            path.display()
        );

        self.project = Some(project);
        // A file load starts a fresh autosave file for the new contents.
        self.autosave = None;
        self.replace_regions(regions)?;
        Ok(LoadOutcome::LoadedCsv)
    }

    /// Recover a specific backup snapshot, adopting its embedded project
    /// name and regions.
    pub fn load_backup(&mut self, path: &Path) -> Result<LoadOutcome> {
        let (project, regions) = autosave::get_backup_project(path).ok_or_else(|| {
            Error::PreconditionFailed(format!(
                "{} is not a readable backup file",
                path.display()
            ))
        })?;

        log::info!(
            "Recovered {} region(s) for project {:?} from backup {}",
            regions.len(),
            project,
            path.display()
        );

        self.project = Some(project);
        self.replace_regions(regions)?;
        Ok(LoadOutcome::LoadedBackup)
    }

    /// Save the current region list to a CSV file.
    ///
    /// Refuses when there is nothing to save.
    pub fn save_csv(&self, path: &Path) -> Result<()> {
        if self.store.is_empty() {
            return Err(Error::PreconditionFailed(
                "there is no data to save".to_string(),
            ));
        }

        let project = self.project.clone().unwrap_or_default();
        csv::encode_to_path(&project, &self.store.get_all(), path)?;
        log::info!(
            "Saved {} region(s) for project {:?} to {}",
            self.store.len(),
            project,
            path.display()
        );
        Ok(())
    }

    /// Project names of every recoverable snapshot in the backup
    /// directory. Best-effort: corrupt files are skipped.
    pub fn list_recoverable_projects(&self) -> Vec<String> {
        autosave::list_backup_projects(&autosave::list_backup_files(&self.backup_dir))
    }

    /// The current project label, if one has been chosen.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// The session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read access to the region store (for the table view and painting).
    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    /// Path of the session's autosave file, once one has been created.
    pub fn autosave_path(&self) -> Option<&Path> {
        self.autosave.as_ref().map(AutoSave::file_path)
    }

    /// Register a repaint callback fired after every store mutation.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(ChangeScope) + 'static,
    {
        self.store.on_change(listener);
    }

    /// Write the current state to the autosave file, creating the file
    /// on first use. The in-memory store is already mutated when this
    /// runs; a failed write is reported but not rolled back.
    fn autosave_now(&mut self) -> Result<()> {
        let project = self.project.clone().unwrap_or_default();

        if self.autosave.is_none() {
            self.autosave = Some(AutoSave::create_in(&self.backup_dir, &project)?);
        }

        if let Some(handle) = &self.autosave {
            if let Err(e) = handle.save(&project, &self.store.get_all()) {
                log::warn!(
                    "Autosave to {} failed: {}",
                    handle.file_path().display(),
                    e
                );
                return Err(e);
            }
        }
        Ok(())
    }

    /// Find a snapshot in the backup directory whose embedded project
    /// name matches the current project. The session's own autosave file
    /// is excluded; it mirrors the live store, not a prior session.
    fn find_matching_backup(&self) -> Option<PathBuf> {
        let own = self.autosave_path();

        autosave::list_backup_files(&self.backup_dir)
            .into_iter()
            .filter(|path| Some(path.as_path()) != own)
            .find(|path| {
                autosave::get_backup_project(path)
                    .map(|(project, _)| Some(project.as_str()) == self.project())
                    .unwrap_or(false)
            })
    }
}
