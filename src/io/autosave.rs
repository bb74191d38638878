// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crash-recovery autosave snapshots.
//!
//! Every live editing session owns one hidden `.idback` file in the
//! working directory, rewritten in full after each data mutation. The
//! file holds a tagged binary record:
//!
//! ```text
//! magic          6 bytes, "idw-01"
//! format version u16 LE
//! project length u32 LE, then that many UTF-8 bytes
//! region count   u32 LE
//! regions        count x (top, bottom, left, right), each u32 LE
//! ```
//!
//! Reading is best-effort by design: stray, truncated, or foreign files
//! in the working directory are skipped during enumeration, never
//! surfaced as errors, so a half-written snapshot cannot block startup
//! or backup browsing.

use crate::error::Result;
use crate::models::region::RegionRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Tag identifying a file as an autosave snapshot of this format.
pub const MAGIC: &[u8; 6] = b"idw-01";

/// Version of the record layout following the magic tag.
pub const FORMAT_VERSION: u16 = 1;

/// File-name suffix used to discover snapshots in a directory.
pub const BACKUP_SUFFIX: &str = ".idback";

/// Handle to one session's autosave backing file.
///
/// The file is created empty and uniquely named at construction; every
/// [`save`](AutoSave::save) truncates it in place and rewrites the whole
/// record. A crash mid-write can therefore leave a short file behind;
/// readers treat such files as absent rather than failing.
#[derive(Debug)]
pub struct AutoSave {
    file_path: PathBuf,
}

impl AutoSave {
    /// Allocate a new, uniquely named backing file in the process's
    /// working directory. No snapshot is written yet.
    pub fn create(project: &str) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::create_in(&cwd, project)
    }

    /// Allocate the backing file in an explicit directory.
    pub fn create_in(dir: &Path, project: &str) -> Result<Self> {
        let (file, file_path) = tempfile::Builder::new()
            .prefix(".")
            .suffix(BACKUP_SUFFIX)
            .tempfile_in(dir)?
            .keep()
            .map_err(|e| e.error)?;
        drop(file);

        log::info!(
            "Created autosave file {} for project {:?}",
            file_path.display(),
            project
        );

        Ok(Self { file_path })
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Overwrite the backing file with a snapshot of `project` and
    /// `regions`.
    ///
    /// The file is truncated and rewritten in place, so the snapshot is
    /// always the most recent state under normal operation. The write is
    /// not atomic across a crash; an interrupted save leaves a file that
    /// later reads skip.
    pub fn save(&self, project: &str, regions: &[RegionRecord]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(MAGIC)?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;

        let name = project.as_bytes();
        writer.write_all(&(name.len() as u32).to_le_bytes())?;
        writer.write_all(name)?;

        writer.write_all(&(regions.len() as u32).to_le_bytes())?;
        for region in regions {
            writer.write_all(&region.top.to_le_bytes())?;
            writer.write_all(&region.bottom.to_le_bytes())?;
            writer.write_all(&region.left.to_le_bytes())?;
            writer.write_all(&region.right.to_le_bytes())?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// List the regular files in `dir` whose name ends with the backup
/// suffix. An unreadable directory yields an empty list.
pub fn list_backup_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot scan {} for backups: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let name = entry.file_name();
        if is_file && name.to_string_lossy().ends_with(BACKUP_SUFFIX) {
            files.push(entry.path());
        }
    }

    files
}

/// Decode each path as a snapshot and collect the project names of those
/// that parse. Empty, truncated, or foreign files are skipped silently;
/// this never fails.
pub fn list_backup_projects(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| get_backup_project(path).map(|(project, _)| project))
        .collect()
}

/// Load one snapshot, returning its embedded project name and regions.
///
/// Returns `None` when the file is missing, unreadable, carries the wrong
/// magic or version, or is structurally truncated.
pub fn get_backup_project(path: &Path) -> Option<(String, Vec<RegionRecord>)> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Skipping unreadable backup {}: {}", path.display(), e);
            return None;
        }
    };

    let snapshot = decode_snapshot(&bytes);
    if snapshot.is_none() && !bytes.is_empty() {
        log::warn!("Skipping unrecognized backup {}", path.display());
    }
    snapshot
}

fn decode_snapshot(bytes: &[u8]) -> Option<(String, Vec<RegionRecord>)> {
    let mut cursor = Cursor { bytes, offset: 0 };

    if cursor.take(MAGIC.len())? != MAGIC {
        return None;
    }
    if cursor.read_u16()? != FORMAT_VERSION {
        return None;
    }

    let name_len = cursor.read_u32()? as usize;
    let project = String::from_utf8(cursor.take(name_len)?.to_vec()).ok()?;

    let count = cursor.read_u32()? as usize;
    // Reject counts the remaining bytes cannot possibly hold before
    // allocating for them.
    if cursor.remaining() < count.checked_mul(16)? {
        return None;
    }

    let mut regions = Vec::with_capacity(count);
    for _ in 0..count {
        let top = cursor.read_u32()?;
        let bottom = cursor.read_u32()?;
        let left = cursor.read_u32()?;
        let right = cursor.read_u32()?;
        regions.push(RegionRecord::new(top, bottom, left, right));
    }

    Some((project, regions))
}

/// Bounds-checked reader over a byte slice.
struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(len)?;
        let slice = self.bytes.get(self.offset..end)?;
        self.offset = end;
        Some(slice)
    }

    fn read_u16(&mut self) -> Option<u16> {
        let bytes = self.take(2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self) -> Option<u32> {
        let bytes = self.take(4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }
}
