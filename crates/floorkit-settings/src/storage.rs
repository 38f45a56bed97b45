//! Directory-backed key-value storage.
//!
//! Each slot is one file `<dir>/<slot>.json`. Writes go to a temporary file
//! in the same directory which is then renamed over the slot, so a slot
//! always holds either the old or the new document.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::StorageSettings;
use crate::error::{SettingsError, SettingsResult};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
    slot: String,
}

impl LocalStorage {
    /// Storage in `dir` whose default slot is `slot`.
    pub fn new(dir: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            slot: slot.into(),
        }
    }

    /// Resolves the directory from settings, falling back to
    /// `<platform data dir>/floorkit`.
    pub fn from_settings(settings: &StorageSettings) -> SettingsResult<Self> {
        let dir = match &settings.directory {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|d| d.join("floorkit"))
                .ok_or_else(|| {
                    SettingsError::ConfigDirectory("No platform data directory".to_string())
                })?,
        };
        Ok(Self::new(dir, settings.slot.clone()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn slot_path(&self, slot: &str) -> SettingsResult<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !slot.starts_with('.');
        if !valid {
            return Err(SettingsError::InvalidSlot(slot.to_string()));
        }
        Ok(self.dir.join(format!("{slot}.json")))
    }

    /// Replaces the contents of `slot`.
    pub fn write_slot(&self, slot: &str, contents: &str) -> SettingsResult<()> {
        let path = self.slot_path(slot)?;
        std::fs::create_dir_all(&self.dir)?;

        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(contents.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| SettingsError::IoError(e.error))?;

        info!("Saved slot '{}' to {}", slot, path.display());
        Ok(())
    }

    /// Reads `slot`, or `None` when it has never been written.
    pub fn read_slot(&self, slot: &str) -> SettingsResult<Option<String>> {
        let path = self.slot_path(slot)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Slot '{}' is empty", slot);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes `slot`. Returns whether anything was removed.
    pub fn remove_slot(&self, slot: &str) -> SettingsResult<bool> {
        let path = self.slot_path(slot)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the default slot.
    pub fn save(&self, contents: &str) -> SettingsResult<()> {
        self.write_slot(&self.slot, contents)
    }

    /// Reads the default slot.
    pub fn load(&self) -> SettingsResult<Option<String>> {
        self.read_slot(&self.slot)
    }
}
