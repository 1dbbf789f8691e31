//! Save manager for JSON file storage
//!
//! This module provides the SaveManager struct which handles:
//! - Writing one JSON file per save slot
//! - Reading slots back at startup (missing file = empty slot)
//! - Persisting the gallery unlock list
//! - Version checks on everything it reads

use super::storage::SlotStorage;
use super::types::*;
use crate::gallery::ImageId;
use std::fs;
use std::path::{Path, PathBuf};

const GALLERY_FILENAME: &str = "gallery.json";

pub struct SaveManager {
    save_directory: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        tracing::debug!("Save directory: {}", save_dir.display());

        Ok(SaveManager {
            save_directory: save_dir,
        })
    }

    pub fn save_directory(&self) -> &Path {
        &self.save_directory
    }

    /// Check if a save file exists for a given slot
    pub fn save_exists(&self, slot: SlotId) -> bool {
        self.slot_path(slot).exists()
    }

    /// Load a single slot file
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    pub fn load_slot_file(&self, slot: SlotId) -> Result<Option<SaveSlot>, SaveError> {
        let filepath = self.slot_path(slot);
        if !filepath.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&filepath)?;
        let save_file: SaveFile = serde_json::from_str(&json)?;

        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }

        if save_file.slot.id != slot {
            return Err(SaveError::CorruptedData(format!(
                "{} holds slot {}",
                filepath.display(),
                save_file.slot.id
            )));
        }

        let mut loaded = save_file.slot;
        if let Some(contents) = loaded.contents.as_mut() {
            contents.progress = contents.progress.clone().normalized();
        }

        Ok(Some(loaded))
    }

    fn slot_path(&self, slot: SlotId) -> PathBuf {
        self.save_directory.join(format!("slot_{}.json", slot))
    }

    /// Writes `json` next to `path` first, then renames it over `path`
    ///
    /// A crash mid-write leaves the previous file intact.
    fn write_atomically(&self, path: &Path, json: &str) -> Result<(), SaveError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl SlotStorage for SaveManager {
    fn load_slots(&self, ids: &[SlotId]) -> Result<Vec<SaveSlot>, SaveError> {
        let mut slots = Vec::new();
        for &id in ids {
            match self.load_slot_file(id) {
                Ok(Some(slot)) => slots.push(slot),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Treating unreadable save slot {} as empty: {}", id, e);
                }
            }
        }
        Ok(slots)
    }

    fn persist_slot(&mut self, slot: &SaveSlot) -> Result<(), SaveError> {
        let save_file = SaveFile {
            version: CURRENT_SAVE_VERSION,
            slot: slot.clone(),
        };

        // Pretty format for readability/debugging
        let json = serde_json::to_string_pretty(&save_file)?;
        let filepath = self.slot_path(slot.id);
        self.write_atomically(&filepath, &json)?;

        tracing::info!("Game saved to: {}", filepath.display());
        Ok(())
    }

    fn load_unlocks(&self) -> Result<Vec<ImageId>, SaveError> {
        let filepath = self.save_directory.join(GALLERY_FILENAME);
        if !filepath.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&filepath)?;
        let unlocks: UnlockFile = serde_json::from_str(&json)?;

        if unlocks.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(unlocks.version));
        }

        Ok(unlocks.unlocked)
    }

    fn persist_unlocks(&mut self, unlocked: &[ImageId]) -> Result<(), SaveError> {
        let unlocks = UnlockFile {
            version: CURRENT_SAVE_VERSION,
            unlocked: unlocked.to_vec(),
        };
        let json = serde_json::to_string_pretty(&unlocks)?;
        let filepath = self.save_directory.join(GALLERY_FILENAME);
        self.write_atomically(&filepath, &json)
    }
}
