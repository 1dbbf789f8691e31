//! Save data types for novel-flow
//!
//! This module defines the save slot structures held by the store and the
//! envelope written to disk by the storage backends.

use crate::gallery::ImageId;
use crate::narrative::NarrativeProgress;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Save slot identifier (1-based, drawn from a fixed set)
pub type SlotId = u8;

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// A single addressable save slot
///
/// An empty slot carries no contents at all, so a slot can never be
/// half-filled (e.g. a name without a timestamp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSlot {
    pub id: SlotId,
    pub contents: Option<SlotContents>,
}

/// Everything a non-empty slot holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotContents {
    /// Display name shown in the slot list
    pub name: String,
    pub saved_at: DateTime<Local>,
    /// Short "where am I" label shown under the name
    pub scene_label: String,
    /// Opaque reference handed to the presentation layer
    pub thumbnail: String,
    /// Full snapshot, so loading resumes exactly where the player saved
    pub progress: NarrativeProgress,
}

impl SaveSlot {
    /// Creates an empty slot
    pub fn empty(id: SlotId) -> Self {
        SaveSlot { id, contents: None }
    }

    /// Builds a filled slot from the given narrative progress
    ///
    /// The stored snapshot is normalized, so a slot never holds visible
    /// choices without any choices to show.
    pub fn from_progress(id: SlotId, progress: &NarrativeProgress, saved_at: DateTime<Local>) -> Self {
        SaveSlot {
            id,
            contents: Some(SlotContents {
                name: format!("Save {}", id),
                saved_at,
                scene_label: progress.scene_label(),
                thumbnail: progress.background_ref.clone(),
                progress: progress.clone().normalized(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.contents.as_ref().map(|c| c.name.as_str())
    }

    pub fn saved_at(&self) -> Option<DateTime<Local>> {
        self.contents.as_ref().map(|c| c.saved_at)
    }

    pub fn scene_label(&self) -> Option<&str> {
        self.contents.as_ref().map(|c| c.scene_label.as_str())
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.contents.as_ref().map(|c| c.thumbnail.as_str())
    }
}

/// The root save file structure written by [`super::SaveManager`]
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub slot: SaveSlot,
}

/// Persisted gallery unlock list
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UnlockFile {
    pub version: u32,
    pub unlocked: Vec<ImageId>,
}

/// Error types for the storage collaborator
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid save version: {0}")]
    InvalidVersion(u32),

    #[error("Corrupted save data: {0}")]
    CorruptedData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_has_no_display_fields() {
        let slot = SaveSlot::empty(2);

        assert!(slot.is_empty());
        assert!(slot.name().is_none());
        assert!(slot.saved_at().is_none());
        assert!(slot.scene_label().is_none());
        assert!(slot.thumbnail().is_none());
    }

    #[test]
    fn test_filled_slot_has_all_display_fields() {
        let progress = NarrativeProgress::default();
        let slot = SaveSlot::from_progress(4, &progress, Local::now());

        assert!(!slot.is_empty());
        assert_eq!(slot.name(), Some("Save 4"));
        assert_eq!(slot.scene_label(), Some("chapter1 / scene1_1"));
        assert_eq!(slot.thumbnail(), Some(progress.background_ref.as_str()));
        assert!(slot.saved_at().is_some());
    }
}
