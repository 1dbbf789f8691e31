//! Storage collaborator interface
//!
//! The flow controller keeps slots and unlocks in memory. A `SlotStorage`
//! materializes them at startup and makes mutations durable.

use super::types::{SaveError, SaveSlot, SlotId};
use crate::gallery::ImageId;
use std::collections::BTreeMap;

/// Durable backing for save slots and gallery unlocks
pub trait SlotStorage {
    /// Loads every readable, non-empty slot among `ids`
    ///
    /// A slot that cannot be read is reported as empty rather than failing
    /// the whole load.
    fn load_slots(&self, ids: &[SlotId]) -> Result<Vec<SaveSlot>, SaveError>;

    /// Persists a single slot; either the whole slot is written or nothing is
    fn persist_slot(&mut self, slot: &SaveSlot) -> Result<(), SaveError>;

    /// Loads the ids of unlocked gallery images
    fn load_unlocks(&self) -> Result<Vec<ImageId>, SaveError>;

    /// Persists the full list of unlocked gallery images
    fn persist_unlocks(&mut self, unlocked: &[ImageId]) -> Result<(), SaveError>;
}

/// In-memory storage, used when nothing should touch disk
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: BTreeMap<SlotId, SaveSlot>,
    unlocked: Vec<ImageId>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with an IO error
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Slot as last persisted, if any
    pub fn stored_slot(&self, id: SlotId) -> Option<&SaveSlot> {
        self.slots.get(&id)
    }

    pub fn stored_unlocks(&self) -> &[ImageId] {
        &self.unlocked
    }

    fn check_writable(&self) -> Result<(), SaveError> {
        if self.fail_writes {
            return Err(SaveError::Io(std::io::Error::other("storage is read-only")));
        }
        Ok(())
    }
}

impl SlotStorage for MemoryStorage {
    fn load_slots(&self, ids: &[SlotId]) -> Result<Vec<SaveSlot>, SaveError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.slots.get(id).cloned())
            .collect())
    }

    fn persist_slot(&mut self, slot: &SaveSlot) -> Result<(), SaveError> {
        self.check_writable()?;
        self.slots.insert(slot.id, slot.clone());
        Ok(())
    }

    fn load_unlocks(&self) -> Result<Vec<ImageId>, SaveError> {
        Ok(self.unlocked.clone())
    }

    fn persist_unlocks(&mut self, unlocked: &[ImageId]) -> Result<(), SaveError> {
        self.check_writable()?;
        self.unlocked = unlocked.to_vec();
        Ok(())
    }
}
