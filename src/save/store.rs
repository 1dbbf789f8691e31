use super::types::{SaveSlot, SlotId};
use crate::error::FlowError;
use crate::narrative::NarrativeProgress;
use chrono::{DateTime, Local};

/// Fixed-size collection of save slots
///
/// Slot ids run from 1 to `slot_count` and never change. Slots are only ever
/// overwritten, never removed, so `list_slots` always returns the full set
/// in id order.
#[derive(Debug, Clone)]
pub struct SaveSlotStore {
    slots: Vec<SaveSlot>,
}

impl SaveSlotStore {
    /// Creates a store with `slot_count` empty slots
    pub fn new(slot_count: SlotId) -> Self {
        SaveSlotStore {
            slots: (1..=slot_count).map(SaveSlot::empty).collect(),
        }
    }

    /// Creates a store and fills it with slots materialized by a loader
    ///
    /// Loaded slots with ids outside the fixed set are dropped.
    pub fn from_slots(slot_count: SlotId, loaded: Vec<SaveSlot>) -> Self {
        let mut store = Self::new(slot_count);
        for slot in loaded {
            let id = slot.id;
            if store.replace(slot).is_err() {
                tracing::warn!("Ignoring loaded save for unknown slot {}", id);
            }
        }
        store
    }

    /// All slots, ordered by id
    pub fn list_slots(&self) -> &[SaveSlot] {
        &self.slots
    }

    /// Ids of the fixed slot set
    pub fn ids(&self) -> Vec<SlotId> {
        self.slots.iter().map(|slot| slot.id).collect()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: SlotId) -> Result<&SaveSlot, FlowError> {
        self.index_of(id)
            .map(|index| &self.slots[index])
            .ok_or(FlowError::UnknownSlot(id))
    }

    /// Number of slots currently holding a save
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// Builds the slot a save would produce, without touching the store
    ///
    /// Used by the save workflow so the storage collaborator can persist the
    /// slot before it becomes visible in memory.
    pub fn prepare_save(
        &self,
        id: SlotId,
        progress: &NarrativeProgress,
        saved_at: DateTime<Local>,
    ) -> Result<SaveSlot, FlowError> {
        if !self.contains(id) {
            return Err(FlowError::UnknownSlot(id));
        }
        Ok(SaveSlot::from_progress(id, progress, saved_at))
    }

    /// Overwrites the slot with the same id
    pub fn replace(&mut self, slot: SaveSlot) -> Result<&SaveSlot, FlowError> {
        let index = self.index_of(slot.id).ok_or(FlowError::UnknownSlot(slot.id))?;
        self.slots[index] = slot;
        Ok(&self.slots[index])
    }

    /// Writes `progress` into the slot, stamped with the current time
    pub fn commit_save(
        &mut self,
        id: SlotId,
        progress: &NarrativeProgress,
    ) -> Result<SaveSlot, FlowError> {
        let slot = self.prepare_save(id, progress, Local::now())?;
        self.replace(slot.clone())?;
        Ok(slot)
    }

    /// Returns the progress stored by the last successful save to this slot
    pub fn load_slot(&self, id: SlotId) -> Result<NarrativeProgress, FlowError> {
        let slot = self.get(id)?;
        slot.contents
            .as_ref()
            .map(|contents| contents.progress.clone())
            .ok_or(FlowError::EmptySlot(id))
    }

    fn index_of(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_lists_every_slot_empty() {
        let store = SaveSlotStore::new(6);
        let ids: Vec<SlotId> = store.list_slots().iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(store.list_slots().iter().all(|s| s.is_empty()));
        assert_eq!(store.occupied_count(), 0);
    }

    #[test]
    fn test_commit_then_load_round_trip() {
        let mut store = SaveSlotStore::new(6);
        let progress = NarrativeProgress::at("chapter2", "scene2_3", 14);

        for id in store.ids() {
            store.commit_save(id, &progress).unwrap();
            let loaded = store.load_slot(id).unwrap();
            assert_eq!(loaded.chapter_id, "chapter2");
            assert_eq!(loaded.scene_id, "scene2_3");
            assert_eq!(loaded, progress);
        }
    }

    #[test]
    fn test_commit_unknown_slot() {
        let mut store = SaveSlotStore::new(6);
        let result = store.commit_save(7, &NarrativeProgress::default());

        assert!(matches!(result, Err(FlowError::UnknownSlot(7))));
        assert_eq!(store.occupied_count(), 0);
    }

    #[test]
    fn test_load_empty_and_unknown_slot() {
        let store = SaveSlotStore::new(6);

        assert!(matches!(store.load_slot(3), Err(FlowError::EmptySlot(3))));
        assert!(matches!(store.load_slot(0), Err(FlowError::UnknownSlot(0))));
    }

    #[test]
    fn test_commit_is_idempotent_apart_from_timestamp() {
        let mut store = SaveSlotStore::new(6);
        let progress = NarrativeProgress::at("chapter1", "scene1_4", 3);

        let first = store.commit_save(2, &progress).unwrap();
        let second = store.commit_save(2, &progress).unwrap();

        let mut first_contents = first.contents.unwrap();
        let second_contents = second.contents.unwrap();
        assert!(second_contents.saved_at >= first_contents.saved_at);
        first_contents.saved_at = second_contents.saved_at;
        assert_eq!(first_contents, second_contents);
    }

    #[test]
    fn test_committed_slot_never_shows_missing_choices() {
        let mut store = SaveSlotStore::new(6);
        let json = r#"{
            "chapter_id": "chapter2",
            "scene_id": "scene2_1",
            "dialogue_index": 4,
            "character_name": "",
            "dialogue_text": "",
            "background_ref": "",
            "character_ref": "",
            "pending_choices": [],
            "choices_visible": true
        }"#;
        let progress: NarrativeProgress = serde_json::from_str(json).unwrap();

        store.commit_save(1, &progress).unwrap();
        let loaded = store.load_slot(1).unwrap();

        assert!(loaded.pending_choices().is_empty());
        assert!(!loaded.choices_visible());
        assert_eq!(loaded.dialogue_index, 4);
    }

    #[test]
    fn test_from_slots_drops_unknown_ids() {
        let progress = NarrativeProgress::default();
        let loaded = vec![
            SaveSlot::from_progress(2, &progress, Local::now()),
            SaveSlot::from_progress(9, &progress, Local::now()),
        ];
        let store = SaveSlotStore::from_slots(6, loaded);

        assert_eq!(store.list_slots().len(), 6);
        assert!(!store.get(2).unwrap().is_empty());
        assert_eq!(store.occupied_count(), 1);
    }

    #[test]
    fn test_prepare_does_not_mutate() {
        let store = SaveSlotStore::new(6);
        let slot = store.prepare_save(5, &NarrativeProgress::default(), Local::now()).unwrap();

        assert!(!slot.is_empty());
        assert!(store.get(5).unwrap().is_empty());
    }
}
