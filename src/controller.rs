//! Flow Controller
//!
//! The single intent-processing path of the player. It owns the current
//! screen, the confirmation/loading workflow, the save slots, the gallery
//! and the narrative progress record, and is the only thing that mutates
//! any of them.
//!
//! # Example
//!
//! ```ignore
//! let mut flow = FlowController::new(&FlowConfig::default());
//!
//! flow.request_confirmation(ConfirmationKind::NewGame, None)?;
//! flow.answer(true)?;
//!
//! // In the frame loop
//! if let Some(done) = flow.update()? {
//!     assert_eq!(done.screen, Screen::Narrative);
//! }
//! ```

use crate::config::FlowConfig;
use crate::error::FlowError;
use crate::gallery::{Gallery, GalleryImage, ImageId};
use crate::narrative::{EndingKind, EndingReport, EndingStats, NarrativeProgress, NarrativeSession};
use crate::save::{MemoryStorage, SaveSlot, SaveSlotStore, SlotId, SlotStorage};
use crate::screen::{Navigator, Screen};
use crate::workflow::{
    ConfirmationKind, ConfirmationRequest, ConfirmationWorkflow, LoadingKind, LoadingTask,
    PendingAction, WorkflowState,
};
use chrono::Local;
use std::time::Instant;

/// Result of answering a confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Player said no; nothing changed
    Declined,
    /// Loading period started
    Started(LoadingKind),
    /// Exit confirmed; back on the main menu
    Exited,
}

/// A loading task that finished and was committed
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub kind: LoadingKind,
    pub screen: Screen,
    /// The slot written, for save tasks
    pub saved_slot: Option<SaveSlot>,
}

pub struct FlowController<S: SlotStorage> {
    navigator: Navigator,
    workflow: ConfirmationWorkflow,
    slots: SaveSlotStore,
    gallery: Gallery,
    progress: NarrativeProgress,
    session: Option<NarrativeSession>,
    session_epoch: u64,
    last_ending: Option<EndingReport>,
    storage: S,
}

impl FlowController<MemoryStorage> {
    /// Creates a controller with empty slots and in-memory storage
    pub fn new(config: &FlowConfig) -> Self {
        Self::from_parts(
            config,
            SaveSlotStore::new(config.slot_count),
            Gallery::create_default(),
            MemoryStorage::new(),
        )
    }
}

impl<S: SlotStorage> FlowController<S> {
    /// Creates a controller whose slots and unlocks are materialized from `storage`
    pub fn with_storage(config: &FlowConfig, storage: S) -> Result<Self, FlowError> {
        Self::with_gallery(config, storage, Gallery::create_default())
    }

    /// Like `with_storage`, with a custom gallery catalog
    pub fn with_gallery(config: &FlowConfig, storage: S, mut gallery: Gallery) -> Result<Self, FlowError> {
        let slot_ids: Vec<SlotId> = (1..=config.slot_count).collect();
        let loaded = storage.load_slots(&slot_ids)?;
        let slots = SaveSlotStore::from_slots(config.slot_count, loaded);

        match storage.load_unlocks() {
            Ok(unlocked) => gallery.apply_unlocks(&unlocked),
            Err(e) => tracing::warn!("Ignoring unreadable gallery unlocks: {}", e),
        }

        tracing::info!(
            "Flow controller ready: {}/{} slots in use, {} images unlocked",
            slots.occupied_count(),
            slot_ids.len(),
            gallery.unlocked_ids().len()
        );

        Ok(Self::from_parts(config, slots, gallery, storage))
    }

    fn from_parts(config: &FlowConfig, slots: SaveSlotStore, gallery: Gallery, storage: S) -> Self {
        FlowController {
            navigator: Navigator::new(),
            workflow: ConfirmationWorkflow::new(config.loading_durations()),
            slots,
            gallery,
            progress: NarrativeProgress::default(),
            session: None,
            session_epoch: 0,
            last_ending: None,
            storage,
        }
    }

    // ======================================================================
    // Navigation
    // ======================================================================

    pub fn current_screen(&self) -> Screen {
        self.navigator.current()
    }

    /// Moves to `target`; any screen may move to any other
    ///
    /// Entering `Narrative` always cuts a fresh session from the progress
    /// record. Leaving it drops the session.
    pub fn request_transition(&mut self, target: Screen) -> Screen {
        let transition = self.navigator.request_transition(target);

        if transition.enters(Screen::Narrative) {
            self.session_epoch += 1;
            self.session = Some(NarrativeSession {
                epoch: self.session_epoch,
                progress: self.progress.clone(),
            });
        } else {
            self.session = None;
        }

        self.navigator.current()
    }

    /// Session handed to the narrative engine; `Some` only on the Narrative screen
    pub fn narrative_session(&self) -> Option<&NarrativeSession> {
        self.session.as_ref()
    }

    // ======================================================================
    // Narrative progress
    // ======================================================================

    pub fn narrative_progress(&self) -> &NarrativeProgress {
        &self.progress
    }

    /// Puts the record back to the fresh-start position
    pub fn reset_narrative_progress(&mut self) {
        self.set_narrative_progress(NarrativeProgress::default());
    }

    /// Stores progress reported by the narrative engine
    pub fn set_narrative_progress(&mut self, progress: NarrativeProgress) {
        self.progress = progress.normalized();
        if let Some(session) = self.session.as_mut() {
            session.progress = self.progress.clone();
        }
    }

    // ======================================================================
    // Save slots and gallery
    // ======================================================================

    pub fn list_slots(&self) -> &[SaveSlot] {
        self.slots.list_slots()
    }

    pub fn slots(&self) -> &SaveSlotStore {
        &self.slots
    }

    pub fn list_images(&self) -> &[GalleryImage] {
        self.gallery.list_images()
    }

    pub fn view_image(&self, id: ImageId) -> Result<&GalleryImage, FlowError> {
        self.gallery.view(id)
    }

    /// Narrative milestone reached: unlock a gallery image
    ///
    /// Returns whether the image was newly unlocked. The unlock stands even
    /// if persisting it fails.
    pub fn on_gallery_unlock(&mut self, id: ImageId) -> Result<bool, FlowError> {
        let changed = self.gallery.unlock(id)?;
        if changed {
            tracing::info!("Gallery image {} unlocked", id);
            if let Err(e) = self.storage.persist_unlocks(&self.gallery.unlocked_ids()) {
                tracing::warn!("Failed to persist gallery unlocks: {}", e);
            }
        }
        Ok(changed)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    // ======================================================================
    // Confirmation / loading workflow
    // ======================================================================

    pub fn workflow_state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    pub fn pending_confirmation(&self) -> Option<&ConfirmationRequest> {
        self.workflow.pending_confirmation()
    }

    pub fn loading_task(&self) -> Option<&LoadingTask> {
        self.workflow.loading_task()
    }

    /// Asks the player to confirm a sensitive action
    ///
    /// Slot-scoped kinds must name a slot in the fixed set.
    pub fn request_confirmation(
        &mut self,
        kind: ConfirmationKind,
        target_slot: Option<SlotId>,
    ) -> Result<ConfirmationRequest, FlowError> {
        if !self.workflow.is_idle() {
            return Err(FlowError::WorkflowBusy);
        }

        if kind.is_slot_scoped() {
            let slot = target_slot.ok_or(FlowError::MissingSlot)?;
            self.slots.get(slot)?;
        }

        self.workflow.request_confirmation(kind, target_slot)
    }

    /// Asks to save into `slot`, as an overwrite if the slot is taken
    pub fn request_save(&mut self, slot: SlotId) -> Result<ConfirmationRequest, FlowError> {
        let kind = if self.slots.get(slot)?.is_empty() {
            ConfirmationKind::SaveGame
        } else {
            ConfirmationKind::OverwriteSave
        };
        self.request_confirmation(kind, Some(slot))
    }

    /// Asks to load `slot`; empty slots are refused up front
    pub fn request_load(&mut self, slot: SlotId) -> Result<ConfirmationRequest, FlowError> {
        if self.slots.get(slot)?.is_empty() {
            return Err(FlowError::EmptySlot(slot));
        }
        self.request_confirmation(ConfirmationKind::LoadGame, Some(slot))
    }

    pub fn answer(&mut self, confirmed: bool) -> Result<AnswerOutcome, FlowError> {
        self.answer_at(confirmed, Instant::now())
    }

    /// Answers the outstanding confirmation
    ///
    /// "No" returns to Idle with no side effects. "Yes" starts the loading
    /// period; a load restores the slot now but only applies it when the
    /// loading period ends. Any error also leaves the workflow Idle.
    pub fn answer_at(&mut self, confirmed: bool, now: Instant) -> Result<AnswerOutcome, FlowError> {
        let request = self.workflow.take_confirmation()?;

        if !confirmed {
            tracing::info!("Confirmation declined: {:?}", request.kind);
            return Ok(AnswerOutcome::Declined);
        }

        let action = match request.kind {
            ConfirmationKind::NewGame => PendingAction::NewGame,
            ConfirmationKind::LoadGame => {
                let slot = request.target_slot.ok_or(FlowError::MissingSlot)?;
                let restored = self.slots.load_slot(slot)?;
                PendingAction::LoadGame {
                    slot,
                    restored: Box::new(restored),
                }
            }
            ConfirmationKind::SaveGame | ConfirmationKind::OverwriteSave => {
                let slot = request.target_slot.ok_or(FlowError::MissingSlot)?;
                self.slots.get(slot)?;
                PendingAction::SaveGame {
                    slot,
                    overwrite: request.kind == ConfirmationKind::OverwriteSave,
                }
            }
            ConfirmationKind::Exit => {
                tracing::info!("Exit confirmed");
                self.request_transition(Screen::Main);
                return Ok(AnswerOutcome::Exited);
            }
        };

        let kind = self.workflow.start(action, now)?.kind();
        Ok(AnswerOutcome::Started(kind))
    }

    /// Closes the confirmation dialog without confirming
    pub fn dismiss(&mut self) -> Result<(), FlowError> {
        self.answer(false).map(|_| ())
    }

    pub fn update(&mut self) -> Result<Option<Completion>, FlowError> {
        self.update_at(Instant::now())
    }

    /// Completes the running task once its loading period has elapsed
    ///
    /// Saves are persisted before they are committed to the in-memory
    /// store. If persisting fails, the store and screen stay as they were
    /// and the workflow is back to Idle.
    pub fn update_at(&mut self, now: Instant) -> Result<Option<Completion>, FlowError> {
        let Some(task) = self.workflow.poll(now) else {
            return Ok(None);
        };
        let kind = task.kind();

        let saved_slot = match task.action {
            PendingAction::NewGame => {
                self.progress = NarrativeProgress::default();
                None
            }
            PendingAction::LoadGame { slot, restored } => {
                tracing::info!("Restored save slot {}", slot);
                self.progress = *restored;
                None
            }
            PendingAction::SaveGame { slot, overwrite } => {
                let prepared = self.slots.prepare_save(slot, &self.progress, Local::now())?;
                if let Err(e) = self.storage.persist_slot(&prepared) {
                    tracing::error!("Failed to save slot {}: {}", slot, e);
                    return Err(e.into());
                }
                self.slots.replace(prepared.clone())?;
                if overwrite {
                    tracing::info!("Overwrote save slot {}", slot);
                } else {
                    tracing::info!("Saved to slot {}", slot);
                }
                Some(prepared)
            }
        };

        let screen = self.request_transition(Screen::Narrative);
        tracing::info!("Loading finished: {:?}", kind);

        Ok(Some(Completion {
            kind,
            screen,
            saved_slot,
        }))
    }

    /// Hard reset of the workflow; a running task is dropped uncommitted
    pub fn abandon(&mut self) {
        self.workflow.abandon();
    }

    // ======================================================================
    // Endings
    // ======================================================================

    /// The narrative engine reached an ending
    pub fn on_ending_reached(&mut self, kind: EndingKind, stats: EndingStats) -> Screen {
        tracing::info!(
            "Ending reached: {:?} after {} choices in {}",
            kind,
            stats.choices_made,
            stats.completion_time()
        );
        self.last_ending = Some(EndingReport { kind, stats });
        self.request_transition(Screen::GameEnd)
    }

    pub fn last_ending(&self) -> Option<&EndingReport> {
        self.last_ending.as_ref()
    }

    pub fn continue_to_credits(&mut self) -> Screen {
        self.request_transition(Screen::Credits)
    }

    pub fn return_to_main(&mut self) -> Screen {
        self.request_transition(Screen::Main)
    }

    /// Starts over from the fresh-start record, skipping the menus
    pub fn restart(&mut self) -> Screen {
        self.progress = NarrativeProgress::default();
        self.request_transition(Screen::Narrative)
    }
}
