use crate::gallery::ImageId;
use crate::save::{SaveError, SlotId};

/// Errors returned by flow-controller operations
///
/// All of these are recoverable by the caller: the UI layer is expected to
/// ignore the intent or show a message. None of them leaves in-memory state
/// half-modified.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Slot id is outside the fixed slot set
    #[error("Unknown save slot: {0}")]
    UnknownSlot(SlotId),

    /// Tried to load a slot that holds no save
    #[error("Save slot {0} is empty")]
    EmptySlot(SlotId),

    /// Image id is not part of the gallery catalog
    #[error("Unknown gallery image: {0}")]
    UnknownImage(ImageId),

    /// Image exists but has not been unlocked yet
    #[error("Gallery image {0} is locked")]
    Locked(ImageId),

    /// A confirmation or loading task is already outstanding
    #[error("Another confirmation or loading task is already in progress")]
    WorkflowBusy,

    /// Load/save confirmation requested without a target slot
    #[error("This action needs a target save slot")]
    MissingSlot,

    /// `answer` was called while nothing was awaiting confirmation
    #[error("No confirmation is awaiting an answer")]
    NoPendingConfirmation,

    /// The storage collaborator failed; nothing was committed
    #[error("Storage error: {0}")]
    Storage(#[from] SaveError),
}
