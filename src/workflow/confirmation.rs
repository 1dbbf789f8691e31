//! Confirmation Requests
//!
//! A yes/no gate placed in front of every sensitive, state-mutating action.

use crate::save::SlotId;

/// Kinds of action that need the player's confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationKind {
    NewGame,
    LoadGame,
    SaveGame,
    OverwriteSave,
    Exit,
}

impl ConfirmationKind {
    /// Whether this kind acts on a specific save slot
    pub fn is_slot_scoped(&self) -> bool {
        matches!(self, Self::LoadGame | Self::SaveGame | Self::OverwriteSave)
    }

    /// Question shown in the confirmation dialog
    pub fn prompt(&self) -> &str {
        match self {
            Self::NewGame => "Do you want to start a new game?",
            Self::LoadGame => "Do you want to load this saved game?",
            Self::SaveGame => "Do you want to save in this slot?",
            Self::OverwriteSave => "Do you want to overwrite this saved game?",
            Self::Exit => "Do you want to quit the game?",
        }
    }
}

/// The single outstanding confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub kind: ConfirmationKind,
    /// Present only for slot-scoped kinds
    pub target_slot: Option<SlotId>,
}

impl ConfirmationRequest {
    /// Builds a request, dropping the slot id for kinds that don't use one
    pub fn new(kind: ConfirmationKind, target_slot: Option<SlotId>) -> Self {
        ConfirmationRequest {
            kind,
            target_slot: if kind.is_slot_scoped() { target_slot } else { None },
        }
    }
}
