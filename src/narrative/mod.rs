// Narrative module - the shape of story progress the flow controller moves around
//
// This module contains:
// - progress.rs: NarrativeProgress and Choice (saved and restored by slots)
// - ending.rs: ending classification and playthrough stats
//
// Dialogue playback and branch resolution live in the narrative engine,
// which only ever sees a NarrativeSession.

pub mod ending;
pub mod progress;

pub use ending::{EndingKind, EndingReport, EndingStats};
pub use progress::{Choice, NarrativeProgress};

/// Snapshot handed to the narrative engine when the Narrative screen opens
///
/// A new session is cut from the controller's progress record on every
/// entry, so the engine never resumes from a cursor left over by an earlier
/// visit. `epoch` increases with each entry; the engine compares it to the
/// one it last saw to know it must re-sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeSession {
    pub epoch: u64,
    pub progress: NarrativeProgress,
}
