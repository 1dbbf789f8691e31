//! Loading Tasks
//!
//! The busy period between confirming an action and committing it. The task
//! carries the mutation it will apply, so dropping the task drops the
//! mutation with it.

use crate::narrative::NarrativeProgress;
use crate::save::SlotId;
use std::time::{Duration, Instant};

/// What the loading screen is busy with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingKind {
    NewGame,
    LoadGame,
    SaveGame,
}

impl LoadingKind {
    pub fn title(&self) -> &str {
        match self {
            Self::NewGame => "Starting New Game...",
            Self::LoadGame => "Loading Game...",
            Self::SaveGame => "Saving Game...",
        }
    }

    pub fn subtitle(&self) -> &str {
        match self {
            Self::NewGame => "Preparing your descent into madness...",
            Self::LoadGame => "Restoring your nightmares...",
            Self::SaveGame => "Preserving your progress...",
        }
    }
}

/// Simulated duration of each loading kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingDurations {
    pub new_game: Duration,
    pub load_game: Duration,
    pub save_game: Duration,
}

impl LoadingDurations {
    pub fn for_kind(&self, kind: LoadingKind) -> Duration {
        match kind {
            LoadingKind::NewGame => self.new_game,
            LoadingKind::LoadGame => self.load_game,
            LoadingKind::SaveGame => self.save_game,
        }
    }
}

impl Default for LoadingDurations {
    fn default() -> Self {
        LoadingDurations {
            new_game: Duration::from_millis(3000),
            load_game: Duration::from_millis(2500),
            save_game: Duration::from_millis(2000),
        }
    }
}

/// Mutation applied when a loading task completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Reset narrative progress to the fresh-start record
    NewGame,
    /// Progress already restored from `slot`, applied on completion
    LoadGame {
        slot: SlotId,
        restored: Box<NarrativeProgress>,
    },
    /// Write current progress into `slot`
    SaveGame { slot: SlotId, overwrite: bool },
}

impl PendingAction {
    pub fn kind(&self) -> LoadingKind {
        match self {
            Self::NewGame => LoadingKind::NewGame,
            Self::LoadGame { .. } => LoadingKind::LoadGame,
            Self::SaveGame { .. } => LoadingKind::SaveGame,
        }
    }
}

/// The single running loading task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingTask {
    pub action: PendingAction,
    pub started_at: Instant,
    pub duration: Duration,
}

impl LoadingTask {
    pub fn new(action: PendingAction, started_at: Instant, duration: Duration) -> Self {
        LoadingTask {
            action,
            started_at,
            duration,
        }
    }

    pub fn kind(&self) -> LoadingKind {
        self.action.kind()
    }

    /// Check if the simulated duration has elapsed
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }

    /// Time left before completion
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }

    /// Completion fraction in `0.0..=1.0`, for the progress bar
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).min(1.0)
    }
}
