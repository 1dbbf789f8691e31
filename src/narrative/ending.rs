use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ending classification reported by the narrative engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndingKind {
    Good,
    Neutral,
    Bad,
}

impl EndingKind {
    pub fn title(&self) -> &str {
        match self {
            Self::Good => "You Woke Up",
            Self::Neutral => "The Dream Continues",
            Self::Bad => "Lost in the Dark",
        }
    }
}

/// Playthrough statistics shown on the ending screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingStats {
    pub choices_made: u32,
    pub playtime: Duration,
}

impl EndingStats {
    pub fn new(choices_made: u32, playtime: Duration) -> Self {
        EndingStats {
            choices_made,
            playtime,
        }
    }

    /// Playtime formatted as `mm:ss` (minutes are not wrapped into hours)
    pub fn completion_time(&self) -> String {
        let total = self.playtime.as_secs();
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

/// The last ending the player reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndingReport {
    pub kind: EndingKind,
    pub stats: EndingStats,
}
