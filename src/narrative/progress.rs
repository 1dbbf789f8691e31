use serde::{Deserialize, Serialize};

/// Background shown when a fresh playthrough starts
pub const DEFAULT_BACKGROUND: &str = "/placeholder.svg?height=800&width=1400";

/// Character sprite shown when a fresh playthrough starts
pub const DEFAULT_CHARACTER: &str = "/placeholder.svg?height=600&width=400";

/// A choice offered to the player by the narrative engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    /// Scene the narrative engine jumps to when this choice is picked
    pub next_scene: String,
}

impl Choice {
    pub fn new(id: &str, text: &str, next_scene: &str) -> Self {
        Choice {
            id: id.to_string(),
            text: text.to_string(),
            next_scene: next_scene.to_string(),
        }
    }
}

/// Minimal resumable position within the story
///
/// Owned by the narrative collaborator at runtime. This crate only cares
/// about its shape so it can be reset, saved and restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeProgress {
    pub chapter_id: String,
    pub scene_id: String,
    pub dialogue_index: usize,
    pub character_name: String,
    pub dialogue_text: String,
    pub background_ref: String,
    pub character_ref: String,
    pending_choices: Vec<Choice>,
    /// Only ever true while `pending_choices` is non-empty
    choices_visible: bool,
}

impl NarrativeProgress {
    /// Creates a progress record at the given position with no dialogue loaded
    pub fn at(chapter_id: &str, scene_id: &str, dialogue_index: usize) -> Self {
        NarrativeProgress {
            chapter_id: chapter_id.to_string(),
            scene_id: scene_id.to_string(),
            dialogue_index,
            ..Self::default()
        }
    }

    pub fn pending_choices(&self) -> &[Choice] {
        &self.pending_choices
    }

    pub fn choices_visible(&self) -> bool {
        self.choices_visible
    }

    /// Shows the given choices to the player
    ///
    /// An empty list hides the choice panel instead.
    pub fn show_choices(&mut self, choices: Vec<Choice>) {
        self.choices_visible = !choices.is_empty();
        self.pending_choices = choices;
    }

    /// Hides the choice panel and drops pending choices
    pub fn clear_choices(&mut self) {
        self.choices_visible = false;
        self.pending_choices.clear();
    }

    /// Restores the visible-implies-non-empty invariant
    ///
    /// Records coming back from the narrative collaborator or from disk are
    /// passed through here before the controller stores them.
    pub fn normalized(mut self) -> Self {
        if self.pending_choices.is_empty() {
            self.choices_visible = false;
        }
        self
    }

    /// Short label used for save slot summaries
    pub fn scene_label(&self) -> String {
        format!("{} / {}", self.chapter_id, self.scene_id)
    }
}

impl Default for NarrativeProgress {
    /// The "fresh start" record used by New Game and Restart
    fn default() -> Self {
        NarrativeProgress {
            chapter_id: "chapter1".to_string(),
            scene_id: "scene1_1".to_string(),
            dialogue_index: 0,
            character_name: String::new(),
            dialogue_text: String::new(),
            background_ref: DEFAULT_BACKGROUND.to_string(),
            character_ref: DEFAULT_CHARACTER.to_string(),
            pending_choices: Vec::new(),
            choices_visible: false,
        }
    }
}
