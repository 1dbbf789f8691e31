// Screen navigation - which top-level view is visible

use serde::{Deserialize, Serialize};

/// Top-level view of the player experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Main,
    GameMenu,
    Gallery,
    Settings,
    Narrative,
    LoadSlots,
    SaveSlots,
    Pause,
    Credits,
    GameEnd,
}

impl Screen {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Main,
            Self::GameMenu,
            Self::Gallery,
            Self::Settings,
            Self::Narrative,
            Self::LoadSlots,
            Self::SaveSlots,
            Self::Pause,
            Self::Credits,
            Self::GameEnd,
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Main => "main",
            Self::GameMenu => "game",
            Self::Gallery => "gallery",
            Self::Settings => "settings",
            Self::Narrative => "narrative",
            Self::LoadSlots => "loadSlots",
            Self::SaveSlots => "saveSlots",
            Self::Pause => "pause",
            Self::Credits => "credits",
            Self::GameEnd => "gameEnd",
        }
    }

    /// Parses the identifier produced by [`Screen::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|screen| screen.name() == name)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Main
    }
}

/// A completed screen change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
}

impl Transition {
    pub fn enters(&self, screen: Screen) -> bool {
        self.to == screen
    }
}

/// Owner of the single current-screen value
///
/// Every screen may move to every other screen; which transitions are
/// offered is up to the menus. Transitions never fail.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
    previous: Option<Screen>,
}

impl Navigator {
    /// Starts on the main menu
    pub fn new() -> Self {
        Navigator {
            current: Screen::default(),
            previous: None,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Screen shown before the last transition, if any
    pub fn previous(&self) -> Option<Screen> {
        self.previous
    }

    /// Switches to `target` and returns the new current screen
    pub fn request_transition(&mut self, target: Screen) -> Transition {
        let transition = Transition {
            from: self.current,
            to: target,
        };
        self.previous = Some(self.current);
        self.current = target;
        tracing::debug!("Screen {} -> {}", transition.from.name(), transition.to.name());
        transition
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
