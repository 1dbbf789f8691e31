//! Flow controller for an interactive visual-novel player
//!
//! Decides which screen is visible, sequences the confirm -> load -> commit
//! workflow for new game/load/save, and owns the player's save slots,
//! gallery unlocks and narrative progress record.
//!
//! # Architecture
//!
//! - `screen`: Screen enum and the any-to-any Navigator
//! - `workflow`: Idle / AwaitingConfirmation / Running state machine
//! - `save`: save slot store and storage backends
//! - `gallery`: unlockable images
//! - `narrative`: progress record, sessions and endings
//! - `controller`: FlowController, which ties it all together
//! - `config`: FlowConfig

pub mod config;
pub mod controller;
pub mod error;
pub mod gallery;
pub mod narrative;
pub mod save;
pub mod screen;
pub mod workflow;

pub use config::FlowConfig;
pub use controller::{AnswerOutcome, Completion, FlowController};
pub use error::FlowError;
pub use screen::Screen;
