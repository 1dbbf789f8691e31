//! Save/Load system for novel-flow
//!
//! This module provides the save slot side of the flow controller:
//! - A fixed set of addressable save slots (1-6 by default)
//! - Full narrative snapshots per slot, so loading resumes exactly
//! - A storage trait with JSON file and in-memory backends
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `store`: SaveSlotStore, the in-memory slot collection
//! - `storage`: SlotStorage trait and MemoryStorage
//! - `manager`: SaveManager, the JSON file backend
//!
//! # Example Usage
//!
//! ```ignore
//! let mut manager = SaveManager::new("~/.novel-flow/saves")?;
//! let mut store = SaveSlotStore::from_slots(6, manager.load_slots(&[1, 2, 3, 4, 5, 6])?);
//!
//! let slot = store.prepare_save(3, &progress, chrono::Local::now())?;
//! manager.persist_slot(&slot)?;
//! store.replace(slot)?;
//!
//! let restored = store.load_slot(3)?;
//! ```

pub mod manager;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use manager::SaveManager;
pub use storage::{MemoryStorage, SlotStorage};
pub use store::SaveSlotStore;
pub use types::*;
