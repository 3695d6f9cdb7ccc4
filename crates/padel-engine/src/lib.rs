//! Padel Engine -- the scorer driving a live padel match.
//!
//! This crate ties the rules in [`padel_model`] to the persistence in
//! [`padel_history`]: a [`ScoreManager`](scorer::ScoreManager) owns the live
//! match, a bounded undo stack of snapshots, the persisted settings and the
//! match history. Every mutation returns the [`ScoreEvent`](event::ScoreEvent)s
//! it produced and forwards them to subscribers.
//!
//! # Quick Start
//!
//! ```
//! use padel_engine::prelude::*;
//!
//! let mut scorer = ScoreManager::with_store(MemoryStore::new());
//!
//! for _ in 0..4 {
//!     scorer.increment_point(Team::One);
//! }
//! assert_eq!(scorer.current_set().games(Team::One), 1);
//!
//! scorer.undo();
//! assert_eq!(scorer.current_game().points(Team::One), Point::Forty);
//!
//! scorer.stop_match();
//! assert_eq!(scorer.history().len(), 1);
//! ```

#![deny(unsafe_code)]

pub mod event;
pub mod scorer;
pub mod tap;
pub mod undo;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the model crate for convenience.
pub use padel_model;

/// Re-export the history crate for convenience.
pub use padel_history;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common scorer usage.
pub mod prelude {
    pub use padel_model::prelude::*;

    pub use padel_history::{FileStore, KeyValueStore, MatchHistory, MemoryStore, StoreError};

    pub use crate::event::{Listener, ScoreEvent};
    pub use crate::scorer::{EngineConfig, ScoreManager};
    pub use crate::tap::{TapAction, TapConfig, TapDebouncer};
    pub use crate::undo::{UndoStack, DEFAULT_UNDO_CAPACITY};
}
