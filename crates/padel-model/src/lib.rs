//! Padel Model -- the scoring state machine for a padel match.
//!
//! This crate holds the pure rules of padel scoring with no I/O: points
//! within a game, games within a set, the 6-6 tiebreak, four-player serve
//! rotation, and the match that ties them together. All types are plain
//! values; cloning a [`Match`](match_state::Match) gives an independent
//! snapshot.
//!
//! # Quick Start
//!
//! ```
//! use padel_model::prelude::*;
//!
//! let mut m = Match::default();
//! for _ in 0..4 {
//!     m.increment_point(Team::One, ScoringMode::GoldenPoint, MatchFormat::OPEN);
//! }
//!
//! assert_eq!(m.current_set().games(Team::One), 1);
//! assert_eq!(m.serving_player(), Player::C);
//! ```
//!
//! # Modules
//!
//! - [`team`]: teams, players and game/set outcomes.
//! - [`game`]: the point ladder and deuce rules.
//! - [`set`]: games into sets, and the tiebreak.
//! - [`serve`]: regular and tiebreak serve rotation.
//! - [`match_state`]: the match and its completion cascade.
//! - [`settings`]: scoring mode and match format.

#![deny(unsafe_code)]

pub mod game;
pub mod match_state;
pub mod serve;
pub mod set;
pub mod settings;
pub mod team;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::game::{Game, Point};
    pub use crate::match_state::{Match, MatchParts, MatchResult, MatchStatus, ScoreChange};
    pub use crate::serve::{opening_server, opening_team, TiebreakServe};
    pub use crate::set::{Set, Tiebreak, TiebreakScore};
    pub use crate::settings::{GameSettings, MatchFormat, ScoringMode};
    pub use crate::team::{Outcome, Player, Team};
}
