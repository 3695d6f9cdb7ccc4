//! Events emitted by the scorer.
//!
//! Every mutating [`ScoreManager`](crate::scorer::ScoreManager) call returns
//! the events it produced and also delivers them to subscribed listeners.
//! Presentation layers use them to refresh views and trigger feedback such
//! as haptics; the core attaches no behavior to them.

use padel_model::match_state::{MatchResult, ScoreChange};
use padel_model::settings::ScoringMode;
use uuid::Uuid;

/// Something that changed in the scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreEvent {
    /// A scoring transition in the live match.
    Scored(ScoreChange),
    /// The live match was stopped by the caller.
    MatchStopped { result: MatchResult },
    /// The last action was undone. `reopened` is set when the undo reversed
    /// the end of the match.
    Undone { reopened: bool },
    /// A match was written to the history log.
    MatchArchived { match_id: Uuid, completed: bool },
    /// An archived match was taken back out of the history by an undo.
    ArchiveRetracted { match_id: Uuid },
    /// A fresh match replaced the live one.
    NewMatchStarted { match_id: Uuid },
    /// The live match was discarded and replaced.
    MatchReset { match_id: Uuid },
    /// A history entry was deleted.
    HistoryEntryDeleted { index: usize },
    /// The history log was emptied.
    HistoryCleared,
    /// The deuce rule changed.
    ScoringModeChanged { mode: ScoringMode },
}

impl ScoreEvent {
    /// `true` for events that end the live match, whether by play or by an
    /// explicit stop.
    pub fn finishes_match(&self) -> bool {
        matches!(
            self,
            ScoreEvent::Scored(ScoreChange::MatchFinished { .. }) | ScoreEvent::MatchStopped { .. }
        )
    }

    /// `true` for events that award a point, game or set.
    pub fn is_score(&self) -> bool {
        matches!(
            self,
            ScoreEvent::Scored(
                ScoreChange::PointWon { .. }
                    | ScoreChange::TiebreakPointWon { .. }
                    | ScoreChange::GameWon { .. }
                    | ScoreChange::SetWon { .. }
            )
        )
    }
}

/// A subscriber callback.
pub type Listener = Box<dyn FnMut(&ScoreEvent)>;
