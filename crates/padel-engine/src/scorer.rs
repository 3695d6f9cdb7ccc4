//! The scorer: live match, undo, settings and history behind one API.
//!
//! [`ScoreManager`] is the only mutator of the live [`Match`]. Each call
//! that changes scoring state snapshots the match onto the [`UndoStack`]
//! first, then applies the change, persists whatever became durable, and
//! notifies subscribers.
//!
//! None of the caller-facing operations fail. Illegal requests (scoring a
//! finished match, undoing with nothing to undo, deleting a missing history
//! entry) are no-ops that return no events. Persistence failures are logged
//! and the in-memory state is kept as is.

use padel_history::{
    load_settings, save_settings, KeyValueStore, MatchHistory, StoreError, HISTORY_KEY,
};
use padel_model::game::Game;
use padel_model::match_state::{Match, ScoreChange, DEFAULT_TEAM1_NAME, DEFAULT_TEAM2_NAME};
use padel_model::set::Set;
use padel_model::settings::{GameSettings, MatchFormat, ScoringMode};
use padel_model::team::Team;

use crate::event::{Listener, ScoreEvent};
use crate::undo::{UndoStack, DEFAULT_UNDO_CAPACITY};

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`ScoreManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Snapshots kept for undo. Oldest are dropped beyond this.
    pub undo_capacity: usize,
    /// When a match completes on its own.
    pub format: MatchFormat,
    /// Name given to team one in every new match.
    pub team1_name: String,
    /// Name given to team two in every new match.
    pub team2_name: String,
}

impl Default for EngineConfig {
    /// 50 undo levels, open-ended play, default team names.
    fn default() -> Self {
        Self {
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            format: MatchFormat::OPEN,
            team1_name: DEFAULT_TEAM1_NAME.to_owned(),
            team2_name: DEFAULT_TEAM2_NAME.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScoreManager
// ---------------------------------------------------------------------------

/// Owns the live match and everything around it.
pub struct ScoreManager<S: KeyValueStore> {
    current: Match,
    settings: GameSettings,
    history: MatchHistory,
    undo: UndoStack,
    store: S,
    config: EngineConfig,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> std::fmt::Debug for ScoreManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreManager")
            .field("current", &self.current)
            .field("settings", &self.settings)
            .field("history_len", &self.history.len())
            .field("undo_len", &self.undo.len())
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> ScoreManager<S> {
    /// Create a scorer backed by `store`.
    ///
    /// Settings and history are loaded from the store; missing or corrupt
    /// data falls back to defaults. The live match always starts fresh.
    pub fn new(store: S, config: EngineConfig) -> Self {
        let settings = load_settings(&store);
        let history = MatchHistory::load(&store);
        let current = Match::new(config.team1_name.clone(), config.team2_name.clone());
        tracing::info!(
            mode = settings.scoring_mode.display_name(),
            history = history.len(),
            "scorer ready"
        );
        Self {
            current,
            settings,
            history,
            undo: UndoStack::with_capacity(config.undo_capacity),
            store,
            config,
            listeners: Vec::new(),
        }
    }

    /// Create a scorer with [`EngineConfig::default`].
    pub fn with_store(store: S) -> Self {
        Self::new(store, EngineConfig::default())
    }

    // -- queries ------------------------------------------------------------

    pub fn current_match(&self) -> &Match {
        &self.current
    }

    pub fn current_set(&self) -> &Set {
        self.current.current_set()
    }

    pub fn current_game(&self) -> &Game {
        self.current.current_game()
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn scoring_mode(&self) -> ScoringMode {
        self.settings.scoring_mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// `true` if at least one snapshot is available.
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// Number of snapshots available.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Register a callback invoked with every event, in order.
    pub fn subscribe(&mut self, listener: impl FnMut(&ScoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // -- scoring ------------------------------------------------------------

    /// Award a point to `team`.
    ///
    /// Finishing the match through play archives it immediately.
    pub fn increment_point(&mut self, team: Team) -> Vec<ScoreEvent> {
        if self.current.is_completed() {
            tracing::debug!(%team, "point ignored -- match already finished");
            return Vec::new();
        }

        let snapshot = self.current.clone();
        let changes = self
            .current
            .increment_point(team, self.settings.scoring_mode, self.config.format);
        if changes.is_empty() {
            return Vec::new();
        }
        self.undo.push(snapshot);

        let finished = changes
            .iter()
            .any(|change| matches!(change, ScoreChange::MatchFinished { .. }));
        let mut events: Vec<ScoreEvent> = changes.into_iter().map(ScoreEvent::Scored).collect();
        if finished {
            events.push(self.archive_current());
        }
        self.emit(events)
    }

    /// Restore the state before the most recent undoable action.
    ///
    /// If that action finished the match, the archived copy is taken back
    /// out of the history.
    pub fn undo(&mut self) -> Vec<ScoreEvent> {
        let Some(snapshot) = self.undo.pop() else {
            tracing::debug!("nothing to undo");
            return Vec::new();
        };

        let reopened = self.current.is_completed() && !snapshot.is_completed();
        let mut events = Vec::new();
        if reopened {
            if let Some(retracted) = self.history.remove_latest_if(self.current.id()) {
                self.persist_history();
                events.push(ScoreEvent::ArchiveRetracted {
                    match_id: retracted.id(),
                });
            }
        }

        self.current = snapshot;
        tracing::debug!(reopened, remaining = self.undo.len(), "undo");
        events.push(ScoreEvent::Undone { reopened });
        self.emit(events)
    }

    /// Pass serve to the next player in rotation. Undoable.
    pub fn change_server(&mut self) -> Vec<ScoreEvent> {
        let snapshot = self.current.clone();
        let Some(change) = self.current.rotate_server() else {
            return Vec::new();
        };
        self.undo.push(snapshot);
        self.emit(vec![ScoreEvent::Scored(change)])
    }

    /// End the live match now and archive it. Undoable.
    pub fn stop_match(&mut self) -> Vec<ScoreEvent> {
        let snapshot = self.current.clone();
        let Some(result) = self.current.stop() else {
            return Vec::new();
        };
        self.undo.push(snapshot);
        tracing::info!(score = %self.current.final_score(), "match stopped");
        let archived = self.archive_current();
        self.emit(vec![ScoreEvent::MatchStopped { result }, archived])
    }

    // -- lifecycle ----------------------------------------------------------

    /// Replace the live match with a fresh one.
    ///
    /// A match with any progress is archived first, unless it is already
    /// the newest history entry. Unfinished matches are archived with their
    /// end date stamped. Clears undo.
    pub fn start_new_match(&mut self) -> Vec<ScoreEvent> {
        let mut events = Vec::new();
        let already_archived = self
            .history
            .latest()
            .is_some_and(|latest| latest.id() == self.current.id());
        if self.current.has_progress() && !already_archived {
            let mut abandoned = self.current.clone();
            abandoned.mark_abandoned();
            events.push(self.archive(abandoned));
        }

        self.replace_current();
        events.push(ScoreEvent::NewMatchStarted {
            match_id: self.current.id(),
        });
        self.emit(events)
    }

    /// Discard the live match without archiving it. Clears undo.
    pub fn reset_current_match(&mut self) -> Vec<ScoreEvent> {
        self.replace_current();
        tracing::info!("live match reset");
        self.emit(vec![ScoreEvent::MatchReset {
            match_id: self.current.id(),
        }])
    }

    // -- history ------------------------------------------------------------

    /// Remove the history entry at `index` (0 is newest). Out-of-range
    /// indexes are ignored.
    pub fn delete_match(&mut self, index: usize) -> Vec<ScoreEvent> {
        if self.history.delete(index).is_none() {
            tracing::debug!(index, "no history entry to delete");
            return Vec::new();
        }
        self.persist_history();
        self.emit(vec![ScoreEvent::HistoryEntryDeleted { index }])
    }

    /// Remove every history entry and the stored blob.
    pub fn clear_history(&mut self) -> Vec<ScoreEvent> {
        self.history.clear();
        if let Err(error) = self.store.remove(HISTORY_KEY) {
            log_store_failure(&error, "failed to clear match history");
        }
        tracing::info!("match history cleared");
        self.emit(vec![ScoreEvent::HistoryCleared])
    }

    // -- settings -----------------------------------------------------------

    /// Change the deuce rule. Applies from the next point and is persisted.
    pub fn set_scoring_mode(&mut self, mode: ScoringMode) -> Vec<ScoreEvent> {
        if self.settings.scoring_mode == mode {
            return Vec::new();
        }
        self.settings.scoring_mode = mode;
        if let Err(error) = save_settings(&mut self.store, &self.settings) {
            log_store_failure(&error, "failed to save settings");
        }
        tracing::info!(mode = mode.display_name(), "scoring mode changed");
        self.emit(vec![ScoreEvent::ScoringModeChanged { mode }])
    }

    // -- internals ----------------------------------------------------------

    fn replace_current(&mut self) {
        self.current = Match::new(self.config.team1_name.clone(), self.config.team2_name.clone());
        self.undo.clear();
    }

    fn archive_current(&mut self) -> ScoreEvent {
        let finished = self.current.clone();
        self.archive(finished)
    }

    fn archive(&mut self, m: Match) -> ScoreEvent {
        let event = ScoreEvent::MatchArchived {
            match_id: m.id(),
            completed: m.is_completed(),
        };
        self.history.archive(m);
        self.persist_history();
        event
    }

    fn persist_history(&mut self) {
        if let Err(error) = self.history.save(&mut self.store) {
            log_store_failure(&error, "failed to save match history");
        }
    }

    fn emit(&mut self, events: Vec<ScoreEvent>) -> Vec<ScoreEvent> {
        for event in &events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
        events
    }
}

fn log_store_failure(error: &StoreError, context: &str) {
    tracing::warn!(%error, context, "persistence failed -- keeping in-memory state");
}
