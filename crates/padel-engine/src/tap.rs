//! Delayed commit of score taps with double-tap undo.
//!
//! A tap on a team's score area does not score immediately. It is held for
//! [`TapConfig::commit_delay`] and committed by [`TapDebouncer::poll`] once
//! due. A second tap on the same team within
//! [`TapConfig::double_tap_window`], while the first is still pending,
//! cancels the pending commit and asks for an undo instead. Once a tap has
//! been committed it can no longer pair into a double tap, so a single
//! gesture never produces both.
//!
//! The debouncer owns no clock. Callers pass the time of each tap and poll,
//! which keeps it deterministic under test.

use std::time::{Duration, Instant};

use padel_history::KeyValueStore;
use padel_model::team::Team;

use crate::event::ScoreEvent;
use crate::scorer::ScoreManager;

/// Timing for [`TapDebouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapConfig {
    /// How long a tap waits before it scores.
    pub commit_delay: Duration,
    /// A second same-team tap inside this window is a double tap.
    pub double_tap_window: Duration,
}

impl Default for TapConfig {
    /// 350 ms commit delay, 400 ms double-tap window.
    fn default() -> Self {
        Self {
            commit_delay: Duration::from_millis(350),
            double_tap_window: Duration::from_millis(400),
        }
    }
}

/// What the caller should do on the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    Increment(Team),
    Undo,
}

impl TapAction {
    /// Run the action against `scorer`.
    pub fn apply<S: KeyValueStore>(self, scorer: &mut ScoreManager<S>) -> Vec<ScoreEvent> {
        match self {
            TapAction::Increment(team) => scorer.increment_point(team),
            TapAction::Undo => scorer.undo(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTap {
    team: Team,
    tapped_at: Instant,
    due: Instant,
}

/// Turns raw taps into scorer actions.
#[derive(Debug, Clone, Default)]
pub struct TapDebouncer {
    config: TapConfig,
    pending: Option<PendingTap>,
}

impl TapDebouncer {
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    pub fn config(&self) -> TapConfig {
        self.config
    }

    /// The team whose tap is waiting to be committed.
    pub fn pending_team(&self) -> Option<Team> {
        self.pending.map(|p| p.team)
    }

    /// Register a tap on `team` at `now`.
    ///
    /// Returns [`TapAction::Undo`] for a double tap: a same-team tap inside
    /// the window while the first is still pending. A tap on the other team
    /// while one is pending commits the pending one at once and returns it.
    pub fn tap(&mut self, team: Team, now: Instant) -> Option<TapAction> {
        let pending = self.pending.take();

        if let Some(p) = pending {
            if p.team == team
                && now.saturating_duration_since(p.tapped_at) < self.config.double_tap_window
            {
                tracing::debug!(%team, "double tap -- undo");
                return Some(TapAction::Undo);
            }
        }

        self.pending = Some(PendingTap {
            team,
            tapped_at: now,
            due: now + self.config.commit_delay,
        });
        pending.map(|p| TapAction::Increment(p.team))
    }

    /// Commit the pending tap if its delay has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TapAction> {
        match self.pending {
            Some(p) if now >= p.due => {
                self.pending = None;
                Some(TapAction::Increment(p.team))
            }
            _ => None,
        }
    }

    /// Drop the pending tap without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padel_history::MemoryStore;
    use padel_model::game::Point;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn single_tap_commits_after_delay() {
        let t0 = Instant::now();
        let mut tap = TapDebouncer::default();
        assert_eq!(tap.tap(Team::One, t0), None);
        assert_eq!(tap.pending_team(), Some(Team::One));
        assert_eq!(tap.poll(t0 + ms(100)), None);
        assert_eq!(tap.poll(t0 + ms(350)), Some(TapAction::Increment(Team::One)));
        assert_eq!(tap.poll(t0 + ms(900)), None);
    }

    #[test]
    fn double_tap_undoes_instead_of_scoring() {
        let t0 = Instant::now();
        let mut tap = TapDebouncer::default();
        tap.tap(Team::Two, t0);
        assert_eq!(tap.tap(Team::Two, t0 + ms(200)), Some(TapAction::Undo));
        assert_eq!(tap.pending_team(), None);
        assert_eq!(tap.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn slow_second_tap_is_a_new_tap() {
        let t0 = Instant::now();
        let mut tap = TapDebouncer::default();
        tap.tap(Team::One, t0);
        assert_eq!(tap.poll(t0 + ms(360)), Some(TapAction::Increment(Team::One)));
        assert_eq!(tap.tap(Team::One, t0 + ms(500)), None);
        assert_eq!(tap.poll(t0 + ms(850)), Some(TapAction::Increment(Team::One)));
    }

    #[test]
    fn other_team_tap_flushes_pending() {
        let t0 = Instant::now();
        let mut tap = TapDebouncer::default();
        tap.tap(Team::One, t0);
        assert_eq!(
            tap.tap(Team::Two, t0 + ms(100)),
            Some(TapAction::Increment(Team::One))
        );
        assert_eq!(tap.poll(t0 + ms(450)), Some(TapAction::Increment(Team::Two)));
    }

    #[test]
    fn triple_tap_is_undo_then_new_tap() {
        let t0 = Instant::now();
        let mut tap = TapDebouncer::default();
        tap.tap(Team::One, t0);
        assert_eq!(tap.tap(Team::One, t0 + ms(100)), Some(TapAction::Undo));
        assert_eq!(tap.tap(Team::One, t0 + ms(200)), None);
        assert_eq!(tap.pending_team(), Some(Team::One));
    }

    #[test]
    fn cancel_drops_pending() {
        let t0 = Instant::now();
        let mut tap = TapDebouncer::new(TapConfig {
            commit_delay: ms(10),
            double_tap_window: ms(50),
        });
        tap.tap(Team::One, t0);
        tap.cancel();
        assert_eq!(tap.poll(t0 + ms(20)), None);
        assert_eq!(tap.tap(Team::One, t0 + ms(30)), None);
    }

    #[test]
    fn committed_tap_never_pairs_into_undo() {
        let t0 = Instant::now();
        let mut tap = TapDebouncer::default();
        tap.tap(Team::One, t0);
        assert_eq!(tap.poll(t0 + ms(350)), Some(TapAction::Increment(Team::One)));

        // Still inside the double-tap window, but the first tap has scored.
        assert_eq!(tap.tap(Team::One, t0 + ms(380)), None);
        assert_eq!(tap.pending_team(), Some(Team::One));
    }

    #[test]
    fn double_tap_undoes_the_earlier_action() {
        let mut scorer = ScoreManager::with_store(MemoryStore::new());
        scorer.increment_point(Team::Two);

        let t0 = Instant::now();
        let mut tap = TapDebouncer::default();
        let mut actions = Vec::new();
        actions.extend(tap.tap(Team::One, t0));
        let mut at = t0;
        while at < t0 + ms(200) {
            at += ms(10);
            actions.extend(tap.poll(at));
        }
        actions.extend(tap.tap(Team::One, t0 + ms(200)));
        actions.extend(tap.poll(t0 + ms(1000)));
        assert_eq!(actions, vec![TapAction::Undo]);

        for action in actions {
            action.apply(&mut scorer);
        }
        assert_eq!(scorer.current_game().points(Team::Two), Point::Love);
        assert_eq!(scorer.current_game().points(Team::One), Point::Love);
    }

    #[test]
    fn late_same_team_tap_scores_twice() {
        let mut scorer = ScoreManager::with_store(MemoryStore::new());
        let t0 = Instant::now();
        let mut tap = TapDebouncer::default();
        let mut actions = Vec::new();
        actions.extend(tap.tap(Team::One, t0));
        let mut at = t0;
        while at < t0 + ms(380) {
            at += ms(10);
            actions.extend(tap.poll(at));
        }
        actions.extend(tap.tap(Team::One, t0 + ms(380)));
        actions.extend(tap.poll(t0 + ms(1000)));
        assert_eq!(
            actions,
            vec![TapAction::Increment(Team::One), TapAction::Increment(Team::One)]
        );

        for action in actions {
            action.apply(&mut scorer);
        }
        assert_eq!(scorer.current_game().points(Team::One), Point::Thirty);
    }
}
