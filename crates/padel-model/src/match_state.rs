//! The match: sets, the game in play, serve, and completion.
//!
//! [`Match::increment_point`] is the single scoring entry point. A point is
//! routed to the tiebreak when the current set is in one, otherwise to the
//! current [`Game`]. Completion then cascades upward:
//!
//! 1. A finished game is credited to the set and serve rotates.
//! 2. A finished set is sealed, a new set is opened, and serve is reset by
//!    set parity.
//! 3. Under a [`MatchFormat`] with a set threshold, a team reaching it wins
//!    the match. The default format has no threshold; such a match only ends
//!    through [`Match::stop`].
//!
//! Every call returns the [`ScoreChange`]s it produced, in order, so callers
//! can react to transitions without diffing snapshots.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::game::Game;
use crate::serve::opening_server;
use crate::set::Set;
use crate::settings::{MatchFormat, ScoringMode};
use crate::team::{Player, Team};

/// Name given to team one when none is supplied.
pub const DEFAULT_TEAM1_NAME: &str = "Team 1";

/// Name given to team two when none is supplied.
pub const DEFAULT_TEAM2_NAME: &str = "Team 2";

// ---------------------------------------------------------------------------
// MatchStatus
// ---------------------------------------------------------------------------

/// Final result of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult {
    /// One team won more sets.
    Won(Team),
    /// Stopped with both teams on the same number of sets.
    Drawn,
}

impl MatchResult {
    pub fn winner(self) -> Option<Team> {
        match self {
            MatchResult::Won(team) => Some(team),
            MatchResult::Drawn => None,
        }
    }
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchStatus {
    #[default]
    InProgress,
    Finished(MatchResult),
}

// ---------------------------------------------------------------------------
// ScoreChange
// ---------------------------------------------------------------------------

/// A state transition produced by a scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange {
    /// A regular-game point was played.
    PointWon { team: Team },
    /// A game finished and was credited to the set.
    GameWon { team: Team, set_index: usize },
    /// The set reached 6-6.
    TiebreakStarted { set_index: usize },
    /// A tiebreak point was played.
    TiebreakPointWon { team: Team },
    /// The set at `set_index` was won.
    SetWon { team: Team, set_index: usize },
    /// Serve moved to `player`.
    ServerChanged { player: Player },
    /// The match finished.
    MatchFinished { result: MatchResult },
}

// ---------------------------------------------------------------------------
// MatchParts
// ---------------------------------------------------------------------------

/// Every stored field of a [`Match`], used to rebuild one from persisted data.
#[derive(Debug, Clone)]
pub struct MatchParts {
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub sets: Vec<Set>,
    pub current_set_index: usize,
    pub current_game: Game,
    pub status: MatchStatus,
    pub team1_name: String,
    pub team2_name: String,
    pub serving_player: Player,
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A padel match between two teams.
///
/// `sets` is never empty and `current_set_index` always points into it. Set
/// counts per team are derived from set winners and never stored. A match is
/// frozen once finished; only restoring an earlier snapshot can reopen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: Uuid,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    sets: Vec<Set>,
    current_set_index: usize,
    current_game: Game,
    status: MatchStatus,
    team1_name: String,
    team2_name: String,
    serving_player: Player,
}

impl Default for Match {
    fn default() -> Self {
        Self::new(DEFAULT_TEAM1_NAME, DEFAULT_TEAM2_NAME)
    }
}

impl Match {
    /// Start a new match now with the given team names.
    pub fn new(team1_name: impl Into<String>, team2_name: impl Into<String>) -> Self {
        Self::starting_at(Utc::now(), team1_name, team2_name)
    }

    /// Start a new match with an explicit start time.
    pub fn starting_at(
        start_date: DateTime<Utc>,
        team1_name: impl Into<String>,
        team2_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            end_date: None,
            sets: vec![Set::new()],
            current_set_index: 0,
            current_game: Game::new(),
            status: MatchStatus::InProgress,
            team1_name: team1_name.into(),
            team2_name: team2_name.into(),
            serving_player: opening_server(0),
        }
    }

    /// Rebuild a match from stored parts.
    ///
    /// Returns `None` if `sets` is empty or `current_set_index` is out of
    /// range.
    pub fn from_parts(parts: MatchParts) -> Option<Self> {
        if parts.current_set_index >= parts.sets.len() {
            return None;
        }
        Some(Self {
            id: parts.id,
            start_date: parts.start_date,
            end_date: parts.end_date,
            sets: parts.sets,
            current_set_index: parts.current_set_index,
            current_game: parts.current_game,
            status: parts.status,
            team1_name: parts.team1_name,
            team2_name: parts.team2_name,
            serving_player: parts.serving_player,
        })
    }

    // -- accessors ----------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// All sets so far, including the one in play.
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn current_set_index(&self) -> usize {
        self.current_set_index
    }

    pub fn current_set(&self) -> &Set {
        &self.sets[self.current_set_index]
    }

    pub fn current_game(&self) -> &Game {
        &self.current_game
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, MatchStatus::Finished(_))
    }

    /// The final result, once finished.
    pub fn result(&self) -> Option<MatchResult> {
        match self.status {
            MatchStatus::InProgress => None,
            MatchStatus::Finished(result) => Some(result),
        }
    }

    /// The winning team. `None` while in progress or when drawn.
    pub fn winner(&self) -> Option<Team> {
        self.result().and_then(MatchResult::winner)
    }

    pub fn team1_name(&self) -> &str {
        &self.team1_name
    }

    pub fn team2_name(&self) -> &str {
        &self.team2_name
    }

    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::One => &self.team1_name,
            Team::Two => &self.team2_name,
        }
    }

    /// Name of the winning team, if there is one.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(|team| self.team_name(team))
    }

    /// Sets won by `team`.
    pub fn sets_won(&self, team: Team) -> u32 {
        let won = self
            .sets
            .iter()
            .filter(|set| set.winner() == Some(team))
            .count();
        u32::try_from(won).unwrap_or(u32::MAX)
    }

    /// Regular-game server.
    pub fn serving_player(&self) -> Player {
        self.serving_player
    }

    /// Regular-game serving team.
    pub fn serving_team(&self) -> Team {
        self.serving_player.team()
    }

    /// Whoever serves the next point: the tiebreak server during a tiebreak,
    /// the regular server otherwise.
    pub fn current_serving_player(&self) -> Player {
        self.current_set()
            .tiebreak_serving_player()
            .unwrap_or(self.serving_player)
    }

    pub fn current_serving_team(&self) -> Team {
        self.current_serving_player().team()
    }

    /// `true` once any point, game or set has been recorded.
    pub fn has_progress(&self) -> bool {
        !self.current_game.is_fresh() || self.sets.iter().any(|set| !set.is_fresh())
    }

    /// Time from start to end, once an end date is set.
    pub fn duration(&self) -> Option<Duration> {
        self.end_date.map(|end| end - self.start_date)
    }

    /// Duration as `m:ss`, or `"In progress"` without an end date.
    pub fn formatted_duration(&self) -> String {
        match self.duration() {
            Some(duration) => {
                let total = duration.num_seconds().max(0);
                format!("{}:{:02}", total / 60, total % 60)
            }
            None => "In progress".to_owned(),
        }
    }

    /// Sets won per team as `"2 - 1"`, or `"In progress"` while unfinished.
    pub fn final_score(&self) -> String {
        if self.is_completed() {
            format!("{} - {}", self.sets_won(Team::One), self.sets_won(Team::Two))
        } else {
            "In progress".to_owned()
        }
    }

    // -- mutation -----------------------------------------------------------

    /// Award a point to `team`.
    ///
    /// Returns the transitions caused by the point, or an empty list if the
    /// match is already finished.
    pub fn increment_point(
        &mut self,
        team: Team,
        mode: ScoringMode,
        format: MatchFormat,
    ) -> Vec<ScoreChange> {
        let mut changes = Vec::new();
        if self.is_completed() {
            return changes;
        }

        let set_index = self.current_set_index;
        if self.current_set().is_tiebreak() {
            if !self.sets[set_index].increment_tiebreak_point(team) {
                return changes;
            }
            changes.push(ScoreChange::TiebreakPointWon { team });
            if let Some(winner) = self.current_set().winner() {
                self.complete_set(winner, format, &mut changes);
            }
            return changes;
        }

        if !self.current_game.increment_point(team, mode) {
            return changes;
        }
        changes.push(ScoreChange::PointWon { team });

        if let Some(game_winner) = self.current_game.winner() {
            self.complete_game(game_winner, format, &mut changes);
        }
        changes
    }

    /// Pass serve to the next player outside the normal rotation.
    ///
    /// During a tiebreak this moves the tiebreak server; otherwise the
    /// regular server. Returns `None` once the match is finished.
    pub fn rotate_server(&mut self) -> Option<ScoreChange> {
        if self.is_completed() {
            return None;
        }
        let set_index = self.current_set_index;
        let player = if self.sets[set_index].rotate_tiebreak_server() {
            self.current_set().tiebreak_serving_player()?
        } else {
            self.serving_player = self.serving_player.next_server();
            self.serving_player
        };
        Some(ScoreChange::ServerChanged { player })
    }

    /// End the match now.
    ///
    /// The team with more won sets wins; equal counts give
    /// [`MatchResult::Drawn`]. Returns `None` if already finished.
    pub fn stop(&mut self) -> Option<MatchResult> {
        if self.is_completed() {
            return None;
        }
        let team1 = self.sets_won(Team::One);
        let team2 = self.sets_won(Team::Two);
        let result = match team1.cmp(&team2) {
            std::cmp::Ordering::Greater => MatchResult::Won(Team::One),
            std::cmp::Ordering::Less => MatchResult::Won(Team::Two),
            std::cmp::Ordering::Equal => MatchResult::Drawn,
        };
        self.finish(result);
        Some(result)
    }

    /// Stamp the end date without finishing the match, for archiving an
    /// abandoned match.
    pub fn mark_abandoned(&mut self) {
        if self.end_date.is_none() {
            self.end_date = Some(Utc::now());
        }
    }

    fn complete_game(&mut self, winner: Team, format: MatchFormat, changes: &mut Vec<ScoreChange>) {
        let set_index = self.current_set_index;
        self.sets[set_index].add_game(winner);
        changes.push(ScoreChange::GameWon {
            team: winner,
            set_index,
        });
        if self.current_set().is_tiebreak() {
            changes.push(ScoreChange::TiebreakStarted { set_index });
        }

        self.serving_player = self.serving_player.next_server();
        changes.push(ScoreChange::ServerChanged {
            player: self.serving_player,
        });

        match self.current_set().winner() {
            Some(set_winner) => self.complete_set(set_winner, format, changes),
            None => self.current_game = Game::new(),
        }
    }

    fn complete_set(&mut self, winner: Team, format: MatchFormat, changes: &mut Vec<ScoreChange>) {
        let set_index = self.current_set_index;
        self.sets[set_index].complete(winner);
        changes.push(ScoreChange::SetWon {
            team: winner,
            set_index,
        });
        self.current_game = Game::new();

        if format.is_decided_by(self.sets_won(winner)) {
            let result = MatchResult::Won(winner);
            self.finish(result);
            changes.push(ScoreChange::MatchFinished { result });
            return;
        }

        self.sets.push(Set::new());
        self.current_set_index = self.sets.len() - 1;
        self.serving_player = opening_server(self.current_set_index);
        changes.push(ScoreChange::ServerChanged {
            player: self.serving_player,
        });
    }

    fn finish(&mut self, result: MatchResult) {
        self.status = MatchStatus::Finished(result);
        self.end_date = Some(Utc::now());
        tracing::debug!(match_id = %self.id, ?result, "match finished");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
