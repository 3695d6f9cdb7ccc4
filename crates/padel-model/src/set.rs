//! Game accumulation into sets, including the 6-6 tiebreak.
//!
//! A set is won by the first side to reach six games with a two-game lead.
//! At 6-6 the set switches into a tiebreak, played on points: the first side
//! to seven tiebreak points with a two-point lead takes the set. Once the
//! tiebreak has started only the tiebreak score can decide the set.

use crate::serve::TiebreakServe;
use crate::team::{Outcome, Player, Team};

/// Games needed to win a set outright.
pub const GAMES_TO_WIN_SET: u32 = 6;

/// Tiebreak points needed to win a set from 6-6.
pub const TIEBREAK_POINTS_TO_WIN: u32 = 7;

/// Lead required for both sets and tiebreaks.
pub const WINNING_MARGIN: u32 = 2;

/// Player who serves the first tiebreak point. Always A, whichever team
/// held serve entering the tiebreak.
pub const TIEBREAK_FIRST_SERVER: Player = Player::A;

fn has_winning_lead(mine: u32, theirs: u32, target: u32) -> bool {
    mine >= target && mine >= theirs + WINNING_MARGIN
}

// ---------------------------------------------------------------------------
// TiebreakScore
// ---------------------------------------------------------------------------

/// Points won by each side in a tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TiebreakScore {
    pub team1: u32,
    pub team2: u32,
}

impl TiebreakScore {
    /// Points for `team`.
    pub fn points(&self, team: Team) -> u32 {
        match team {
            Team::One => self.team1,
            Team::Two => self.team2,
        }
    }

    fn add_point(&mut self, team: Team) {
        match team {
            Team::One => self.team1 += 1,
            Team::Two => self.team2 += 1,
        }
    }

    /// The side holding a winning tiebreak score, if any.
    pub fn leader_with_win(&self) -> Option<Team> {
        Team::ALL.into_iter().find(|&team| {
            has_winning_lead(
                self.points(team),
                self.points(team.opponent()),
                TIEBREAK_POINTS_TO_WIN,
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Tiebreak
// ---------------------------------------------------------------------------

/// State of an active (or finished) tiebreak: score plus serve tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiebreak {
    pub score: TiebreakScore,
    pub serve: TiebreakServe,
}

impl Tiebreak {
    fn new() -> Self {
        Self {
            score: TiebreakScore::default(),
            serve: TiebreakServe::new(TIEBREAK_FIRST_SERVER),
        }
    }
}

// ---------------------------------------------------------------------------
// Set
// ---------------------------------------------------------------------------

/// One set: games won by each side, and the tiebreak once 6-6 is reached.
///
/// A completed set is terminal; it accepts neither games nor tiebreak points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Set {
    team1_games: u32,
    team2_games: u32,
    outcome: Outcome,
    tiebreak: Option<Tiebreak>,
}

impl Set {
    /// An empty set at 0-0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a set from stored parts.
    pub fn from_parts(
        team1_games: u32,
        team2_games: u32,
        outcome: Outcome,
        tiebreak: Option<Tiebreak>,
    ) -> Self {
        Self {
            team1_games,
            team2_games,
            outcome,
            tiebreak,
        }
    }

    /// Games won by `team`.
    pub fn games(&self, team: Team) -> u32 {
        match team {
            Team::One => self.team1_games,
            Team::Two => self.team2_games,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_completed(&self) -> bool {
        self.outcome.is_completed()
    }

    pub fn winner(&self) -> Option<Team> {
        self.outcome.winner()
    }

    /// `true` once the set has gone to a tiebreak. Never reverts.
    pub fn is_tiebreak(&self) -> bool {
        self.tiebreak.is_some()
    }

    pub fn tiebreak(&self) -> Option<&Tiebreak> {
        self.tiebreak.as_ref()
    }

    pub fn tiebreak_score(&self) -> Option<TiebreakScore> {
        self.tiebreak.map(|tb| tb.score)
    }

    /// The player serving the next tiebreak point.
    pub fn tiebreak_serving_player(&self) -> Option<Player> {
        self.tiebreak.map(|tb| tb.serve.server())
    }

    /// The team serving the next tiebreak point, `None` outside a tiebreak.
    pub fn tiebreak_serving_team(&self) -> Option<Team> {
        self.tiebreak_serving_player().map(Player::team)
    }

    /// `true` while nothing has been won in this set.
    pub fn is_fresh(&self) -> bool {
        self.team1_games == 0 && self.team2_games == 0 && self.tiebreak.is_none()
    }

    /// Scoreline such as `"6 - 4"`, or `"6 - 6 (7-5)"` after a tiebreak.
    pub fn summary(&self) -> String {
        match self.tiebreak {
            Some(tb) => format!(
                "{} - {} ({}-{})",
                self.team1_games, self.team2_games, tb.score.team1, tb.score.team2
            ),
            None => format!("{} - {}", self.team1_games, self.team2_games),
        }
    }

    /// Credit a won game to `winner`.
    ///
    /// Returns `false` without changing anything if the set is over or the
    /// tiebreak is already being played.
    pub fn add_game(&mut self, winner: Team) -> bool {
        if self.is_completed() || self.is_tiebreak() {
            return false;
        }
        match winner {
            Team::One => self.team1_games += 1,
            Team::Two => self.team2_games += 1,
        }
        self.check_completion();
        true
    }

    /// Award a tiebreak point to `team` and advance tiebreak serve.
    ///
    /// Returns `false` without changing anything outside a tiebreak or once
    /// the set is over.
    pub fn increment_tiebreak_point(&mut self, team: Team) -> bool {
        if self.is_completed() {
            return false;
        }
        let Some(tiebreak) = self.tiebreak.as_mut() else {
            return false;
        };
        tiebreak.score.add_point(team);
        tiebreak.serve.record_point();
        self.check_completion();
        true
    }

    /// Pass tiebreak serve to the next player out of turn.
    pub fn rotate_tiebreak_server(&mut self) -> bool {
        match self.tiebreak.as_mut() {
            Some(tiebreak) if !self.outcome.is_completed() => {
                tiebreak.serve.rotate();
                true
            }
            _ => false,
        }
    }

    /// Mark the set as won by `winner`. No effect on a set that is already
    /// decided.
    pub fn complete(&mut self, winner: Team) {
        if !self.is_completed() {
            self.outcome = Outcome::Won(winner);
        }
    }

    fn check_completion(&mut self) {
        if let Some(tiebreak) = self.tiebreak {
            if let Some(winner) = tiebreak.score.leader_with_win() {
                self.outcome = Outcome::Won(winner);
            }
            return;
        }

        if self.team1_games == GAMES_TO_WIN_SET && self.team2_games == GAMES_TO_WIN_SET {
            self.tiebreak = Some(Tiebreak::new());
            return;
        }

        let winner = Team::ALL.into_iter().find(|&team| {
            has_winning_lead(
                self.games(team),
                self.games(team.opponent()),
                GAMES_TO_WIN_SET,
            )
        });
        if let Some(winner) = winner {
            self.outcome = Outcome::Won(winner);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
