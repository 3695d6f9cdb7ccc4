//! Point-by-point scoring of a single game.
//!
//! A [`Game`] moves through the tennis point ladder
//! (`0 -> 15 -> 30 -> 40 -> game`) for each side. What happens at deuce
//! (40-40) depends on the [`ScoringMode`]:
//!
//! - **Golden point**: the next point wins the game. [`Point::Advantage`] is
//!   never entered.
//! - **Advantage**: the next point gives the scorer advantage. A second point
//!   wins the game, while a point for the opponent returns both sides to 40.
//!
//! # Example
//!
//! ```
//! use padel_model::prelude::*;
//!
//! let mut game = Game::new();
//! for _ in 0..3 {
//!     game.increment_point(Team::One, ScoringMode::GoldenPoint);
//!     game.increment_point(Team::Two, ScoringMode::GoldenPoint);
//! }
//! // 40-40: golden point decides it.
//! assert!(game.increment_point(Team::Two, ScoringMode::GoldenPoint));
//! assert_eq!(game.winner(), Some(Team::Two));
//! ```

use serde::{Deserialize, Serialize};

use crate::settings::ScoringMode;
use crate::team::{Outcome, Team};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A side's score within a game, in ladder order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Point {
    #[default]
    Love,
    Fifteen,
    Thirty,
    Forty,
    /// Only reachable from deuce under [`ScoringMode::Advantage`].
    Advantage,
    /// Terminal: the side has won the game.
    Game,
}

impl Point {
    /// The scoreboard label ("0", "15", "30", "40", "AD", "Game").
    pub fn display(self) -> &'static str {
        match self {
            Point::Love => "0",
            Point::Fifteen => "15",
            Point::Thirty => "30",
            Point::Forty => "40",
            Point::Advantage => "AD",
            Point::Game => "Game",
        }
    }

    /// Next rung below forty, or `None` from forty upwards where deuce rules
    /// decide.
    fn next_below_forty(self) -> Option<Point> {
        match self {
            Point::Love => Some(Point::Fifteen),
            Point::Fifteen => Some(Point::Thirty),
            Point::Thirty => Some(Point::Forty),
            Point::Forty | Point::Advantage | Point::Game => None,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// One regular (non-tiebreak) game.
///
/// Once [`is_completed`](Self::is_completed) the points are frozen and the
/// winner is fixed; further increments are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Game {
    team1: Point,
    team2: Point,
    outcome: Outcome,
}

impl Game {
    /// A fresh game at love-love.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a game from stored parts. No rule checking is done here;
    /// validation belongs to the caller that decodes persisted data.
    pub fn from_parts(team1: Point, team2: Point, outcome: Outcome) -> Self {
        Self {
            team1,
            team2,
            outcome,
        }
    }

    /// The given team's current point.
    pub fn points(&self, team: Team) -> Point {
        match team {
            Team::One => self.team1,
            Team::Two => self.team2,
        }
    }

    /// How the game stands.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// `true` once a side has won the game.
    pub fn is_completed(&self) -> bool {
        self.outcome.is_completed()
    }

    /// The winner, once completed.
    pub fn winner(&self) -> Option<Team> {
        self.outcome.winner()
    }

    /// `true` while both sides are still at love.
    pub fn is_fresh(&self) -> bool {
        self.team1 == Point::Love && self.team2 == Point::Love
    }

    /// `true` at 40-40.
    pub fn is_deuce(&self) -> bool {
        self.team1 == Point::Forty && self.team2 == Point::Forty
    }

    /// Award a point to `team`.
    ///
    /// Returns `false` (and changes nothing) if the game is already over.
    pub fn increment_point(&mut self, team: Team, mode: ScoringMode) -> bool {
        if self.is_completed() {
            return false;
        }

        let scorer = self.points(team);
        let receiver = self.points(team.opponent());

        match (scorer, receiver) {
            (Point::Advantage, _) => self.award_game(team),
            (Point::Forty, Point::Forty) => {
                if mode.uses_golden_point() {
                    self.award_game(team);
                } else {
                    self.set_points(team, Point::Advantage);
                }
            }
            (_, Point::Advantage) => {
                self.set_points(team, Point::Forty);
                self.set_points(team.opponent(), Point::Forty);
            }
            (Point::Forty, _) => self.award_game(team),
            (rung, _) => match rung.next_below_forty() {
                Some(next) => self.set_points(team, next),
                None => return false,
            },
        }
        true
    }

    fn set_points(&mut self, team: Team, point: Point) {
        match team {
            Team::One => self.team1 = point,
            Team::Two => self.team2 = point,
        }
    }

    fn award_game(&mut self, team: Team) {
        self.set_points(team, Point::Game);
        self.outcome = Outcome::Won(team);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: ScoringMode = ScoringMode::GoldenPoint;
    const ADV: ScoringMode = ScoringMode::Advantage;

    fn deuce(mode: ScoringMode) -> Game {
        let mut game = Game::new();
        for _ in 0..3 {
            assert!(game.increment_point(Team::One, mode));
            assert!(game.increment_point(Team::Two, mode));
        }
        assert!(game.is_deuce());
        game
    }

    #[test]
    fn four_straight_points_win_the_game() {
        let mut game = Game::new();
        let ladder = [Point::Fifteen, Point::Thirty, Point::Forty];
        for expected in ladder {
            assert!(game.increment_point(Team::One, GOLDEN));
            assert_eq!(game.points(Team::One), expected);
            assert!(!game.is_completed());
        }
        assert!(game.increment_point(Team::One, GOLDEN));
        assert_eq!(game.points(Team::One), Point::Game);
        assert_eq!(game.points(Team::Two), Point::Love);
        assert_eq!(game.winner(), Some(Team::One));
    }

    #[test]
    fn forty_against_thirty_wins_in_both_modes() {
        for mode in [GOLDEN, ADV] {
            let mut game = Game::from_parts(Point::Forty, Point::Thirty, Outcome::InProgress);
            assert!(game.increment_point(Team::One, mode));
            assert_eq!(game.winner(), Some(Team::One));
        }
    }

    #[test]
    fn golden_point_at_deuce_ends_game_for_either_side() {
        for team in Team::ALL {
            let mut game = deuce(GOLDEN);
            assert!(game.increment_point(team, GOLDEN));
            assert_eq!(game.winner(), Some(team));
            assert_eq!(game.points(team), Point::Game);
            assert_eq!(game.points(team.opponent()), Point::Forty);
        }
    }

    #[test]
    fn advantage_then_game() {
        let mut game = deuce(ADV);
        assert!(game.increment_point(Team::Two, ADV));
        assert_eq!(game.points(Team::Two), Point::Advantage);
        assert_eq!(game.points(Team::One), Point::Forty);
        assert!(!game.is_completed());

        assert!(game.increment_point(Team::Two, ADV));
        assert_eq!(game.winner(), Some(Team::Two));
    }

    #[test]
    fn answered_advantage_returns_to_deuce() {
        let mut game = deuce(ADV);
        game.increment_point(Team::One, ADV);
        assert_eq!(game.points(Team::One), Point::Advantage);

        game.increment_point(Team::Two, ADV);
        assert!(game.is_deuce());
        assert!(!game.is_completed());
    }

    #[test]
    fn completed_game_rejects_points() {
        let mut game = Game::new();
        for _ in 0..4 {
            game.increment_point(Team::Two, GOLDEN);
        }
        let frozen = game;
        assert!(!game.increment_point(Team::One, GOLDEN));
        assert!(!game.increment_point(Team::Two, ADV));
        assert_eq!(game, frozen);
    }

    #[test]
    fn display_labels() {
        assert_eq!(Point::Love.display(), "0");
        assert_eq!(Point::Forty.to_string(), "40");
        assert_eq!(Point::Advantage.display(), "AD");
        assert_eq!(Point::Game.display(), "Game");
    }

    #[test]
    fn points_serialize_by_symbolic_name() {
        assert_eq!(serde_json::to_string(&Point::Love).unwrap(), r#""love""#);
        assert_eq!(
            serde_json::from_str::<Point>(r#""advantage""#).unwrap(),
            Point::Advantage
        );
    }
}
