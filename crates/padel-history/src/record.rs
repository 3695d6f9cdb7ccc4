//! On-disk shapes for matches, sets and games.
//!
//! The model uses tagged variants ([`Outcome`], [`MatchStatus`],
//! `Option<Tiebreak>`) so that illegal combinations cannot be built. The
//! persisted form is flatter: `completed` flags next to nullable `winner`
//! numbers, and tiebreak fields spelled out individually. This module is the
//! only place the two meet.
//!
//! Encoding ([`MatchRecord::from`]) always succeeds. Decoding
//! ([`Match::try_from`]) validates every cross-field rule and reports the
//! first violation as a [`RecordError`].
//!
//! # Example
//!
//! ```
//! use padel_history::record::MatchRecord;
//! use padel_model::prelude::*;
//!
//! let m = Match::default();
//! let json = serde_json::to_string(&MatchRecord::from(&m)).unwrap();
//! let record: MatchRecord = serde_json::from_str(&json).unwrap();
//! assert_eq!(Match::try_from(record).unwrap(), m);
//! ```

use chrono::{DateTime, Utc};
use padel_model::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RecordError
// ---------------------------------------------------------------------------

/// A persisted record that does not describe a valid model state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A team identifier other than 1 or 2.
    #[error("invalid team number {0}, expected 1 or 2")]
    InvalidTeam(u8),

    /// `completed` and `winner` disagree.
    #[error("{entity}: completed={completed} does not match winner={winner:?}")]
    WinnerMismatch {
        entity: &'static str,
        completed: bool,
        winner: Option<u8>,
    },

    /// A completed game whose winner is not on `game`.
    #[error("game won by team {0} but its points are not `game`")]
    GamePointsMismatch(u8),

    /// `isTiebreak` disagrees with the tiebreak fields.
    #[error("set {set_index}: isTiebreak={is_tiebreak} but tiebreak fields are inconsistent")]
    TiebreakMismatch { set_index: usize, is_tiebreak: bool },

    /// A serve count outside the 0..=2 range.
    #[error("set {set_index}: tiebreak serve count {count} out of range")]
    ServeCountOutOfRange { set_index: usize, count: u8 },

    /// `currentSetIndex` does not index into `sets`.
    #[error("current set index {index} out of range for {len} sets")]
    SetIndexOutOfRange { index: usize, len: usize },

    /// `servingTeam` is not the team of `servingPlayer`.
    #[error("serving team {team} does not match serving player {player}")]
    ServingTeamMismatch { team: u8, player: Player },
}

fn team_from(n: u8) -> Result<Team, RecordError> {
    Team::from_number(n).ok_or(RecordError::InvalidTeam(n))
}

fn outcome_from(
    entity: &'static str,
    completed: bool,
    winner: Option<u8>,
) -> Result<Outcome, RecordError> {
    match (completed, winner) {
        (false, None) => Ok(Outcome::InProgress),
        (true, Some(n)) => Ok(Outcome::Won(team_from(n)?)),
        _ => Err(RecordError::WinnerMismatch {
            entity,
            completed,
            winner,
        }),
    }
}

// ---------------------------------------------------------------------------
// GameRecord
// ---------------------------------------------------------------------------

/// Persisted [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub team1_points: Point,
    pub team2_points: Point,
    pub completed: bool,
    pub winner: Option<u8>,
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        Self {
            team1_points: game.points(Team::One),
            team2_points: game.points(Team::Two),
            completed: game.is_completed(),
            winner: game.winner().map(Team::number),
        }
    }
}

impl TryFrom<GameRecord> for Game {
    type Error = RecordError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let outcome = outcome_from("game", record.completed, record.winner)?;
        let game = Game::from_parts(record.team1_points, record.team2_points, outcome);
        if let Some(winner) = outcome.winner() {
            if game.points(winner) != Point::Game {
                return Err(RecordError::GamePointsMismatch(winner.number()));
            }
        }
        Ok(game)
    }
}

// ---------------------------------------------------------------------------
// SetRecord
// ---------------------------------------------------------------------------

/// Persisted tiebreak score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiebreakScoreRecord {
    pub team1: u32,
    pub team2: u32,
}

/// Persisted [`Set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecord {
    pub team1_games: u32,
    pub team2_games: u32,
    pub completed: bool,
    pub winner: Option<u8>,
    pub is_tiebreak: bool,
    pub tiebreak_score: Option<TiebreakScoreRecord>,
    pub tiebreak_serving_player: Option<Player>,
    #[serde(default)]
    pub tiebreak_serve_count: u8,
    #[serde(default)]
    pub tiebreak_total_points: u32,
}

impl From<&Set> for SetRecord {
    fn from(set: &Set) -> Self {
        let tiebreak = set.tiebreak();
        Self {
            team1_games: set.games(Team::One),
            team2_games: set.games(Team::Two),
            completed: set.is_completed(),
            winner: set.winner().map(Team::number),
            is_tiebreak: set.is_tiebreak(),
            tiebreak_score: tiebreak.map(|tb| TiebreakScoreRecord {
                team1: tb.score.team1,
                team2: tb.score.team2,
            }),
            tiebreak_serving_player: tiebreak.map(|tb| tb.serve.server()),
            tiebreak_serve_count: tiebreak.map_or(0, |tb| tb.serve.serve_count()),
            tiebreak_total_points: tiebreak.map_or(0, |tb| tb.serve.total_points()),
        }
    }
}

impl SetRecord {
    fn into_set(self, set_index: usize) -> Result<Set, RecordError> {
        let outcome = outcome_from("set", self.completed, self.winner)?;

        let tiebreak = match (self.is_tiebreak, self.tiebreak_score) {
            (false, None) => None,
            (true, Some(score)) => {
                if self.tiebreak_serve_count > 2 {
                    return Err(RecordError::ServeCountOutOfRange {
                        set_index,
                        count: self.tiebreak_serve_count,
                    });
                }
                let server = self.tiebreak_serving_player.unwrap_or(Player::A);
                Some(Tiebreak {
                    score: TiebreakScore {
                        team1: score.team1,
                        team2: score.team2,
                    },
                    serve: TiebreakServe::from_parts(
                        server,
                        self.tiebreak_serve_count,
                        self.tiebreak_total_points,
                    ),
                })
            }
            (is_tiebreak, _) => {
                return Err(RecordError::TiebreakMismatch {
                    set_index,
                    is_tiebreak,
                })
            }
        };

        Ok(Set::from_parts(
            self.team1_games,
            self.team2_games,
            outcome,
            tiebreak,
        ))
    }
}

// ---------------------------------------------------------------------------
// MatchRecord
// ---------------------------------------------------------------------------

/// Persisted [`Match`], one entry of the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub sets: Vec<SetRecord>,
    pub current_set_index: usize,
    pub current_game: GameRecord,
    pub completed: bool,
    pub winner: Option<u8>,
    pub team1_name: String,
    pub team2_name: String,
    pub serving_team: Option<u8>,
    pub serving_player: Option<Player>,
}

impl From<&Match> for MatchRecord {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id(),
            start_date: m.start_date(),
            end_date: m.end_date(),
            sets: m.sets().iter().map(SetRecord::from).collect(),
            current_set_index: m.current_set_index(),
            current_game: GameRecord::from(m.current_game()),
            completed: m.is_completed(),
            winner: m.winner().map(Team::number),
            team1_name: m.team1_name().to_owned(),
            team2_name: m.team2_name().to_owned(),
            serving_team: Some(m.serving_team().number()),
            serving_player: Some(m.serving_player()),
        }
    }
}

impl TryFrom<MatchRecord> for Match {
    type Error = RecordError;

    fn try_from(record: MatchRecord) -> Result<Self, Self::Error> {
        let len = record.sets.len();
        if record.current_set_index >= len {
            return Err(RecordError::SetIndexOutOfRange {
                index: record.current_set_index,
                len,
            });
        }

        let sets = record
            .sets
            .into_iter()
            .enumerate()
            .map(|(i, set)| set.into_set(i))
            .collect::<Result<Vec<_>, _>>()?;
        let current_game = Game::try_from(record.current_game)?;

        // A finished match may be drawn, so only "winner without completion"
        // is contradictory here.
        let status = match (record.completed, record.winner) {
            (false, None) => MatchStatus::InProgress,
            (true, None) => MatchStatus::Finished(MatchResult::Drawn),
            (true, Some(n)) => MatchStatus::Finished(MatchResult::Won(team_from(n)?)),
            (false, Some(_)) => {
                return Err(RecordError::WinnerMismatch {
                    entity: "match",
                    completed: record.completed,
                    winner: record.winner,
                })
            }
        };

        let serving_team = record.serving_team.map(team_from).transpose()?;
        let serving_player = match (record.serving_player, serving_team) {
            (Some(player), Some(team)) if player.team() != team => {
                return Err(RecordError::ServingTeamMismatch {
                    team: team.number(),
                    player,
                })
            }
            (Some(player), _) => player,
            (None, Some(team)) => team.lead_server(),
            (None, None) => opening_server(record.current_set_index),
        };

        Match::from_parts(MatchParts {
            id: record.id,
            start_date: record.start_date,
            end_date: record.end_date,
            sets,
            current_set_index: record.current_set_index,
            current_game,
            status,
            team1_name: record.team1_name,
            team2_name: record.team2_name,
            serving_player,
        })
        .ok_or(RecordError::SetIndexOutOfRange {
            index: record.current_set_index,
            len,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
