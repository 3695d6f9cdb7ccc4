//! Sides, players and outcomes.
//!
//! A padel match is played between two [`Team`]s of two players each. The
//! four players are named by convention:
//!
//! - [`Player::A`] and [`Player::B`] play for [`Team::One`].
//! - [`Player::C`] and [`Player::D`] play for [`Team::Two`].
//!
//! Serve passes between the players in the fixed cycle `A -> C -> B -> D -> A`,
//! which alternates the serving team on every step.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// One of the two sides on court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Team {
    /// The first team (players A and B).
    One,
    /// The second team (players C and D).
    Two,
}

impl Team {
    /// Both teams, in order.
    pub const ALL: [Team; 2] = [Team::One, Team::Two];

    /// The other side.
    pub fn opponent(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    /// The numeric identifier used by callers and on disk (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }

    /// Parse the numeric identifier. Anything other than 1 or 2 is `None`.
    pub fn from_number(n: u8) -> Option<Team> {
        match n {
            1 => Some(Team::One),
            2 => Some(Team::Two),
            _ => None,
        }
    }

    /// The player who opens serve for this team at the start of a set.
    pub fn lead_server(self) -> Player {
        match self {
            Team::One => Player::A,
            Team::Two => Player::C,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "team {}", self.number())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One of the four players, named by serving position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
    C,
    D,
}

impl Player {
    /// The team this player belongs to.
    pub fn team(self) -> Team {
        match self {
            Player::A | Player::B => Team::One,
            Player::C | Player::D => Team::Two,
        }
    }

    /// The next server in the `A -> C -> B -> D` cycle.
    pub fn next_server(self) -> Player {
        match self {
            Player::A => Player::C,
            Player::C => Player::B,
            Player::B => Player::D,
            Player::D => Player::A,
        }
    }

    /// Single-letter label.
    pub fn label(self) -> &'static str {
        match self {
            Player::A => "A",
            Player::B => "B",
            Player::C => "C",
            Player::D => "D",
        }
    }

    /// Parse a single-letter label.
    pub fn from_label(label: &str) -> Option<Player> {
        match label {
            "A" => Some(Player::A),
            "B" => Some(Player::B),
            "C" => Some(Player::C),
            "D" => Some(Player::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Whether a game or set is still being played, or who took it.
///
/// Games and sets always end with a winner, so there is no drawn state here.
/// See [`MatchStatus`](crate::match_state::MatchStatus) for matches, which
/// may finish undecided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// Still being played.
    #[default]
    InProgress,
    /// Finished, won by the given team.
    Won(Team),
}

impl Outcome {
    /// `true` once a winner has been recorded.
    pub fn is_completed(self) -> bool {
        matches!(self, Outcome::Won(_))
    }

    /// The winning team, if any.
    pub fn winner(self) -> Option<Team> {
        match self {
            Outcome::InProgress => None,
            Outcome::Won(team) => Some(team),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_cycle_returns_to_start_after_four_steps() {
        let mut p = Player::A;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(p);
            p = p.next_server();
        }
        assert_eq!(seen, vec![Player::A, Player::C, Player::B, Player::D]);
        assert_eq!(p, Player::A);
    }

    #[test]
    fn rotation_alternates_serving_team() {
        let mut p = Player::A;
        for _ in 0..8 {
            let next = p.next_server();
            assert_ne!(p.team(), next.team());
            p = next;
        }
    }

    #[test]
    fn team_numbers_round_trip() {
        for team in Team::ALL {
            assert_eq!(Team::from_number(team.number()), Some(team));
        }
        assert_eq!(Team::from_number(0), None);
        assert_eq!(Team::from_number(3), None);
    }

    #[test]
    fn lead_servers_belong_to_their_team() {
        assert_eq!(Team::One.lead_server(), Player::A);
        assert_eq!(Team::Two.lead_server(), Player::C);
        assert_eq!(Team::One.lead_server().team(), Team::One);
        assert_eq!(Team::Two.lead_server().team(), Team::Two);
    }

    #[test]
    fn player_labels_parse_back() {
        for p in [Player::A, Player::B, Player::C, Player::D] {
            assert_eq!(Player::from_label(p.label()), Some(p));
        }
        assert_eq!(Player::from_label("E"), None);
    }

    #[test]
    fn outcome_winner() {
        assert_eq!(Outcome::InProgress.winner(), None);
        assert!(!Outcome::InProgress.is_completed());
        assert_eq!(Outcome::Won(Team::Two).winner(), Some(Team::Two));
        assert!(Outcome::Won(Team::Two).is_completed());
    }
}
