//! Serve rotation among the four players.
//!
//! Two rules share the same `A -> C -> B -> D` player cycle:
//!
//! - **Regular games**: serve passes to the next player after every completed
//!   game. The match holds the current server directly and advances it with
//!   [`Player::next_server`].
//! - **Tiebreaks**: the opening server serves a single point, then every
//!   following turn lasts two points. [`TiebreakServe`] tracks progress
//!   through the current turn.
//!
//! At the start of every set the serving team is fixed by set parity: even
//! set indices open with team one (player A), odd ones with team two
//! (player C). See [`opening_server`].

use crate::team::{Player, Team};

/// Points served in the opening turn of a tiebreak.
pub const TIEBREAK_OPENING_SERVES: u8 = 1;

/// Points served in every later tiebreak turn.
pub const TIEBREAK_TURN_SERVES: u8 = 2;

/// The team that opens serve in the set at `set_index`.
pub fn opening_team(set_index: usize) -> Team {
    if set_index % 2 == 0 {
        Team::One
    } else {
        Team::Two
    }
}

/// The player who opens serve in the set at `set_index`.
pub fn opening_server(set_index: usize) -> Player {
    opening_team(set_index).lead_server()
}

// ---------------------------------------------------------------------------
// TiebreakServe
// ---------------------------------------------------------------------------

/// Serve tracking inside a tiebreak.
///
/// `serve_count` counts points served in the current turn and resets to 0
/// whenever serve passes on. The turn is over once it reaches the number of
/// serves owed: 1 for the opening turn, 2 afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiebreakServe {
    server: Player,
    serve_count: u8,
    total_points: u32,
}

impl TiebreakServe {
    /// Start tracking with `first` serving the opening point.
    pub fn new(first: Player) -> Self {
        Self {
            server: first,
            serve_count: 0,
            total_points: 0,
        }
    }

    /// Rebuild from stored parts.
    pub fn from_parts(server: Player, serve_count: u8, total_points: u32) -> Self {
        Self {
            server,
            serve_count,
            total_points,
        }
    }

    /// The player serving the next point.
    pub fn server(&self) -> Player {
        self.server
    }

    /// The team serving the next point.
    pub fn serving_team(&self) -> Team {
        self.server.team()
    }

    /// Points served so far in the current turn.
    pub fn serve_count(&self) -> u8 {
        self.serve_count
    }

    /// Points played in the tiebreak so far.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Points the current turn lasts.
    pub fn serves_owed(&self) -> u8 {
        // The opening turn is the only one that began before any point.
        if self.total_points == u32::from(self.serve_count) {
            TIEBREAK_OPENING_SERVES
        } else {
            TIEBREAK_TURN_SERVES
        }
    }

    /// Record one played point and pass serve on if the turn is finished.
    pub fn record_point(&mut self) {
        self.total_points += 1;
        self.serve_count += 1;
        if self.serve_count >= self.serves_owed() {
            self.rotate();
        }
    }

    /// Pass serve to the next player and start a fresh turn.
    pub fn rotate(&mut self) {
        self.server = self.server.next_server();
        self.serve_count = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_parity_picks_opening_server() {
        assert_eq!(opening_server(0), Player::A);
        assert_eq!(opening_server(1), Player::C);
        assert_eq!(opening_server(2), Player::A);
        assert_eq!(opening_team(3), Team::Two);
    }

    #[test]
    fn tiebreak_serves_one_then_two_per_turn() {
        let mut serve = TiebreakServe::new(Player::A);
        let mut servers = Vec::new();
        for _ in 0..9 {
            servers.push(serve.server());
            serve.record_point();
        }
        assert_eq!(
            servers,
            vec![
                Player::A,
                Player::C,
                Player::C,
                Player::B,
                Player::B,
                Player::D,
                Player::D,
                Player::A,
                Player::A,
            ]
        );
        assert_eq!(serve.total_points(), 9);
    }

    #[test]
    fn serve_count_resets_on_rotation() {
        let mut serve = TiebreakServe::new(Player::A);
        assert_eq!(serve.serves_owed(), 1);
        serve.record_point();
        assert_eq!(serve.server(), Player::C);
        assert_eq!(serve.serve_count(), 0);
        assert_eq!(serve.serves_owed(), 2);

        serve.record_point();
        assert_eq!(serve.server(), Player::C);
        assert_eq!(serve.serve_count(), 1);

        serve.record_point();
        assert_eq!(serve.server(), Player::B);
        assert_eq!(serve.serve_count(), 0);
    }

    #[test]
    fn serving_team_follows_player() {
        let mut serve = TiebreakServe::new(Player::A);
        assert_eq!(serve.serving_team(), Team::One);
        serve.record_point();
        assert_eq!(serve.serving_team(), Team::Two);
    }

    #[test]
    fn manual_rotation_starts_a_two_point_turn_mid_tiebreak() {
        let mut serve = TiebreakServe::from_parts(Player::C, 1, 2);
        serve.rotate();
        assert_eq!(serve.server(), Player::B);
        assert_eq!(serve.serve_count(), 0);
        assert_eq!(serve.serves_owed(), 2);
    }
}
