//! Scoring configuration read by the game and match engines.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ScoringMode
// ---------------------------------------------------------------------------

/// How deuce (40-40) is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringMode {
    /// A single deciding point at 40-40.
    #[default]
    GoldenPoint,
    /// Two clear points are needed after deuce.
    Advantage,
}

impl ScoringMode {
    /// `true` for [`ScoringMode::GoldenPoint`].
    pub fn uses_golden_point(self) -> bool {
        matches!(self, ScoringMode::GoldenPoint)
    }

    /// Short name shown in settings lists.
    pub fn display_name(self) -> &'static str {
        match self {
            ScoringMode::GoldenPoint => "Golden point",
            ScoringMode::Advantage => "Advantage",
        }
    }

    /// One-line explanation of the rule.
    pub fn description(self) -> &'static str {
        match self {
            ScoringMode::GoldenPoint => "At 40-40, the next point wins the game",
            ScoringMode::Advantage => "At 40-40, play advantage",
        }
    }
}

// ---------------------------------------------------------------------------
// GameSettings
// ---------------------------------------------------------------------------

/// Process-wide scoring settings, persisted separately from match state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    /// Deuce resolution rule.
    pub scoring_mode: ScoringMode,
}

// ---------------------------------------------------------------------------
// MatchFormat
// ---------------------------------------------------------------------------

/// How many sets end a match.
///
/// The default format has no threshold: play continues set after set until
/// the match is stopped explicitly. `sets_to_win: Some(2)` gives a
/// best-of-three match that completes on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchFormat {
    /// Sets a team must win to take the match, or `None` for open-ended play.
    pub sets_to_win: Option<u32>,
}

impl MatchFormat {
    /// Open-ended play, ended only by an explicit stop.
    pub const OPEN: MatchFormat = MatchFormat { sets_to_win: None };

    /// Best of three sets.
    pub const BEST_OF_THREE: MatchFormat = MatchFormat {
        sets_to_win: Some(2),
    };

    /// Returns `true` if `sets_won` is enough to take the match.
    pub fn is_decided_by(self, sets_won: u32) -> bool {
        match self.sets_to_win {
            Some(threshold) => sets_won >= threshold,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_golden_point() {
        assert_eq!(GameSettings::default().scoring_mode, ScoringMode::GoldenPoint);
        assert!(ScoringMode::default().uses_golden_point());
        assert!(!ScoringMode::Advantage.uses_golden_point());
    }

    #[test]
    fn settings_serialize_with_symbolic_mode() {
        let json = serde_json::to_string(&GameSettings {
            scoring_mode: ScoringMode::Advantage,
        })
        .unwrap();
        assert_eq!(json, r#"{"scoringMode":"advantage"}"#);

        let parsed: GameSettings = serde_json::from_str(r#"{"scoringMode":"goldenPoint"}"#).unwrap();
        assert_eq!(parsed.scoring_mode, ScoringMode::GoldenPoint);
    }

    #[test]
    fn open_format_never_decides() {
        assert!(!MatchFormat::OPEN.is_decided_by(0));
        assert!(!MatchFormat::OPEN.is_decided_by(100));
    }

    #[test]
    fn best_of_three_decides_at_two() {
        assert!(!MatchFormat::BEST_OF_THREE.is_decided_by(1));
        assert!(MatchFormat::BEST_OF_THREE.is_decided_by(2));
    }
}
