//! Court-side scorer -- plays a scripted match from the command line.
//!
//! Run with:
//!   cargo run --example court_side -p padel-engine -- [DATA_DIR]
//!
//! Each character of the `RALLIES` environment variable is one input:
//! `1` or `2` taps that team's score area, `u` undoes (dropping any tap
//! still waiting to score), `s` changes server.
//! Taps go through the same debouncer a touch UI would use, so `11` typed
//! quickly is a double tap. History and settings are kept in `DATA_DIR`
//! (default: a `padel-scores` directory under the system temp dir).
//!
//! Set `RUST_LOG=debug` to watch the scorer's decisions.

use std::time::{Duration, Instant};

use anyhow::Context;
use padel_engine::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_RALLIES: &str = "1112 2221 1111 2222 2222 1u1 s1111 1111 1111";

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dir = std::env::args()
        .nth(1)
        .map(Into::into)
        .unwrap_or_else(|| std::env::temp_dir().join("padel-scores"));
    let store = FileStore::open(&dir)
        .with_context(|| format!("opening score directory {}", dir.display()))?;

    let mut scorer = ScoreManager::new(
        store,
        EngineConfig {
            format: MatchFormat::BEST_OF_THREE,
            team1_name: "North".to_owned(),
            team2_name: "South".to_owned(),
            ..Default::default()
        },
    );
    scorer.subscribe(|event| {
        if event.finishes_match() {
            println!("*** match over ***");
        }
    });

    let rallies = std::env::var("RALLIES").unwrap_or_else(|_| DEFAULT_RALLIES.to_owned());
    let mut taps = TapDebouncer::default();
    let config = taps.config();
    let mut now = Instant::now();

    for input in rallies.chars() {
        // Spaces separate gestures by more than the commit delay.
        let gap = if input == ' ' {
            config.commit_delay + Duration::from_millis(100)
        } else {
            Duration::from_millis(120)
        };
        now += gap;
        if let Some(action) = taps.poll(now) {
            action.apply(&mut scorer);
        }

        let action = match input {
            '1' => taps.tap(Team::One, now),
            '2' => taps.tap(Team::Two, now),
            'u' => {
                // An explicit undo replaces any tap still waiting to score.
                taps.cancel();
                Some(TapAction::Undo)
            }
            's' => {
                scorer.change_server();
                None
            }
            _ => None,
        };
        if let Some(action) = action {
            action.apply(&mut scorer);
        }
    }
    if let Some(action) = taps.poll(now + config.commit_delay) {
        action.apply(&mut scorer);
    }

    print_scoreboard(scorer.current_match());
    println!("history: {} match(es) in {}", scorer.history().len(), dir.display());
    Ok(())
}

fn print_scoreboard(m: &Match) {
    for (index, set) in m.sets().iter().enumerate() {
        println!("set {}: {}", index + 1, set.summary());
    }
    let game = m.current_game();
    println!(
        "game: {} {} - {} {}",
        m.team1_name(),
        game.points(Team::One),
        game.points(Team::Two),
        m.team2_name()
    );
    println!("serving: {}", m.current_serving_player());
    println!("result: {} ({})", m.final_score(), m.formatted_duration());
}
