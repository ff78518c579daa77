//! Gaze Runner entry point
//!
//! Headless demo: plays a few runs of the simulation at a fixed timestep,
//! steering the human ball through the gaze slot and the agent ball
//! through a stand-in action source, then records the results on the
//! local leaderboard.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use gaze_runner::consts::SIM_DT;
use gaze_runner::platform::DirectionSlot;
use gaze_runner::sim::{
    ActionSource, AgentAction, GameEvent, GameState, GazeDirection, Observation, SteerSignal,
    TickInput, agent_observation, tick,
};
use gaze_runner::{HighScores, Tuning};

/// Self-played runs per demo session
const DEMO_RUNS: u32 = 3;
/// Hard cap on simulated frames (five minutes of sim time)
const MAX_FRAMES: u32 = 60 * 60 * 5;

const TUNING_PATH: &str = "tuning.json";
const HIGHSCORE_PATH: &str = "highscores.json";

fn main() {
    env_logger::init();

    let tuning = Tuning::load_from(Path::new(TUNING_PATH));
    let seed = std::env::var("GAZE_RUNNER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(now_unix);
    log::info!("Gaze Runner demo starting with seed {}", seed);

    let mut state = GameState::new(seed, tuning);
    state.enable_ai_run();

    // The demo bot plays the part of the gaze classifier: it publishes
    // direction labels into the slot and the frame loop reads snapshots,
    // exercising the same edge-triggered path a webcam source would.
    let slot = DirectionSlot::new();
    let publisher = slot.publisher();
    let mut agent = agent_pilot();

    let mut scores = HighScores::load_from(Path::new(HIGHSCORE_PATH));
    let mut runs = 0;
    let mut restart = false;

    for _ in 0..MAX_FRAMES {
        let (label, jump) = pilot(&state);
        publisher.publish_label(label);

        let ai_action = agent_observation(&state).map(|obs| agent.predict(&obs));

        let input = TickInput {
            steer: SteerSignal::Gaze(slot.read()),
            jump,
            restart,
            ai_action,
        };
        restart = false;
        tick(&mut state, &input, SIM_DT);

        let events: Vec<GameEvent> = state.events.drain(..).collect();
        for event in events {
            match event {
                GameEvent::LevelUp {
                    level,
                    speed_bonus_pct,
                } => {
                    println!("Level {}! Speed: +{}%", level, speed_bonus_pct);
                }
                GameEvent::GameOver { score } => {
                    let level = state.level.current_level;
                    println!("Game over! Score: {:.1} (level {})", score, level);
                    match scores.add_score(score, level, now_unix()) {
                        Some(rank) => log::info!("run placed at rank {}", rank),
                        None => log::info!("run did not make the leaderboard"),
                    }
                    runs += 1;
                    restart = true;
                }
                GameEvent::AiRunOver { score } => {
                    println!("Agent out at {:.1}s", score);
                }
            }
        }

        if runs >= DEMO_RUNS {
            break;
        }
    }

    if let Err(e) = scores.save_to(Path::new(HIGHSCORE_PATH)) {
        log::warn!("Could not save high scores: {}", e);
    }

    println!("\nLeaderboard:");
    for (idx, entry) in scores.entries.iter().enumerate() {
        println!(
            "{:2}. {:6.1}s  level {}",
            idx + 1,
            entry.score,
            entry.level
        );
    }
}

/// Seconds since the Unix epoch
fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Steer the human ball like a cautious player would
///
/// Reads the nearest row ahead, heads for the closest open lane, and
/// commits to a jump once a full wall row is in range.
fn pilot(state: &GameState) -> (&'static str, bool) {
    let player = &state.player;
    let lanes = &state.tuning.lanes;

    let next_z = state
        .obstacles
        .iter()
        .filter(|o| o.position.z > player.z)
        .map(|o| o.position.z)
        .fold(f32::INFINITY, f32::min);
    if !next_z.is_finite() {
        return ("center", false);
    }
    let dist = next_z - player.z;
    let row: Vec<_> = state
        .obstacles
        .iter()
        .filter(|o| (o.position.z - next_z).abs() < 0.5)
        .collect();
    let blocked =
        |idx: usize| row.iter().any(|o| o.position.x == lanes[idx]);

    if (0..lanes.len()).all(|idx| blocked(idx)) {
        // Wall row: nothing to steer around, time the jump instead
        return ("center", dist < state.current_speed() * 0.45);
    }

    if blocked(player.lane_index) && dist < 25.0 {
        let target = (0..lanes.len())
            .filter(|&idx| !blocked(idx))
            .min_by_key(|&idx| player.lane_index.abs_diff(idx));
        let wanted = match target {
            Some(t) if t < player.lane_index => GazeDirection::Left,
            Some(t) if t > player.lane_index => GazeDirection::Right,
            _ => GazeDirection::Center,
        };
        // A sustained look only fires once, so glance back to center to
        // re-arm the latch whenever the previous excursion is spent
        if state.arbiter.last_direction == wanted && !state.arbiter.command_pending {
            return ("center", false);
        }
        return match wanted {
            GazeDirection::Left => ("left", false),
            GazeDirection::Right => ("right", false),
            GazeDirection::Center => ("center", false),
        };
    }
    ("center", false)
}

/// Stand-in for the external policy driving the agent ball
///
/// Dodges when the nearest obstacle shares its lane and jumps the low
/// wall rows.
fn agent_pilot() -> impl ActionSource {
    |obs: &Observation| {
        let nearest = obs.nearest[0];
        if nearest.distance > obs.current_speed * 0.6 {
            return AgentAction::None;
        }
        if (nearest.lane - obs.lane_index).abs() < 0.5 {
            if nearest.height < 1.0 {
                AgentAction::Jump
            } else if obs.lane_index > 0.0 {
                AgentAction::Left
            } else {
                AgentAction::Right
            }
        } else {
            AgentAction::None
        }
    }
}
