//! Per-frame simulation update
//!
//! One `tick` call advances the whole game by `dt` seconds in a fixed
//! order: input resolution, ball kinematics, level progression, obstacle
//! horizon, collision and cleanup, score accrual. Nothing on this path
//! returns a `Result` or panics; a finished run freezes in place until an
//! explicit restart arrives.

use super::collision::{player_hits_obstacle, retire_passed_obstacles};
use super::input::SteerSignal;
use super::observe::AgentAction;
use super::spawn::spawn_row;
use super::state::{GameEvent, GamePhase, GameState};
use rand::Rng;

/// Rows spawned per frame are bounded so degenerate tuning (zero spacing)
/// cannot wedge the loop
const MAX_ROWS_PER_FRAME: usize = 32;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Steering signal for the human ball
    pub steer: SteerSignal,
    /// Jump request for the human ball
    pub jump: bool,
    /// Explicit full reset back to a fresh run
    pub restart: bool,
    /// Latest action from the external agent, if one is attached
    pub ai_action: Option<AgentAction>,
}

/// Advance the game state by one frame
///
/// Events from the previous frame are dropped here; the embedder drains
/// `state.events` between ticks.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.restart {
        log::info!("run restarted");
        state.reset_run();
        return;
    }
    if state.phase == GamePhase::GameOver {
        return;
    }

    let speed = state.current_speed();
    let lane_count = state.tuning.lanes.len();

    // 1. Input resolution, human ball first
    state.arbiter.tick_cooldown(dt);
    if let Some(target) = state.arbiter.resolve(
        &input.steer,
        state.player.lane_index,
        lane_count,
        state.tuning.lane_switch_cooldown,
    ) {
        state
            .player
            .switch_lane(target, &state.tuning.lanes, state.tuning.lane_switch_duration);
    }
    if input.jump {
        state.player.start_jump(state.tuning.jump_speed);
    }

    // Agent action goes through the same arbiter rule as keyboard input
    if let Some(ai) = state.ai.as_mut() {
        if ai.active {
            ai.arbiter.tick_cooldown(dt);
            let signal = match input.ai_action.unwrap_or_default() {
                AgentAction::Left => SteerSignal::Keys {
                    left: true,
                    right: false,
                },
                AgentAction::Right => SteerSignal::Keys {
                    left: false,
                    right: true,
                },
                _ => SteerSignal::Idle,
            };
            if let Some(target) = ai.arbiter.resolve(
                &signal,
                ai.player.lane_index,
                lane_count,
                state.tuning.lane_switch_cooldown,
            ) {
                ai.player.switch_lane(
                    target,
                    &state.tuning.lanes,
                    state.tuning.lane_switch_duration,
                );
            }
            if input.ai_action == Some(AgentAction::Jump) {
                ai.player.start_jump(state.tuning.jump_speed);
            }
        }
    }

    // 2. Kinematics
    state.player.advance(dt, speed, state.tuning.ball_radius);
    state.player.integrate_vertical(state.tuning.gravity, dt);
    if let Some(ai) = state.ai.as_mut() {
        if ai.active {
            ai.player.advance(dt, speed, state.tuning.ball_radius);
            ai.player.integrate_vertical(state.tuning.gravity, dt);
        }
    }

    // 3. Level progression
    if let Some(level) =
        state
            .level
            .check(state.player.z, state.tuning.max_level, state.tuning.level_length)
    {
        let speed_bonus_pct =
            ((state.tuning.speed_multiplier(level) - 1.0) * 100.0).round() as i32;
        log::info!("level {} reached, +{}% speed", level, speed_bonus_pct);
        state.events.push(GameEvent::LevelUp {
            level,
            speed_bonus_pct,
        });
    }

    // 4. Obstacle horizon
    fill_spawn_horizon(state);

    // 5. Collision, then unconditional cleanup
    let hit = state.obstacles.iter().any(|o| {
        player_hits_obstacle(&state.player, &state.tuning.lanes, state.tuning.ball_radius, o)
    });
    if hit {
        state.phase = GamePhase::GameOver;
        log::info!(
            "game over at z {:.1}, score {:.1}",
            state.player.z,
            state.score
        );
        state.events.push(GameEvent::GameOver { score: state.score });
    }
    if let Some(ai) = state.ai.as_mut() {
        if ai.active {
            let ai_hit = state.obstacles.iter().any(|o| {
                player_hits_obstacle(&ai.player, &state.tuning.lanes, state.tuning.ball_radius, o)
            });
            if ai_hit {
                ai.active = false;
                log::info!("agent run over at z {:.1}, score {:.1}", ai.player.z, ai.score);
                state.events.push(GameEvent::AiRunOver { score: ai.score });
            }
        }
    }
    let retired = retire_passed_obstacles(
        &mut state.obstacles,
        state.player.z,
        state.tuning.cleanup_margin,
    );
    if retired > 0 {
        log::debug!("retired {} obstacles behind z {:.1}", retired, state.player.z);
    }

    // 6. Score accrual; a run that just ended does not accrue this frame
    if state.phase == GamePhase::Playing {
        state.score += dt;
    }
    if let Some(ai) = state.ai.as_mut() {
        if ai.active {
            ai.score += dt;
        }
    }
}

/// Keep the obstacle horizon filled ahead of the player
///
/// Each fresh row lands at `max(player.z + lead, last + spacing + jitter)`,
/// so rows are always at least `obstacle_min_spacing` apart and never closer
/// than the lead distance. One row in ten chains a second row right behind
/// it, front-loading the density the player is about to run into.
fn fill_spawn_horizon(state: &mut GameState) {
    let mut rows = 0;
    while state.last_spawn_z < state.player.z + state.tuning.spawn_horizon
        && rows < MAX_ROWS_PER_FRAME
    {
        let z = (state.player.z + state.tuning.spawn_lead)
            .max(state.last_spawn_z + spacing_step(state));
        spawn_row(state, z);
        state.last_spawn_z = z;
        rows += 1;

        if state
            .rng
            .random_bool(f64::from(state.tuning.chain_spawn_chance))
        {
            let z = state.last_spawn_z + spacing_step(state);
            spawn_row(state, z);
            state.last_spawn_z = z;
            rows += 1;
        }
    }
}

fn spacing_step(state: &mut GameState) -> f32 {
    let min_spacing = state.tuning.obstacle_min_spacing;
    min_spacing + state.rng.random_range(0.0..=min_spacing)
}
