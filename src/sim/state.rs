//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one explicit [`GameState`] value:
//! no module-level statics, so runs are reproducible from a seed and a
//! tuning block and the whole state can be snapshotted as JSON.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::LaneArbiter;
use super::level::LevelState;
use super::physics::{apply_gravity, ease_out_expo};
use crate::consts::GROUND_EPS;
use crate::settings::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended by a collision; awaiting an explicit restart
    GameOver,
}

/// Notifications for the rendering/UI sink, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Level promotion with the percentage speed increase over level 1 pace
    LevelUp { level: u32, speed_bonus_pct: i32 },
    /// The human ball hit an obstacle; score is frozen at this value
    GameOver { score: f32 },
    /// The agent ball hit an obstacle; the human run is unaffected
    AiRunOver { score: f32 },
}

/// In-flight lane-switch animation of the visual x coordinate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LaneTween {
    from_x: f32,
    to_x: f32,
    elapsed: f32,
    duration: f32,
}

/// A rolling ball (human- or agent-controlled)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Logical lane membership; authoritative for collision and observation
    pub lane_index: usize,
    /// Visual x, easing toward the current lane's coordinate
    pub x: f32,
    /// Height above the track, never negative
    pub y: f32,
    pub y_velocity: f32,
    /// Forward distance, monotonically non-decreasing
    pub z: f32,
    pub jumping: bool,
    /// Cosmetic rolling angle in degrees; not consumed by the simulation
    pub roll_deg: f32,
    tween: Option<LaneTween>,
}

impl Player {
    /// Create a ball in the middle lane at the start line
    pub fn new(lanes: &[f32]) -> Self {
        let lane_index = lanes.len() / 2;
        Self {
            lane_index,
            x: lanes.get(lane_index).copied().unwrap_or(0.0),
            y: 0.0,
            y_velocity: 0.0,
            z: 0.0,
            jumping: false,
            roll_deg: 0.0,
            tween: None,
        }
    }

    /// Advance forward motion, the rolling angle and any lane tween
    pub fn advance(&mut self, dt: f32, speed: f32, radius: f32) {
        let distance_moved = speed * dt;
        self.z += distance_moved;
        if radius > 0.0 {
            self.roll_deg += (distance_moved / radius).to_degrees();
        }

        let mut settled = false;
        if let Some(tween) = self.tween.as_mut() {
            tween.elapsed += dt;
            let t = if tween.duration > 0.0 {
                (tween.elapsed / tween.duration).min(1.0)
            } else {
                1.0
            };
            self.x = tween.from_x + (tween.to_x - tween.from_x) * ease_out_expo(t);
            settled = t >= 1.0;
        }
        if settled {
            self.tween = None;
        }
    }

    /// Switch to a lane: membership changes instantly, x catches up over
    /// `duration` seconds with an ease-out curve
    ///
    /// Callers guarantee `target` is a valid lane index; the arbiter has
    /// already rejected out-of-range requests.
    pub fn switch_lane(&mut self, target: usize, lanes: &[f32], duration: f32) {
        self.lane_index = target;
        let to_x = lanes[target];
        if duration > 0.0 {
            self.tween = Some(LaneTween {
                from_x: self.x,
                to_x,
                elapsed: 0.0,
                duration,
            });
        } else {
            self.x = to_x;
            self.tween = None;
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.y <= GROUND_EPS
    }

    /// Leave the ground, if currently on it
    pub fn start_jump(&mut self, jump_speed: f32) {
        if self.is_grounded() && !self.jumping {
            self.jumping = true;
            self.y_velocity = jump_speed;
        }
    }

    /// Integrate the vertical axis for one frame
    ///
    /// Clamps y to the ground and zeroes the velocity exactly on contact.
    pub fn integrate_vertical(&mut self, gravity: f32, dt: f32) {
        if self.jumping {
            self.y += self.y_velocity * dt;
            self.y_velocity = apply_gravity(self.y_velocity, gravity, dt);
            if self.y <= 0.0 && self.y_velocity < 0.0 {
                self.y = 0.0;
                self.y_velocity = 0.0;
                self.jumping = false;
            }
        }
        if self.y < 0.0 {
            self.y = 0.0;
        }
    }

    /// Collision center: the logical lane coordinate, not the animated x
    pub fn collision_center(&self, lanes: &[f32]) -> Vec3 {
        Vec3::new(lanes[self.lane_index], self.y, self.z)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Blocks one lane; dodge by switching lanes
    Normal,
    /// Part of a full-lane row; passable only by jumping
    Wall,
}

/// A lane obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Center position; x is always one of the configured lane coordinates
    pub position: Vec3,
    /// Full extents (width, height, depth)
    pub scale: Vec3,
    pub kind: ObstacleKind,
}

impl Obstacle {
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.scale * 0.5
    }
}

/// The agent-controlled second ball sharing the obstacle set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiRun {
    pub player: Player,
    pub arbiter: LaneArbiter,
    pub score: f32,
    /// Cleared on an agent collision, independently of the human run
    pub active: bool,
}

impl AiRun {
    pub fn new(lanes: &[f32]) -> Self {
        Self {
            player: Player::new(lanes),
            arbiter: LaneArbiter::default(),
            score: 0.0,
            active: true,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG driving obstacle placement
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Optional agent ball; `None` when no action source is attached
    pub ai: Option<AiRun>,
    pub arbiter: LaneArbiter,
    /// Live obstacles, ahead of or shortly behind the player
    pub obstacles: Vec<Obstacle>,
    /// Furthest z a row has been spawned at
    pub last_spawn_z: f32,
    pub level: LevelState,
    /// Seconds survived this run
    pub score: f32,
    /// This frame's notifications, drained by the embedder
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and tuning
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(&tuning.lanes);
        let level = LevelState::new(tuning.level_length);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player,
            ai: None,
            arbiter: LaneArbiter::default(),
            obstacles: Vec::new(),
            last_spawn_z: 0.0,
            level,
            score: 0.0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Attach an agent-controlled second ball
    pub fn enable_ai_run(&mut self) {
        self.ai = Some(AiRun::new(&self.tuning.lanes));
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Effective forward speed at the current level
    pub fn current_speed(&self) -> f32 {
        self.tuning.current_speed(self.level.current_level)
    }

    /// Explicit full reset back to the start of a run
    ///
    /// Obstacles, scores, cooldowns, level and both balls return to their
    /// initial values; the RNG stream continues so back-to-back runs on one
    /// seed differ while the session as a whole stays reproducible.
    pub fn reset_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.player = Player::new(&self.tuning.lanes);
        if let Some(ai) = self.ai.as_mut() {
            *ai = AiRun::new(&self.tuning.lanes);
        }
        self.arbiter.reset();
        self.obstacles.clear();
        self.last_spawn_z = 0.0;
        self.level = LevelState::new(self.tuning.level_length);
        self.score = 0.0;
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn lanes() -> Vec<f32> {
        vec![-2.0, 0.0, 2.0]
    }

    #[test]
    fn test_player_starts_in_middle_lane() {
        let player = Player::new(&lanes());
        assert_eq!(player.lane_index, 1);
        assert_eq!(player.x, 0.0);
        assert_eq!(player.z, 0.0);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_advance_moves_forward_and_rolls() {
        let mut player = Player::new(&lanes());
        player.advance(0.5, 5.0, 0.25);
        assert_eq!(player.z, 2.5);
        // 2.5 units over a 0.25 radius is 10 radians of roll
        assert!((player.roll_deg - 10f32.to_degrees()).abs() < 1e-3);
    }

    #[test]
    fn test_switch_lane_is_logically_instant() {
        let lanes = lanes();
        let mut player = Player::new(&lanes);
        player.switch_lane(0, &lanes, 0.2);

        // Membership flips immediately; the visual x lags behind
        assert_eq!(player.lane_index, 0);
        assert_eq!(player.x, 0.0);
        assert_eq!(player.collision_center(&lanes).x, -2.0);

        // Ease-out: most of the distance is covered early
        player.advance(0.05, 0.0, 0.25);
        assert!(player.x < -0.5);
        // Fully settled after the duration elapses
        player.advance(0.2, 0.0, 0.25);
        assert_eq!(player.x, -2.0);
    }

    #[test]
    fn test_zero_duration_switch_snaps() {
        let lanes = lanes();
        let mut player = Player::new(&lanes);
        player.switch_lane(2, &lanes, 0.0);
        assert_eq!(player.x, 2.0);
    }

    #[test]
    fn test_jump_lands_with_zero_velocity() {
        let mut player = Player::new(&lanes());
        player.start_jump(5.0);
        assert!(player.jumping);

        let mut peak = 0.0f32;
        for _ in 0..300 {
            player.integrate_vertical(9.8, SIM_DT);
            peak = peak.max(player.y);
            assert!(player.y >= 0.0);
        }
        assert!(!player.jumping);
        assert_eq!(player.y, 0.0);
        assert_eq!(player.y_velocity, 0.0);
        // v^2 / 2g, plus a little explicit-Euler overshoot
        assert!(peak > 1.2 && peak < 1.4);
    }

    #[test]
    fn test_jump_requires_ground_contact() {
        let mut player = Player::new(&lanes());
        player.start_jump(5.0);
        player.integrate_vertical(9.8, SIM_DT);
        let v = player.y_velocity;
        // Mid-air jump requests change nothing
        player.start_jump(5.0);
        assert_eq!(player.y_velocity, v);
    }

    #[test]
    fn test_reset_run_restores_initial_state() {
        let mut state = GameState::new(7, Tuning::default());
        state.enable_ai_run();
        state.score = 42.0;
        state.phase = GamePhase::GameOver;
        state.player.z = 500.0;
        state.level.current_level = 3;
        let obstacle_id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: obstacle_id,
            position: Vec3::new(0.0, 0.5, 50.0),
            scale: Vec3::new(1.5, 1.3, 0.5),
            kind: ObstacleKind::Normal,
        });

        state.reset_run();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.player.z, 0.0);
        assert_eq!(state.level.current_level, 1);
        assert!(state.obstacles.is_empty());
        assert!(state.ai.as_ref().is_some_and(|ai| ai.active && ai.score == 0.0));
    }

    #[test]
    fn test_state_snapshot_round_trip() {
        let mut state = GameState::new(123, Tuning::default());
        state.player.z = 77.5;
        state.score = 12.25;

        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.player.z, state.player.z);
        assert_eq!(back.score, state.score);
        assert_eq!(back.seed, state.seed);
    }

    proptest! {
        /// The ball never sinks below the track, whatever the jump/update
        /// interleaving
        #[test]
        fn prop_y_never_negative(
            actions in proptest::collection::vec(any::<bool>(), 1..400),
            dt in 0.001f32..0.1,
        ) {
            let mut player = Player::new(&lanes());
            for jump in actions {
                if jump {
                    player.start_jump(5.0);
                }
                player.integrate_vertical(9.8, dt);
                prop_assert!(player.y >= 0.0);
                if player.is_grounded() && !player.jumping {
                    prop_assert_eq!(player.y_velocity, 0.0);
                }
            }
        }
    }
}
