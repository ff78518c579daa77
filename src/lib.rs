//! Gaze Runner - a lane-based endless runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, game state)
//! - `platform`: Glue to external input sources (gaze capture thread)
//! - `settings`: Data-driven game tuning
//! - `highscores`: Local leaderboard

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Tuning;

/// Game configuration constants (defaults consumed by `Tuning::default`)
pub mod consts {
    /// Simulation timestep used by the headless demo and tests (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Lane x-coordinates the ball can occupy
    pub const LANES: [f32; 3] = [-2.0, 0.0, 2.0];

    /// Forward speed at level 1 (units per second)
    pub const BASE_SPEED: f32 = 5.0;
    /// Per-level speed multipliers, indexed by `level - 1`
    pub const LEVEL_SPEEDS: [f32; 5] = [1.0, 1.2, 1.4, 1.6, 1.8];
    /// Forward distance per level
    pub const LEVEL_LENGTH: f32 = 300.0;
    pub const MAX_LEVEL: u32 = 5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.25;
    /// Upward velocity imparted by a jump; sized so walls (top at 0.9) are
    /// clearable in the air while normal obstacles (top at 1.15) are not
    pub const JUMP_SPEED: f32 = 5.0;
    pub const GRAVITY: f32 = 9.8;
    /// The ball counts as grounded at or below this height
    pub const GROUND_EPS: f32 = 0.01;

    /// Lane switching
    pub const LANE_SWITCH_DURATION: f32 = 0.2;
    pub const LANE_SWITCH_COOLDOWN: f32 = 0.3;

    /// Obstacle spawning
    pub const OBSTACLE_MIN_SPACING: f32 = 5.0;
    /// Spawn more obstacles once the furthest row is this close to the player
    pub const SPAWN_HORIZON: f32 = 60.0;
    /// Minimum forward offset of a fresh row from the player
    pub const SPAWN_LEAD: f32 = 40.0;
    /// Chance of chaining a second row right behind a fresh one
    pub const CHAIN_SPAWN_CHANCE: f32 = 0.1;
    /// Chance of a full-lane wall row (from `WALL_MIN_LEVEL` on)
    pub const WALL_CHANCE: f32 = 0.2;
    pub const WALL_MIN_LEVEL: u32 = 3;
    /// Obstacles further than this behind the player are retired
    pub const CLEANUP_MARGIN: f32 = 10.0;
}
