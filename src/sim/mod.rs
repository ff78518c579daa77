//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - One `tick` per frame, components updated in a fixed order
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod level;
pub mod observe;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{player_hits_obstacle, retire_passed_obstacles, sphere_box_overlap};
pub use input::{GazeDirection, LaneArbiter, SteerSignal};
pub use level::LevelState;
pub use observe::{
    ActionSource, AgentAction, Observation, ObstacleSlot, ScriptedSource, agent_observation,
};
pub use physics::{apply_gravity, ease_out_expo};
pub use spawn::{NORMAL_SCALE, OBSTACLE_Y, WALL_SCALE, spawn_row};
pub use state::{AiRun, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, tick};
