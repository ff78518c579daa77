//! Agent observation extraction and the action-source boundary
//!
//! The external policy is a black box behind [`ActionSource`]: the
//! simulation hands it a fixed 10-float observation and gets back one
//! discrete action. How the policy is trained or serialized is not this
//! crate's concern, and tests swap in a scripted source.

use std::collections::VecDeque;

use super::state::{GameState, Obstacle, Player};

/// One observed obstacle ahead of the agent ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSlot {
    /// Forward distance from the ball to the obstacle center
    pub distance: f32,
    /// Lane index as a float, -1 when the slot is empty
    pub lane: f32,
    /// Obstacle height (the y extent)
    pub height: f32,
}

/// Filler for slots with no obstacle ahead
pub const ABSENT_SLOT: ObstacleSlot = ObstacleSlot {
    distance: 100.0,
    lane: -1.0,
    height: 0.0,
};

/// Fixed-shape observation fed to the external policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub lane_index: f32,
    pub y: f32,
    pub y_velocity: f32,
    /// The two nearest obstacles strictly ahead, nearest first
    pub nearest: [ObstacleSlot; 2],
    pub current_speed: f32,
}

impl Observation {
    /// Build the observation for one ball against the live obstacle set
    pub fn capture(
        player: &Player,
        obstacles: &[Obstacle],
        lanes: &[f32],
        current_speed: f32,
    ) -> Self {
        let mut ahead: Vec<&Obstacle> = obstacles
            .iter()
            .filter(|o| o.position.z > player.z)
            .collect();
        ahead.sort_by(|a, b| {
            a.position
                .z
                .partial_cmp(&b.position.z)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut nearest = [ABSENT_SLOT; 2];
        for (slot, obstacle) in nearest.iter_mut().zip(&ahead) {
            let lane = lanes
                .iter()
                .position(|&lane_x| lane_x == obstacle.position.x)
                .map_or(-1.0, |idx| idx as f32);
            *slot = ObstacleSlot {
                distance: obstacle.position.z - player.z,
                lane,
                height: obstacle.scale.y,
            };
        }

        Self {
            lane_index: player.lane_index as f32,
            y: player.y,
            y_velocity: player.y_velocity,
            nearest,
            current_speed,
        }
    }

    /// Flatten into the wire layout the policy was trained against
    pub fn as_array(&self) -> [f32; 10] {
        let [first, second] = self.nearest;
        [
            self.lane_index,
            self.y,
            self.y_velocity,
            first.distance,
            first.lane,
            first.height,
            second.distance,
            second.lane,
            second.height,
            self.current_speed,
        ]
    }
}

/// Observation for the agent ball, `None` while no agent run is active
pub fn agent_observation(state: &GameState) -> Option<Observation> {
    state.ai.as_ref().filter(|ai| ai.active).map(|ai| {
        Observation::capture(
            &ai.player,
            &state.obstacles,
            &state.tuning.lanes,
            state.current_speed(),
        )
    })
}

/// Discrete agent action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentAction {
    #[default]
    None,
    Left,
    Right,
    Jump,
}

impl AgentAction {
    /// Decode the policy's raw action index; unknown values are `None`
    pub fn from_index(index: u32) -> Self {
        match index {
            1 => Self::Left,
            2 => Self::Right,
            3 => Self::Jump,
            _ => Self::None,
        }
    }
}

/// Black-box action source driving the agent ball
pub trait ActionSource {
    fn predict(&mut self, observation: &Observation) -> AgentAction;
}

impl<F> ActionSource for F
where
    F: FnMut(&Observation) -> AgentAction,
{
    fn predict(&mut self, observation: &Observation) -> AgentAction {
        self(observation)
    }
}

/// Replays a fixed action sequence, then idles
///
/// The deterministic stand-in for model serving in tests and demos.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    actions: VecDeque<AgentAction>,
}

impl ScriptedSource {
    pub fn new(actions: impl IntoIterator<Item = AgentAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }
}

impl ActionSource for ScriptedSource {
    fn predict(&mut self, _observation: &Observation) -> AgentAction {
        self.actions.pop_front().unwrap_or_default()
    }
}
