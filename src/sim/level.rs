//! Distance-gated level progression
//!
//! A one-way state machine over `1..=max_level`. The threshold advances by
//! one level length per promotion; at the terminal level further distance
//! changes nothing.

use serde::{Deserialize, Serialize};

/// Current level and the z that promotes to the next one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelState {
    pub current_level: u32,
    pub next_level_z: f32,
}

impl LevelState {
    pub fn new(level_length: f32) -> Self {
        Self {
            current_level: 1,
            next_level_z: level_length,
        }
    }

    /// Promote if the player has crossed the threshold
    ///
    /// Returns the new level on promotion so the caller can notify the UI
    /// sink. At most one promotion per call.
    pub fn check(&mut self, player_z: f32, max_level: u32, level_length: f32) -> Option<u32> {
        if player_z >= self.next_level_z && self.current_level < max_level {
            self.current_level += 1;
            self.next_level_z += level_length;
            Some(self.current_level)
        } else {
            None
        }
    }
}
