//! Data-driven game tuning
//!
//! All gameplay numbers live here so a run can be reproduced from a seed
//! plus a tuning file. Persisted as plain JSON next to the binary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Lane x-coordinates, ascending
    pub lanes: Vec<f32>,

    // === Forward motion ===
    /// Forward speed at level 1 (units per second)
    pub base_speed: f32,
    /// Per-level speed multipliers, indexed by `level - 1`
    pub level_speeds: Vec<f32>,
    /// Forward distance per level
    pub level_length: f32,
    pub max_level: u32,

    // === Ball ===
    pub ball_radius: f32,
    pub gravity: f32,
    pub jump_speed: f32,

    // === Lane switching ===
    /// Seconds the x ease-out animation takes
    pub lane_switch_duration: f32,
    /// Seconds between lane switches, shared by all input sources
    pub lane_switch_cooldown: f32,

    // === Obstacles ===
    pub obstacle_min_spacing: f32,
    pub spawn_horizon: f32,
    pub spawn_lead: f32,
    pub chain_spawn_chance: f32,
    pub wall_chance: f32,
    pub wall_min_level: u32,
    pub cleanup_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lanes: LANES.to_vec(),
            base_speed: BASE_SPEED,
            level_speeds: LEVEL_SPEEDS.to_vec(),
            level_length: LEVEL_LENGTH,
            max_level: MAX_LEVEL,
            ball_radius: BALL_RADIUS,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            lane_switch_duration: LANE_SWITCH_DURATION,
            lane_switch_cooldown: LANE_SWITCH_COOLDOWN,
            obstacle_min_spacing: OBSTACLE_MIN_SPACING,
            spawn_horizon: SPAWN_HORIZON,
            spawn_lead: SPAWN_LEAD,
            chain_spawn_chance: CHAIN_SPAWN_CHANCE,
            wall_chance: WALL_CHANCE,
            wall_min_level: WALL_MIN_LEVEL,
            cleanup_margin: CLEANUP_MARGIN,
        }
    }
}

impl Tuning {
    /// Speed multiplier for a level, clamping out-of-range lookups to the
    /// table edges
    pub fn speed_multiplier(&self, level: u32) -> f32 {
        if self.level_speeds.is_empty() {
            return 1.0;
        }
        let idx = (level.max(1) as usize - 1).min(self.level_speeds.len() - 1);
        self.level_speeds[idx]
    }

    /// Effective forward speed at a level
    pub fn current_speed(&self, level: u32) -> f32 {
        self.base_speed * self.speed_multiplier(level)
    }

    /// Per-lane chance of a normal obstacle at a level, capped at 1.0
    pub fn spawn_probability(&self, level: u32) -> f64 {
        (0.5 + f64::from(level.saturating_sub(1)) * 0.1).min(1.0)
    }

    /// Index of the starting lane
    pub fn middle_lane(&self) -> usize {
        self.lanes.len() / 2
    }

    /// Load tuning from a JSON file, falling back to defaults if the file
    /// is missing or malformed
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Save tuning to a JSON file
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_multiplier_clamps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_multiplier(0), 1.0);
        assert_eq!(tuning.speed_multiplier(1), 1.0);
        assert_eq!(tuning.speed_multiplier(5), 1.8);
        // Out-of-range levels clamp to the last table entry
        assert_eq!(tuning.speed_multiplier(99), 1.8);
    }

    #[test]
    fn test_spawn_probability_curve() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_probability(1) - 0.5).abs() < 1e-9);
        assert!((tuning.spawn_probability(5) - 0.9).abs() < 1e-9);
        // Hypothetical level 6+ caps at certainty
        assert_eq!(tuning.spawn_probability(7), 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lanes, tuning.lanes);
        assert_eq!(back.max_level, tuning.max_level);
        assert_eq!(back.level_speeds, tuning.level_speeds);
    }
}
