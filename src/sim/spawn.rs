//! Procedural obstacle placement
//!
//! One call spawns one "row": a set of obstacles sharing a z coordinate.
//! Every non-wall row keeps at least one lane open; wall rows block every
//! lane at once and are passable only by jumping.

use glam::Vec3;
use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};

/// Normal obstacle extents (width, height, depth)
pub const NORMAL_SCALE: Vec3 = Vec3::new(1.5, 1.3, 0.5);
/// Wall obstacle extents; low enough to clear in the air
pub const WALL_SCALE: Vec3 = Vec3::new(1.5, 0.8, 0.5);
/// Obstacle center height above the track
pub const OBSTACLE_Y: f32 = 0.5;

/// Spawn a row of obstacles at the given z
///
/// Picks a random open lane first, then either fires the wall case (full
/// game levels only, 20% of rows) or rolls each remaining lane against the
/// level-gated probability curve. A row may come out empty on a run of
/// cold rolls; the horizon policy will simply spawn again.
pub fn spawn_row(state: &mut GameState, z: f32) {
    // Clone the lane table so entity allocation below can borrow state
    let lanes = state.tuning.lanes.clone();
    if lanes.is_empty() {
        return;
    }
    let level = state.level.current_level;

    let open_lane = state.rng.random_range(0..lanes.len());

    // Full-lane walls from level 3 on; the only case with no open lane
    if level >= state.tuning.wall_min_level
        && state.rng.random_bool(f64::from(state.tuning.wall_chance))
    {
        for &lane_x in &lanes {
            let id = state.next_entity_id();
            state.obstacles.push(Obstacle {
                id,
                position: Vec3::new(lane_x, OBSTACLE_Y, z),
                scale: WALL_SCALE,
                kind: ObstacleKind::Wall,
            });
        }
        log::debug!("wall row at z {:.1}", z);
        return;
    }

    let p = state.tuning.spawn_probability(level);
    for (idx, &lane_x) in lanes.iter().enumerate() {
        if idx == open_lane {
            continue;
        }
        if state.rng.random_bool(p) {
            let id = state.next_entity_id();
            state.obstacles.push(Obstacle {
                id,
                position: Vec3::new(lane_x, OBSTACLE_Y, z),
                scale: NORMAL_SCALE,
                kind: ObstacleKind::Normal,
            });
        }
    }
}
