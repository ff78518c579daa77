//! Collision detection and obstacle lifecycle
//!
//! The overlap test is three independent strict axis checks against the
//! ball's logical lane coordinate. All three must overlap for a hit, and
//! exact edge touching on any axis is a miss.

use glam::Vec3;

use super::state::{Obstacle, Player};

/// Sphere-vs-box overlap via per-axis interval checks
///
/// Strict inequalities throughout: a sphere and box exactly touching on an
/// axis do not overlap.
#[inline]
pub fn sphere_box_overlap(center: Vec3, radius: f32, box_center: Vec3, box_half: Vec3) -> bool {
    // Lane axis
    let x_overlap = (box_center.x - center.x).abs() < box_half.x + radius;

    // Height axis: interval overlap of the two vertical spans
    let bottom = center.y - radius;
    let top = center.y + radius;
    let box_bottom = box_center.y - box_half.y;
    let box_top = box_center.y + box_half.y;
    let y_overlap = bottom < box_top && top > box_bottom;

    // Depth axis
    let z_overlap = (box_center.z - center.z).abs() < box_half.z + radius;

    x_overlap && y_overlap && z_overlap
}

/// Check a ball against one obstacle
pub fn player_hits_obstacle(
    player: &Player,
    lanes: &[f32],
    radius: f32,
    obstacle: &Obstacle,
) -> bool {
    sphere_box_overlap(
        player.collision_center(lanes),
        radius,
        obstacle.position,
        obstacle.half_extents(),
    )
}

/// Drop obstacles that have fallen more than `margin` behind the player
///
/// Unconditional cleanup, independent of any collision outcome. Returns
/// how many were retired.
pub fn retire_passed_obstacles(
    obstacles: &mut Vec<Obstacle>,
    player_z: f32,
    margin: f32,
) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| o.position.z >= player_z - margin);
    before - obstacles.len()
}
