//! Lane-input arbitration
//!
//! All steering funnels through one gate per ball: a switch can only fire
//! while the cooldown is idle, and every fired switch re-arms it. Discrete
//! sources (keys, agent actions) fire directly; the gaze source reports its
//! direction continuously and must be edge-triggered so a sustained look
//! does not spam switches every frame once the cooldown expires.

use serde::{Deserialize, Serialize};

/// Classified look direction reported by the gaze pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GazeDirection {
    Left,
    #[default]
    Center,
    Right,
}

impl GazeDirection {
    /// Parse a classifier label; anything else is `None`
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Steering signal for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteerSignal {
    /// No input source active this frame
    #[default]
    Idle,
    /// Discrete left/right request (keyboard held keys or an agent action)
    Keys { left: bool, right: bool },
    /// Latest gaze classification, reported persistently while looking
    Gaze(GazeDirection),
}

/// Cooldown gate plus the edge-detection latch for the gaze source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneArbiter {
    /// Seconds remaining before the next switch is allowed
    pub cooldown: f32,
    /// Last direction reported by the gaze source
    pub last_direction: GazeDirection,
    /// Armed on a direction change, cleared when a switch fires; re-armed
    /// whenever the gaze returns to center
    pub command_pending: bool,
}

impl Default for LaneArbiter {
    fn default() -> Self {
        Self {
            cooldown: 0.0,
            last_direction: GazeDirection::Center,
            command_pending: false,
        }
    }
}

impl LaneArbiter {
    /// Count the cooldown toward zero
    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
    }

    /// Reset to the session-start state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resolve this frame's signal into a lane-switch target, if any
    ///
    /// Returns the target lane index and starts the cooldown when a switch
    /// fires. Requests past either edge lane are silently ignored.
    pub fn resolve(
        &mut self,
        signal: &SteerSignal,
        lane_index: usize,
        lane_count: usize,
        cooldown_secs: f32,
    ) -> Option<usize> {
        if self.cooldown > 0.0 {
            return None;
        }

        match *signal {
            SteerSignal::Idle => None,
            SteerSignal::Keys { left, right } => {
                if left && lane_index > 0 {
                    self.cooldown = cooldown_secs;
                    Some(lane_index - 1)
                } else if right && lane_index + 1 < lane_count {
                    self.cooldown = cooldown_secs;
                    Some(lane_index + 1)
                } else {
                    None
                }
            }
            SteerSignal::Gaze(direction) => {
                if direction != self.last_direction {
                    self.command_pending = true;
                    self.last_direction = direction;
                }

                let mut target = None;
                if self.command_pending && direction != GazeDirection::Center {
                    match direction {
                        GazeDirection::Left if lane_index > 0 => {
                            target = Some(lane_index - 1);
                        }
                        GazeDirection::Right if lane_index + 1 < lane_count => {
                            target = Some(lane_index + 1);
                        }
                        _ => {}
                    }
                    if target.is_some() {
                        self.cooldown = cooldown_secs;
                        self.command_pending = false;
                    }
                }

                // Looking back at center re-arms the latch for the next
                // excursion, even toward the same side
                if direction == GazeDirection::Center {
                    self.command_pending = true;
                }

                target
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COOLDOWN: f32 = 0.3;

    #[test]
    fn test_keys_fire_within_bounds() {
        let mut arbiter = LaneArbiter::default();
        let left = SteerSignal::Keys { left: true, right: false };

        assert_eq!(arbiter.resolve(&left, 1, 3, COOLDOWN), Some(0));
        assert_eq!(arbiter.cooldown, COOLDOWN);

        // Cooldown blocks an immediate second switch
        assert_eq!(arbiter.resolve(&left, 0, 3, COOLDOWN), None);
    }

    #[test]
    fn test_edge_lane_request_silently_ignored() {
        let mut arbiter = LaneArbiter::default();
        let left = SteerSignal::Keys { left: true, right: false };
        let right = SteerSignal::Keys { left: false, right: true };

        assert_eq!(arbiter.resolve(&left, 0, 3, COOLDOWN), None);
        // No cooldown consumed by a rejected request
        assert_eq!(arbiter.cooldown, 0.0);
        assert_eq!(arbiter.resolve(&right, 2, 3, COOLDOWN), None);
    }

    #[test]
    fn test_sustained_gaze_fires_once() {
        let mut arbiter = LaneArbiter::default();
        let look_left = SteerSignal::Gaze(GazeDirection::Left);

        // Three consecutive frames of "left" with the cooldown expiring
        // between them produce exactly one switch
        assert_eq!(arbiter.resolve(&look_left, 2, 5, COOLDOWN), Some(1));
        arbiter.tick_cooldown(0.4);
        assert_eq!(arbiter.resolve(&look_left, 1, 5, COOLDOWN), None);
        arbiter.tick_cooldown(0.4);
        assert_eq!(arbiter.resolve(&look_left, 1, 5, COOLDOWN), None);
    }

    #[test]
    fn test_center_rearms_gaze_latch() {
        let mut arbiter = LaneArbiter::default();
        let look_left = SteerSignal::Gaze(GazeDirection::Left);
        let look_center = SteerSignal::Gaze(GazeDirection::Center);

        assert_eq!(arbiter.resolve(&look_left, 2, 5, COOLDOWN), Some(1));
        arbiter.tick_cooldown(0.4);
        assert_eq!(arbiter.resolve(&look_center, 1, 5, COOLDOWN), None);
        // Same direction fires again after the center excursion
        assert_eq!(arbiter.resolve(&look_left, 1, 5, COOLDOWN), Some(0));
    }

    #[test]
    fn test_direct_left_right_transition_fires() {
        let mut arbiter = LaneArbiter::default();

        assert_eq!(
            arbiter.resolve(&SteerSignal::Gaze(GazeDirection::Left), 2, 5, COOLDOWN),
            Some(1)
        );
        arbiter.tick_cooldown(0.4);
        // Flipping straight to the other side is a fresh edge
        assert_eq!(
            arbiter.resolve(&SteerSignal::Gaze(GazeDirection::Right), 1, 5, COOLDOWN),
            Some(2)
        );
    }

    #[test]
    fn test_gaze_at_edge_lane_keeps_latch() {
        let mut arbiter = LaneArbiter::default();
        let look_left = SteerSignal::Gaze(GazeDirection::Left);

        // Already in the leftmost lane: nothing fires, latch stays armed
        assert_eq!(arbiter.resolve(&look_left, 0, 3, COOLDOWN), None);
        assert!(arbiter.command_pending);
    }

    proptest! {
        /// No two switches from one arbiter ever land within the cooldown
        /// window, regardless of the signal sequence
        #[test]
        fn prop_cooldown_spacing(
            signals in proptest::collection::vec(0u8..6, 1..200),
            dt in 0.01f32..0.1,
        ) {
            let mut arbiter = LaneArbiter::default();
            let mut lane = 2usize;
            let mut elapsed = 0.0f32;
            let mut last_fire: Option<f32> = None;

            for s in signals {
                let signal = match s {
                    0 => SteerSignal::Idle,
                    1 => SteerSignal::Keys { left: true, right: false },
                    2 => SteerSignal::Keys { left: false, right: true },
                    3 => SteerSignal::Gaze(GazeDirection::Left),
                    4 => SteerSignal::Gaze(GazeDirection::Right),
                    _ => SteerSignal::Gaze(GazeDirection::Center),
                };

                arbiter.tick_cooldown(dt);
                elapsed += dt;
                if let Some(target) = arbiter.resolve(&signal, lane, 5, COOLDOWN) {
                    if let Some(prev) = last_fire {
                        prop_assert!(elapsed - prev >= COOLDOWN - 1e-4);
                    }
                    last_fire = Some(elapsed);
                    lane = target;
                }
            }
        }
    }
}
