//! Last-write-wins gaze direction slot
//!
//! The classifier thread publishes whole direction values; the frame loop
//! reads a snapshot once per tick without blocking. Only the latest value
//! matters, so a single atomic cell replaces any queue. A slot nobody
//! writes to reads `Center` forever, which degrades cleanly to keyboard
//! play when the tracker is unavailable.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::sim::GazeDirection;

const CENTER: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;

fn encode(direction: GazeDirection) -> u8 {
    match direction {
        GazeDirection::Center => CENTER,
        GazeDirection::Left => LEFT,
        GazeDirection::Right => RIGHT,
    }
}

fn decode(raw: u8) -> GazeDirection {
    match raw {
        LEFT => GazeDirection::Left,
        RIGHT => GazeDirection::Right,
        _ => GazeDirection::Center,
    }
}

/// Reader half of the slot, owned by the frame loop
#[derive(Debug, Clone, Default)]
pub struct DirectionSlot {
    cell: Arc<AtomicU8>,
}

impl DirectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer half for the capture thread
    pub fn publisher(&self) -> DirectionPublisher {
        DirectionPublisher {
            cell: Arc::clone(&self.cell),
        }
    }

    /// Snapshot of the latest published direction
    pub fn read(&self) -> GazeDirection {
        decode(self.cell.load(Ordering::Relaxed))
    }
}

/// Writer half of the slot
#[derive(Debug, Clone)]
pub struct DirectionPublisher {
    cell: Arc<AtomicU8>,
}

impl DirectionPublisher {
    /// Store a direction wholesale, replacing whatever was there
    pub fn publish(&self, direction: GazeDirection) {
        self.cell.store(encode(direction), Ordering::Relaxed);
    }

    /// Publish a raw classifier label
    ///
    /// Unknown labels leave the previous value in place.
    pub fn publish_label(&self, label: &str) {
        match GazeDirection::from_label(label) {
            Some(direction) => self.publish(direction),
            None => log::warn!("ignoring unknown gaze label {:?}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_slot_reads_center() {
        let slot = DirectionSlot::new();
        assert_eq!(slot.read(), GazeDirection::Center);
    }

    #[test]
    fn test_last_write_wins() {
        let slot = DirectionSlot::new();
        let publisher = slot.publisher();

        publisher.publish(GazeDirection::Left);
        publisher.publish(GazeDirection::Right);
        assert_eq!(slot.read(), GazeDirection::Right);

        // Reads are non-destructive
        assert_eq!(slot.read(), GazeDirection::Right);
    }

    #[test]
    fn test_labels_round_trip() {
        let slot = DirectionSlot::new();
        let publisher = slot.publisher();

        publisher.publish_label("left");
        assert_eq!(slot.read(), GazeDirection::Left);
        publisher.publish_label("center");
        assert_eq!(slot.read(), GazeDirection::Center);
        publisher.publish_label("right");
        assert_eq!(slot.read(), GazeDirection::Right);
    }

    #[test]
    fn test_unknown_label_keeps_previous_value() {
        let slot = DirectionSlot::new();
        let publisher = slot.publisher();

        publisher.publish_label("left");
        publisher.publish_label("blinking");
        assert_eq!(slot.read(), GazeDirection::Left);
    }

    #[test]
    fn test_publish_from_another_thread() {
        let slot = DirectionSlot::new();
        let publisher = slot.publisher();

        let handle = std::thread::spawn(move || {
            publisher.publish(GazeDirection::Right);
        });
        handle.join().unwrap();
        assert_eq!(slot.read(), GazeDirection::Right);
    }
}
