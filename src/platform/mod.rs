//! Platform glue
//!
//! The gaze capture pipeline runs on its own thread and only ever hands
//! the simulation the latest classified direction; `gaze` holds the
//! single-slot cell the two sides share.

pub mod gaze;

pub use gaze::{DirectionPublisher, DirectionSlot};
