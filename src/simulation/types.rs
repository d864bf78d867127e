//! Type definitions for the wavefront simulation.
//!
//! Contains the data structures shared between the simulator core and the UI:
//! - Geometry primitives (points)
//! - Sensor state (position plus derived distance/arrival time)
//! - Overlay events and the emission stage latch
//! - Per-frame simulation results

use serde::Deserialize;

/// Simple 2D point in world units.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A fixed-position receiver (microphone).
///
/// `distance` and `arrival_time` are derived once from the immutable sensor
/// and source positions when the simulator is built, and never recomputed.
#[derive(Debug, Clone)]
pub struct Sensor {
    /// Position in world units.
    pub position: Point,
    /// Euclidean distance from the source (world units).
    pub distance: f64,
    /// Time the wavefront needs to reach this sensor (seconds): distance / speed.
    pub arrival_time: f64,
}

/// A one-time geometric shape emitted for display once its threshold
/// condition is met. Sensor indices refer to the simulator's sensor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Triangle over {sensor_i, sensor_j, source} for the pair (i, j), i < j.
    Triangle { i: usize, j: usize },
    /// Range circle around the given sensor with its source distance as radius.
    RangeCircle(usize),
    /// Final "localized source" marker at the source position.
    LocalizedSource,
}

/// Latch controlling one-time overlay emission.
///
/// Transitions exactly once along `NotStarted -> EmittingPairs -> Done`;
/// once `Done`, the simulator emits no further events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmissionStage {
    /// Not every sensor has been reached yet.
    #[default]
    NotStarted,
    /// All sensors reached; pair overlays are being released as their
    /// margin thresholds clear.
    EmittingPairs,
    /// The localized-source marker has fired; nothing more to emit.
    Done,
}

impl EmissionStage {
    /// Short human-readable stage name for the metrics panel.
    pub fn label(&self) -> &'static str {
        match self {
            EmissionStage::NotStarted => "propagating",
            EmissionStage::EmittingPairs => "triangulating",
            EmissionStage::Done => "done",
        }
    }
}

/// Result of a single `advance(t)` call.
#[derive(Debug, Clone)]
pub struct FrameResult {
    /// Elapsed time this frame was sampled at (seconds).
    pub t: f64,
    /// Current wavefront radius: speed * t (world units).
    pub radius: f64,
    /// Per-sensor reached flags, indexed like the simulator's sensor list.
    pub reached: Vec<bool>,
    /// Overlay events that fired on this frame, in emission order.
    /// Empty on most frames and forever once the stage is `Done`.
    pub events: Vec<OverlayEvent>,
}
