//! Scene loading, parsing, and validation logic.
//!
//! A scene describes the fixed geometry and pacing of a run: the propagation
//! speed, the microphone layout (a ring by default, or explicit positions),
//! the source position, the overlay emission margins and the frame budget.
//! Scenes are loaded from JSON; every field has a built-in default so the
//! demo also runs without any file present.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::simulation::geometry;
use crate::simulation::types::Point;

/// Error type for scene loading failures.
#[derive(Debug)]
pub enum SceneLoadError {
    FileReadError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::FileReadError(msg) => write!(f, "Failed to read file: {}", msg),
            SceneLoadError::ParseError(msg) => write!(f, "Failed to parse JSON: {}", msg),
            SceneLoadError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Scene configuration, fixed for the lifetime of a run.
///
/// Margins and frame pacing are cosmetic constants carried from the original
/// demo choreography; they are configurable here rather than derived.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Wave propagation speed in world units per second (speed of sound).
    pub propagation_speed: f64,
    /// Number of sensors placed on the ring when no explicit positions are given.
    pub sensor_count: usize,
    /// Radius of the sensor ring around the origin (world units).
    pub ring_radius: f64,
    /// Explicit sensor positions. When present, overrides the ring layout.
    pub sensor_positions: Option<Vec<Point>>,
    /// Position of the acoustic source.
    pub source_position: Point,
    /// Extra radius (world units) the wavefront must clear past both sensors
    /// of a pair before that pair's overlay fires.
    pub pair_margin: f64,
    /// Extra radius (world units) past the farthest sensor before the
    /// localized-source marker fires.
    pub marker_margin: f64,
    /// Total number of animation frames to run.
    pub total_frames: u32,
    /// Frame count the maximum simulated time is divided by to obtain the
    /// per-frame time step.
    pub time_divisor_frames: u32,
    /// Nominal interval between frames (milliseconds).
    pub frame_interval_ms: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            propagation_speed: 343.0,
            sensor_count: 5,
            ring_radius: 1.0,
            sensor_positions: None,
            source_position: Point { x: 2.0, y: 2.0 },
            pair_margin: 0.1,
            marker_margin: 1.0,
            total_frames: 500,
            time_divisor_frames: 200,
            frame_interval_ms: 50,
        }
    }
}

impl SceneConfig {
    /// Load a scene configuration from a JSON file.
    ///
    /// # Returns
    /// * `Ok(SceneConfig)` if the file was read, parsed and validated
    /// * `Err(SceneLoadError)` describing the first failure otherwise
    pub fn load(path: &Path) -> Result<Self, SceneLoadError> {
        let content = fs::read_to_string(path).map_err(|e| SceneLoadError::FileReadError(format!("{}: {}", path.display(), e)))?;

        let config: SceneConfig = serde_json::from_str(&content).map_err(|e| SceneLoadError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulator relies on.
    pub fn validate(&self) -> Result<(), SceneLoadError> {
        if !self.propagation_speed.is_finite() || self.propagation_speed <= 0.0 {
            return Err(SceneLoadError::ValidationError(format!(
                "propagation_speed must be positive and finite, got {}",
                self.propagation_speed
            )));
        }
        if !self.pair_margin.is_finite() || self.pair_margin < 0.0 {
            return Err(SceneLoadError::ValidationError(format!("pair_margin must be non-negative, got {}", self.pair_margin)));
        }
        if !self.marker_margin.is_finite() || self.marker_margin < 0.0 {
            return Err(SceneLoadError::ValidationError(format!("marker_margin must be non-negative, got {}", self.marker_margin)));
        }
        if self.total_frames == 0 {
            return Err(SceneLoadError::ValidationError("total_frames must be at least 1".to_string()));
        }
        if self.time_divisor_frames == 0 {
            return Err(SceneLoadError::ValidationError("time_divisor_frames must be at least 1".to_string()));
        }

        let layout = self.sensor_layout();
        if layout.len() < 2 {
            return Err(SceneLoadError::ValidationError(format!(
                "at least 2 sensors are required for pairwise overlays, got {}",
                layout.len()
            )));
        }
        for (index, position) in layout.iter().enumerate() {
            if !position.x.is_finite() || !position.y.is_finite() {
                return Err(SceneLoadError::ValidationError(format!("sensor #{} has a non-finite position", index)));
            }
            if geometry::distance2(position, &self.source_position) == 0.0 {
                return Err(SceneLoadError::ValidationError(format!(
                    "sensor #{} coincides with the source at ({}, {})",
                    index, self.source_position.x, self.source_position.y
                )));
            }
        }
        Ok(())
    }

    /// Resolve the sensor positions for this scene.
    ///
    /// Explicit positions win; otherwise sensor k of n is placed on the ring
    /// at angle 2πk/n (endpoint excluded) around the origin.
    pub fn sensor_layout(&self) -> Vec<Point> {
        if let Some(positions) = &self.sensor_positions {
            return positions.clone();
        }
        let n = self.sensor_count;
        (0..n)
            .map(|k| {
                let angle = 2.0 * std::f64::consts::PI * (k as f64) / (n as f64);
                Point {
                    x: self.ring_radius * angle.cos(),
                    y: self.ring_radius * angle.sin(),
                }
            })
            .collect()
    }
}
