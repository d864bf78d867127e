//! Wavefront simulation core module.
//!
//! Display-agnostic simulation of an acoustic wavefront expanding from a
//! point source toward a ring of microphones, plus the staged triangulation
//! overlay emitted once every microphone has been reached.
//!
//! ## Module Organization
//!
//! - `types`: Core data structures (points, sensors, overlay events, frame results)
//! - `geometry`: Distance and circle parametrization helpers
//! - `simulator`: The `ArrivalSimulator` state machine
//!
//! ## Public API
//!
//! The main entry point is `ArrivalSimulator::advance(t)`, sampled by the UI
//! frame loop at fixed time steps. The simulator owns no timing and performs
//! no rendering.

pub mod geometry;
pub mod simulator;
pub mod types;

pub use simulator::ArrivalSimulator;
pub use types::{EmissionStage, FrameResult, OverlayEvent, Point, Sensor};
