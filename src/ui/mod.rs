// UI module for the wavefront array simulator
//
// This module organizes the UI into separate components:
// - `top_panel`: Top metrics and controls panel
// - `right_panel`: Sensor inspector table
// - `map`: Central map display with the wavefront, sensors and overlays
// - `app_state`: Application state management and main update loop

pub mod app_state;
pub mod map;
pub mod right_panel;
pub mod top_panel;

use crate::simulation::Point;

pub use app_state::AppState;

/// A persistent overlay shape, resolved from a simulator event into world
/// coordinates when it fires. Shapes accumulate in `AppState` and are drawn
/// every frame until the process ends; they are never re-emitted.
#[derive(Debug, Clone)]
pub enum OverlayShape {
    /// Translucent triangle over two sensors and the source.
    Triangle { points: [Point; 3] },
    /// Dashed circle around a sensor with its source distance as radius.
    RangeCircle { center: Point, radius: f64 },
    /// Final localized-source marker at the source position.
    SourceMarker { position: Point },
}
