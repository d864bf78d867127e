//! # Central Map Visualization
//!
//! Renders the main 2D map view showing:
//! - A grid over the fixed world window
//! - The expanding wavefront as a stroked circle around the source
//! - Sensors as filled circles that change color once reached
//! - The source marker
//! - Persistent triangulation overlays: translucent triangles, dashed range
//!   circles and the final localized-source marker
//!
//! ## Coordinate Mapping
//!
//! World coordinates span a fixed square window (the original demo's plot
//! limits). They are linearly mapped to screen pixels with `egui::lerp`,
//! keeping the drawing area square and centered; the world y axis points up,
//! so it is flipped during mapping.
//!
//! ## Sensor Selection
//!
//! Clicking on the map selects the nearest sensor (squared distance, no
//! sqrt). Clicking the selected sensor again deselects it. The selected
//! sensor gets a translucent range preview, mirroring the inspector table.

use eframe::egui;
use egui::Color32;

use crate::simulation::geometry;
use crate::simulation::types::Point;
use crate::ui::{AppState, OverlayShape};

/// World window edges (world units), matching the original plot limits.
const WORLD_MIN: f64 = -5.0;
const WORLD_MAX: f64 = 5.0;

/// Line segments used to approximate circles drawn as polylines.
const CIRCLE_SEGMENTS: usize = 200;

/// Render the central map panel.
///
/// # Parameters
///
/// * `ctx` - egui context for rendering
/// * `state` - Mutable application state for updating selection
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Map");
        ui.separator();

        // Reserve a square drawing area, centered in the available space
        let avail_rect = ui.available_rect_before_wrap();
        let side = avail_rect.width().min(avail_rect.height());
        let x = avail_rect.center().x - side / 2.0;
        let y = avail_rect.center().y - side / 2.0;
        let rect = egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(side, side));
        let response = ui.interact(rect, egui::Id::new("map_canvas"), egui::Sense::click());
        let painter = ui.painter_at(rect);

        // Draw background
        painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

        draw_grid(&painter, rect);

        // Overlays go under the live geometry so sensors stay visible
        draw_overlays(&painter, rect, state);

        draw_wavefront(&painter, rect, state);
        draw_sensors(&painter, rect, state);
        draw_source(&painter, rect, state);

        handle_sensor_selection(&response, rect, state);
    });
}

/// Map a world point into the screen-space map rectangle (y axis flipped).
fn world_to_screen(p: &Point, rect: egui::Rect) -> egui::Pos2 {
    let tx = ((p.x - WORLD_MIN) / (WORLD_MAX - WORLD_MIN)) as f32;
    let ty = ((WORLD_MAX - p.y) / (WORLD_MAX - WORLD_MIN)) as f32;
    egui::pos2(egui::lerp(rect.left()..=rect.right(), tx), egui::lerp(rect.top()..=rect.bottom(), ty))
}

/// Pixels per world unit (the map rectangle is square).
fn units_to_pixels(rect: egui::Rect) -> f32 {
    rect.width() / (WORLD_MAX - WORLD_MIN) as f32
}

/// Draw the coordinate grid: dark blue lines every world unit.
fn draw_grid(painter: &egui::Painter, rect: egui::Rect) {
    let grid_color = Color32::from_rgb(0, 0, 100);
    let grid_stroke = egui::Stroke::new(1.0, grid_color);
    let cells = (WORLD_MAX - WORLD_MIN) as i32;
    for i in 0..=cells {
        let t = i as f32 / cells as f32;
        let x = egui::lerp(rect.left()..=rect.right(), t);
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], grid_stroke);
        let y = egui::lerp(rect.top()..=rect.bottom(), t);
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], grid_stroke);
    }
}

/// Draw the expanding wavefront as a stroked circle around the source.
fn draw_wavefront(painter: &egui::Painter, rect: egui::Rect, state: &AppState) {
    if state.radius <= 0.0 {
        return;
    }
    let center = world_to_screen(&state.simulator.source(), rect);
    let radius_px = state.radius as f32 * units_to_pixels(rect);
    painter.circle_stroke(center, radius_px, egui::Stroke::new(2.0, Color32::from_rgb(40, 120, 255)));
}

/// Draw all sensors; reached sensors switch color, the selected sensor gets
/// a translucent range preview and a highlight ring.
fn draw_sensors(painter: &egui::Painter, rect: egui::Rect, state: &AppState) {
    let radius = 5.0;

    for (index, sensor) in state.simulator.sensors().iter().enumerate() {
        let pos = world_to_screen(&sensor.position, rect);

        let mut color = Color32::LIGHT_GRAY;
        if state.reached.get(index).copied().unwrap_or(false) {
            color = Color32::from_rgb(255, 60, 60);
        }

        if state.selected == Some(index) {
            let range_px = sensor.distance as f32 * units_to_pixels(rect);
            painter.circle_filled(pos, range_px, Color32::from_rgba_unmultiplied(0, 128, 255, 40));
            painter.circle_stroke(pos, radius + 3.0, egui::Stroke::new(1.5, Color32::from_rgb(0, 128, 255)));
        }

        painter.circle_filled(pos, radius, color);

        if state.show_sensor_ids {
            let label_pos = egui::pos2(pos.x + 7.0, pos.y - 7.0);
            painter.text(
                label_pos,
                egui::Align2::LEFT_BOTTOM,
                format!("#{}", index),
                egui::FontId::monospace(12.0),
                Color32::from_rgb(40, 200, 255),
            );
        }
    }
}

/// Draw the acoustic source as a red star-like marker.
fn draw_source(painter: &egui::Painter, rect: egui::Rect, state: &AppState) {
    let pos = world_to_screen(&state.simulator.source(), rect);
    let color = Color32::from_rgb(255, 60, 60);
    let stroke = egui::Stroke::new(2.0, color);
    let r = 6.0;
    painter.line_segment([egui::pos2(pos.x - r, pos.y), egui::pos2(pos.x + r, pos.y)], stroke);
    painter.line_segment([egui::pos2(pos.x, pos.y - r), egui::pos2(pos.x, pos.y + r)], stroke);
    let d = r * 0.7;
    painter.line_segment([egui::pos2(pos.x - d, pos.y - d), egui::pos2(pos.x + d, pos.y + d)], stroke);
    painter.line_segment([egui::pos2(pos.x - d, pos.y + d), egui::pos2(pos.x + d, pos.y - d)], stroke);

    if state.show_sensor_ids {
        painter.text(
            egui::pos2(pos.x + 9.0, pos.y - 9.0),
            egui::Align2::LEFT_BOTTOM,
            "source",
            egui::FontId::monospace(12.0),
            color,
        );
    }
}

/// Draw the persistent triangulation overlays accumulated by the app state.
fn draw_overlays(painter: &egui::Painter, rect: egui::Rect, state: &AppState) {
    for shape in &state.overlay_shapes {
        match shape {
            OverlayShape::Triangle { points } => {
                let screen_points: Vec<egui::Pos2> = points.iter().map(|p| world_to_screen(p, rect)).collect();
                painter.add(egui::Shape::convex_polygon(
                    screen_points,
                    Color32::from_rgba_unmultiplied(255, 255, 0, 50),
                    egui::Stroke::NONE,
                ));
            }
            OverlayShape::RangeCircle { center, radius } => {
                let outline = geometry::circle_outline(center, *radius, CIRCLE_SEGMENTS);
                let screen_points: Vec<egui::Pos2> = outline.iter().map(|p| world_to_screen(p, rect)).collect();
                let stroke = egui::Stroke::new(1.0, Color32::from_rgba_unmultiplied(200, 200, 200, 90));
                painter.extend(egui::Shape::dashed_line(&screen_points, stroke, 6.0, 4.0));
            }
            OverlayShape::SourceMarker { position } => {
                let pos = world_to_screen(position, rect);
                painter.circle_filled(pos, 7.0, Color32::from_rgb(0, 255, 0));
            }
        }
    }
}

/// Handle mouse clicks on the map for sensor selection.
///
/// Finds the nearest sensor to the click position using squared distance.
/// Clicking the selected sensor again deselects it; selection stays in sync
/// with the inspector table.
fn handle_sensor_selection(response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
    if response.clicked() {
        if let Some(click_pos) = response.interact_pointer_pos() {
            let mut best: Option<(usize, f32)> = None;
            for (index, sensor) in state.simulator.sensors().iter().enumerate() {
                let pos = world_to_screen(&sensor.position, rect);
                let d2 = pos.distance_sq(click_pos);
                if best.map_or(true, |(_, bd)| d2 < bd) {
                    best = Some((index, d2));
                }
            }
            let new_selected = best.map(|(index, _)| index);
            if new_selected != state.selected {
                state.selected = new_selected;
            } else {
                state.selected = None;
            }
        }
    }
}
