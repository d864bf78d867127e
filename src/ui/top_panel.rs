//! # Top Panel - Simulation Metrics and Controls
//!
//! Renders the fixed-height top panel displaying:
//! - Column 1: Core metrics (simulated time, wavefront radius, frame index)
//! - Column 2: Detection progress (reached sensors, stage, overlay counts)
//! - Column 3: Controls (restart, sensor id labels)

use eframe::egui;

use crate::simulation::EmissionStage;
use crate::ui::AppState;

/// Render the top panel with metrics and controls.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state for reading metrics and updating controls
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_metrics").exact_height(150.0).show(ctx, |ui| {
        ui.columns(3, |cols| {
            // Column 1: Title + core metrics
            cols[0].vertical(|ui| {
                ui.heading("Wavefront");
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Time:");
                    // Fixed-width monospace time so following labels don't shift
                    let time_str = format!("{:<10}", format!("{:.4} s", state.sim_time));
                    ui.label(egui::RichText::new(time_str).monospace().strong());
                });
                ui.horizontal(|ui| {
                    ui.label("Radius:");
                    ui.label(egui::RichText::new(format!("{:.3}", state.radius)).strong());
                    ui.label("units");
                });
                ui.horizontal(|ui| {
                    ui.label("Speed:");
                    ui.label(egui::RichText::new(format!("{:.1}", state.simulator.speed())).strong());
                    ui.label("units/s");
                });
                ui.horizontal(|ui| {
                    ui.label("Frame:");
                    ui.label(egui::RichText::new(format!("{}/{}", state.frame, state.config.total_frames)).strong());
                });
            });

            // Column 2: Detection progress
            cols[1].vertical(|ui| {
                let reached_count = state.reached.iter().filter(|r| **r).count();

                ui.heading("Detection");
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Sensors reached:");
                    ui.label(egui::RichText::new(format!("{}/{}", reached_count, state.reached.len())).strong());
                });
                ui.horizontal(|ui| {
                    ui.label("Farthest sensor:");
                    ui.label(egui::RichText::new(format!("{:.3}", state.simulator.max_distance())).strong());
                    ui.label("units");
                });
                ui.horizontal(|ui| {
                    ui.label("Stage:");
                    let stage = state.stage();
                    let color = match stage {
                        EmissionStage::NotStarted => egui::Color32::from_rgb(40, 200, 255),
                        EmissionStage::EmittingPairs => egui::Color32::YELLOW,
                        EmissionStage::Done => egui::Color32::from_rgb(0, 255, 0),
                    };
                    ui.label(egui::RichText::new(stage.label()).strong().color(color));
                });
                ui.horizontal(|ui| {
                    ui.label("Overlays:");
                    ui.label(egui::RichText::new(format!("{}", state.triangle_count)).strong());
                    ui.label("triangles,");
                    ui.label(egui::RichText::new(format!("{}", state.circle_count)).strong());
                    ui.label("circles");
                });
                if state.marker_emitted {
                    ui.horizontal(|ui| {
                        ui.label("Source localized at (");
                        let source = state.simulator.source();
                        ui.label(egui::RichText::new(format!("{:.2}", source.x)).strong());
                        ui.label(",");
                        ui.label(egui::RichText::new(format!("{:.2}", source.y)).strong());
                        ui.label(")");
                    });
                }
            });

            // Column 3: Controls
            cols[2].vertical(|ui| {
                ui.heading("Controls");
                ui.separator();
                if ui.button("Restart").clicked() {
                    log::info!("restarting simulation");
                    state.restart();
                    ui.ctx().request_repaint();
                }
                ui.checkbox(&mut state.show_sensor_ids, "Show sensor IDs");
                if !state.running() {
                    ui.separator();
                    ui.label(egui::RichText::new("Frame budget exhausted").color(egui::Color32::GRAY));
                }
            });
        });
    });
}
