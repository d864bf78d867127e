//! # Right Panel - Sensor Inspector
//!
//! Renders the fixed-width right panel with a striped table of all sensors:
//! id, position, source distance, arrival time and reached state. Rows are
//! selectable and stay in sync with map click selection; the selected
//! sensor's row is highlighted and its range is previewed on the map.

use eframe::egui;
use egui::Color32;
use egui_extras::{Column, TableBuilder};

use crate::ui::AppState;

/// Render the right inspector panel.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state (selection is updated on row clicks)
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("inspector_right").exact_width(360.0).show(ctx, |ui| {
        ui.heading("Sensors");
        ui.separator();

        if let Some(i) = state.selected {
            let sensor = &state.simulator.sensors()[i];
            ui.horizontal(|ui| {
                ui.label("Selected sensor:");
                ui.label(egui::RichText::new(format!("#{}", i)).strong().color(Color32::from_rgb(0, 128, 255)));
            });
            ui.horizontal(|ui| {
                ui.label("Position: (");
                ui.label(egui::RichText::new(format!("{:.3}", sensor.position.x)).strong());
                ui.label(",");
                ui.label(egui::RichText::new(format!("{:.3}", sensor.position.y)).strong());
                ui.label(")");
            });
            ui.horizontal(|ui| {
                ui.label("Arrival time:");
                ui.label(egui::RichText::new(format!("{:.3} ms", sensor.arrival_time * 1000.0)).strong());
            });
        } else {
            ui.label("No sensor selected. Click a sensor on the map or a row below.");
        }
        ui.separator();

        let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
        let sensor_count = state.simulator.sensors().len();
        let mut clicked_row: Option<usize> = None;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(36.0).at_least(28.0)) // Id
            .column(Column::initial(110.0).at_least(80.0)) // Position
            .column(Column::initial(64.0).at_least(48.0)) // Distance
            .column(Column::initial(70.0).at_least(52.0)) // Arrival
            .column(Column::remainder()) // Reached
            .header(row_height, |mut header| {
                header.col(|ui| {
                    ui.strong("Id");
                });
                header.col(|ui| {
                    ui.strong("Position");
                });
                header.col(|ui| {
                    ui.strong("Dist");
                });
                header.col(|ui| {
                    ui.strong("Arrival");
                });
                header.col(|ui| {
                    ui.strong("Reached");
                });
            })
            .body(|body| {
                body.rows(row_height, sensor_count, |mut row| {
                    let index = row.index();
                    let sensor = &state.simulator.sensors()[index];
                    let reached = state.reached.get(index).copied().unwrap_or(false);
                    let selected = state.selected == Some(index);

                    let row_color = if selected {
                        Color32::from_rgb(0, 128, 255)
                    } else if reached {
                        Color32::from_rgb(255, 80, 80)
                    } else {
                        Color32::LIGHT_GRAY
                    };

                    row.col(|ui| {
                        if ui.selectable_label(selected, format!("#{}", index)).clicked() {
                            clicked_row = Some(index);
                        }
                    });
                    row.col(|ui| {
                        ui.colored_label(row_color, format!("({:.2}, {:.2})", sensor.position.x, sensor.position.y));
                    });
                    row.col(|ui| {
                        ui.colored_label(row_color, format!("{:.3}", sensor.distance));
                    });
                    row.col(|ui| {
                        ui.colored_label(row_color, format!("{:.2} ms", sensor.arrival_time * 1000.0));
                    });
                    row.col(|ui| {
                        let (text, color) = if reached {
                            ("yes", Color32::from_rgb(255, 80, 80))
                        } else {
                            ("no", Color32::GRAY)
                        };
                        ui.colored_label(color, text);
                    });
                });
            });

        if let Some(index) = clicked_row {
            // Toggle: clicking the selected row deselects it
            state.selected = if state.selected == Some(index) { None } else { Some(index) };
        }
    });
}
