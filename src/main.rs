//! Acoustic wavefront / microphone array detection visualizer.
//!
//! Animates a wavefront expanding from a point source toward a ring of
//! microphones and, once all microphones are reached, sketches a staged
//! multi-circle triangulation overlay. The simulation core is display
//! agnostic; the egui UI drives it one frame per repaint.

use anyhow::anyhow;
use env_logger::Builder;
use log::{LevelFilter, info, warn};
use std::path::Path;

use crate::common::scene::{SceneConfig, SceneLoadError};

mod common;
mod simulation;
mod ui;

/// Scene file looked up in the working directory; defaults apply without it.
const SCENE_FILE: &str = "scene.json";

fn load_scene() -> SceneConfig {
    match SceneConfig::load(Path::new(SCENE_FILE)) {
        Ok(config) => {
            info!("loaded scene from {}", SCENE_FILE);
            config
        }
        Err(SceneLoadError::FileReadError(_)) => {
            info!("no {} found, using built-in defaults", SCENE_FILE);
            SceneConfig::default()
        }
        Err(e) => {
            warn!("{} is invalid ({}), using built-in defaults", SCENE_FILE, e);
            SceneConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("wavefront_array_simulator"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let config = load_scene();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Microphone Array Detection",
        native_options,
        Box::new(move |cc| Ok(Box::new(ui::AppState::new(cc, config)))),
    )
    .map_err(|e| anyhow!("failed to start UI: {e}"))
}
