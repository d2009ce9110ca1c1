// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod config;
mod drivers;
mod engine;
mod export;
mod gui;
mod ports;
mod recorder;
mod session;
mod types;
use std::path::Path;
use eframe::egui;
use crate::config::{PipelineConfig, CONFIG_FILE};
fn main() -> eframe::Result<()> {
    env_logger::init();
    let config = PipelineConfig::load_or_default(Path::new(CONFIG_FILE));
    log::info!(
        "logging to {} at {} baud",
        config.log_path.display(),
        config.baud_rate
    );
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([900.0, 640.0])
        .with_min_inner_size([600.0, 480.0])
        .with_title("Animal Bite Force Datastream");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "bite-logger",
        options,
        Box::new(move |_cc| Box::new(gui::BiteLoggerApp::new(config))),
    )
}
