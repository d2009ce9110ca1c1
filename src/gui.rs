// src/gui.rs
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::Duration;
use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints};
use crate::config::PipelineConfig;
use crate::drivers::DeviceOpener;
use crate::ports;
use crate::session::SessionController;
use crate::types::{AcquisitionState, ChannelNotifier, SessionEvent};
const MAX_LOG_LINES: usize = 200;
const MAX_READINGS: usize = 500;
pub struct BiteLoggerApp {
    controller: SessionController,
    rx: Receiver<SessionEvent>,
    // port selection
    ports: Vec<String>,
    selected_port: String,
    // display
    log_messages: Vec<String>,
    readings: Vec<[f64; 2]>,
    reading_index: f64,
}
impl BiteLoggerApp {
    pub fn new(config: PipelineConfig) -> Self {
        let (tx, rx) = channel();
        let opener = DeviceOpener {
            baud_rate: config.baud_rate,
            read_timeout: config.read_timeout(),
        };
        let controller =
            SessionController::new(config, Arc::new(opener), Arc::new(ChannelNotifier::new(tx)));
        let mut app = Self {
            controller,
            rx,
            ports: Vec::new(),
            selected_port: String::new(),
            log_messages: Vec::new(),
            readings: Vec::new(),
            reading_index: 0.0,
        };
        app.refresh_ports();
        app
    }
    fn log(&mut self, msg: &str) {
        self.log_messages.push(msg.to_owned());
        if self.log_messages.len() > MAX_LOG_LINES {
            self.log_messages.remove(0);
        }
    }
    fn refresh_ports(&mut self) {
        let available = ports::list_available_ports();
        if available.is_empty() {
            self.log("No COM Ports Found");
        }
        self.ports = ports::port_choices(available);
        self.selected_port = self.ports.first().cloned().unwrap_or_default();
    }
    fn clear_data(&mut self) {
        self.controller.clear_log().ok();
        self.log_messages.clear();
        self.readings.clear();
        self.reading_index = 0.0;
    }
    fn export(&mut self) {
        // the original logger stops reading before asking for a destination
        self.controller.pause();
        let picked = rfd::FileDialog::new()
            .set_title("Save voltage data")
            .add_filter("CSV spreadsheet", &["csv"])
            .set_file_name("voltage_data.csv")
            .save_file();
        match picked {
            Some(path) => {
                self.controller.export(&path).ok();
            }
            None => self.log("Export cancelled."),
        }
    }
    fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                SessionEvent::Log(s) => self.log(&s),
                SessionEvent::Reading(v) => {
                    self.log(&format!("{v} V"));
                    self.reading_index += 1.0;
                    self.readings.push([self.reading_index, v]);
                    if self.readings.len() > MAX_READINGS {
                        self.readings.remove(0);
                    }
                }
            }
        }
    }
}
impl eframe::App for BiteLoggerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        let running = self.controller.state() == AcquisitionState::Running;
        egui::SidePanel::left("controls").min_width(260.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("Animal Bite Force Datastream");
            ui.separator();
            egui::ComboBox::from_id_source("port")
                .selected_text(self.selected_port.as_str())
                .width(220.0)
                .show_ui(ui, |ui| {
                    for port in &self.ports {
                        ui.selectable_value(&mut self.selected_port, port.clone(), port.as_str());
                    }
                });
            if ui.button("Refresh Ports").clicked() {
                self.refresh_ports();
            }
            if ui.button("Connect Microcontroller").clicked() {
                let port = self.selected_port.clone();
                self.controller.connect(&port).ok();
            }
            ui.add_space(10.0);
            let (label, fill) = if running {
                ("Click to Stop Sensor Read", Color32::DARK_RED)
            } else {
                ("Click to Start Sensor Read", Color32::DARK_GREEN)
            };
            let toggle = egui::Button::new(egui::RichText::new(label).color(Color32::WHITE)).fill(fill);
            if ui.add(toggle).clicked() {
                if !running {
                    self.log_messages.clear();
                }
                self.controller.toggle().ok();
            }
            if ui.button("Clear Data").clicked() {
                self.clear_data();
            }
            if ui.button("Save Data As...").clicked() {
                self.export();
            }
            ui.add_space(10.0);
            if let Some(target) = self.controller.target() {
                ui.label(format!("Port: {target}"));
            }
            ui.label(format!("Log: {}", self.controller.log_path().display()));
            ui.add_space(10.0);
            if ui.button("Exit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
        egui::TopBottomPanel::bottom("messages")
            .resizable(true)
            .min_height(160.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for m in &self.log_messages {
                            ui.monospace(m);
                        }
                    });
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            Plot::new("readings")
                .include_y(-2.0)
                .include_y(2.0)
                .auto_bounds_x()
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(PlotPoints::new(self.readings.clone()))
                            .name("Voltage (V)")
                            .color(Color32::from_rgb(0, 255, 255)),
                    );
                });
        });
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
