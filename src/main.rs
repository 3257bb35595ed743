#![deny(warnings)]

//! Entry point for the egui-based Review Lens UI.

use eframe::egui;
use revlens::config::Settings;
use revlens::egui_app::ui::EguiApp;
use revlens::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = Settings::load();
    let api_url = match settings {
        Ok(settings) => settings.api_url,
        Err(err) => {
            tracing::error!("Settings invalid: {err}");
            return run_launch_error(format!("Settings invalid: {err}"));
        }
    };
    tracing::info!("Using API at {api_url}");

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(egui::vec2(900.0, 600.0))
        .with_inner_size(egui::vec2(1280.0, 800.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Review Lens",
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(api_url.clone())))),
    )?;
    Ok(())
}

fn run_launch_error(message: String) -> Result<(), Box<dyn std::error::Error>> {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Review Lens",
        native_options,
        Box::new(move |_cc| Ok(Box::new(LaunchError { message }))),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
