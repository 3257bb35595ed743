//! egui renderer for the application UI.

mod analyses_panel;
mod clusters_panel;
mod helpers;
mod map_panel;
mod modals;
mod overview_panel;
mod reviews_table;
mod statistics_panel;
mod style;

use std::time::Instant;

use eframe::egui::{self, RichText};

use crate::egui_app::controller::Controller;
use crate::egui_app::state::DetailTab;

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: Controller,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(api_url: String) -> Self {
        Self {
            controller: Controller::new(api_url),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(8.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Review Lens").strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(self.controller.api_url().to_string())
                                .color(palette.text_muted)
                                .small(),
                        );
                    });
                });
            });
    }

    fn render_central(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.controller.ui.selected_analysis {
                None => analyses_panel::render(ui, &mut self.controller),
                Some(analysis_id) => {
                    if !overview_panel::render(ui, &mut self.controller, analysis_id) {
                        return;
                    }
                    match self.controller.ui.detail_tab {
                        DetailTab::Reviews => {
                            reviews_table::render(ui, &mut self.controller, analysis_id)
                        }
                        DetailTab::Clusters => {
                            clusters_panel::render(ui, &mut self.controller, analysis_id)
                        }
                        DetailTab::Statistics => {
                            statistics_panel::render(ui, &mut self.controller, analysis_id)
                        }
                        DetailTab::Map => map_panel::render(ui, &mut self.controller, analysis_id),
                    }
                }
            }
        });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let now = Instant::now();
        self.controller.process_frame(now);

        self.render_top_bar(ctx);
        self.render_central(ctx);
        modals::render(ctx, &mut self.controller);

        // Poll and debounce deadlines fire without user input; wake the
        // frame loop for the earliest one.
        if let Some(deadline) = self.controller.next_wakeup() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}
