use eframe::egui::{self, RichText, Ui};

use super::helpers;
use super::style;
use crate::egui_app::controller::Controller;
use crate::egui_app::state::DetailTab;
use crate::egui_app::view_model;
use crate::model::Status;
use crate::store::DataKey;

/// Detail header: title, processing status, summary counts, export, and the
/// tab strip. Returns `false` while the analysis itself is still loading.
pub fn render(ui: &mut Ui, controller: &mut Controller, analysis_id: i64) -> bool {
    let palette = style::palette();
    ui.horizontal(|ui| {
        if ui.button("← Analyses").clicked() {
            controller.select_analysis(None);
        }
    });
    ui.add_space(4.0);

    let chrome = helpers::query_chrome(
        ui,
        &controller.store.analysis(analysis_id),
        DataKey::Analysis(analysis_id),
    );
    if !helpers::apply_chrome(controller, chrome) {
        return false;
    }
    let Some(analysis) = controller.store.analysis(analysis_id).value.cloned() else {
        return false;
    };

    ui.horizontal(|ui| {
        ui.label(RichText::new(&analysis.filename).strong().size(18.0));
        ui.label(
            RichText::new(view_model::status_label(analysis.status))
                .color(match analysis.status {
                    Status::Pending => palette.warning,
                    Status::Done => palette.positive,
                    Status::Failed => palette.negative,
                })
                .small(),
        );
        if analysis.status == Status::Pending {
            ui.spinner();
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let exportable = analysis.status == Status::Done
                && controller.store.reviews(analysis_id).value.is_some();
            if ui
                .add_enabled(exportable, egui::Button::new("Export CSV"))
                .clicked()
            {
                controller.export_csv_via_dialog(analysis_id);
            }
        });
    });

    match analysis.status {
        Status::Failed => {
            let message = analysis
                .error
                .as_deref()
                .unwrap_or("Processing failed for an unknown reason");
            egui::Frame::group(ui.style())
                .fill(palette.bg_secondary)
                .show(ui, |ui| {
                    ui.label(RichText::new("Analysis failed").color(palette.negative).strong());
                    ui.label(RichText::new(message).color(palette.text_muted));
                });
            return false;
        }
        Status::Pending => {
            helpers::empty_hint(ui, "Processing reviews… results appear here when done.");
            return false;
        }
        Status::Done => {}
    }

    if let Some(stats) = &analysis.stats {
        ui.horizontal(|ui| {
            summary_chip(ui, &palette, "Total", stats.total, palette.text_primary);
            summary_chip(ui, &palette, "Positive", stats.positive, palette.positive);
            summary_chip(ui, &palette, "Neutral", stats.neutral, palette.neutral);
            summary_chip(ui, &palette, "Negative", stats.negative, palette.negative);
        });
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        for tab in DetailTab::ALL {
            let selected = controller.ui.detail_tab == tab;
            if ui.selectable_label(selected, tab.label()).clicked() {
                controller.ui.detail_tab = tab;
            }
        }
    });
    ui.separator();
    true
}

fn summary_chip(
    ui: &mut Ui,
    palette: &style::Palette,
    label: &str,
    count: u64,
    color: egui::Color32,
) {
    egui::Frame::group(ui.style())
        .fill(palette.bg_secondary)
        .show(ui, |ui| {
            ui.label(RichText::new(format!("{count}")).color(color).strong());
            ui.label(RichText::new(label).color(palette.text_muted).small());
        });
}
