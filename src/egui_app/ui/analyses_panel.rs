use eframe::egui::{self, RichText, Ui};

use super::helpers;
use super::style;
use crate::egui_app::controller::Controller;
use crate::egui_app::view_model::{self, AnalysisRowView};
use crate::model::Status;
use crate::store::DataKey;

/// Landing view: every uploaded dataset with its processing status.
pub fn render(ui: &mut Ui, controller: &mut Controller) {
    helpers::section_heading(ui, "Analyses");
    render_upload_row(ui, controller);
    ui.separator();

    let chrome = helpers::query_chrome(ui, &controller.store.analyses(), DataKey::Analyses);
    if !helpers::apply_chrome(controller, chrome) {
        return;
    }
    let rows = controller
        .store
        .analyses()
        .value
        .map(|analyses| view_model::analysis_rows(analyses))
        .unwrap_or_default();
    if rows.is_empty() {
        helpers::empty_hint(ui, "No analyses yet. Upload a CSV of reviews to start.");
        return;
    }

    let mut open = None;
    let mut delete = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in &rows {
                if let Some(action) = render_row(ui, row) {
                    match action {
                        RowAction::Open => open = Some(row.id),
                        RowAction::Delete => delete = Some((row.id, row.filename.clone())),
                    }
                }
            }
        });
    if let Some(id) = open {
        controller.select_analysis(Some(id));
    }
    if let Some((id, filename)) = delete {
        controller.prompt_delete_analysis(id, filename);
    }
}

fn render_upload_row(ui: &mut Ui, controller: &mut Controller) {
    ui.horizontal(|ui| {
        if controller.ui.upload_in_progress {
            ui.add_enabled(false, egui::Button::new("Upload CSV"));
            ui.spinner();
            ui.label(RichText::new("Uploading…").color(style::palette().text_muted));
        } else if ui.button("Upload CSV").clicked() {
            controller.upload_via_dialog();
        }
    });
}

enum RowAction {
    Open,
    Delete,
}

fn render_row(ui: &mut Ui, row: &AnalysisRowView) -> Option<RowAction> {
    let palette = style::palette();
    let mut action = None;
    egui::Frame::group(ui.style())
        .fill(palette.bg_secondary)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                helpers::status_dot(ui, status_color(&palette, row.status));
                let label = ui.add(
                    egui::Label::new(RichText::new(&row.filename).strong())
                        .sense(egui::Sense::click()),
                );
                if label.clicked() {
                    action = Some(RowAction::Open);
                }
                ui.label(RichText::new(&row.created_at).color(palette.text_muted).small());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Delete").clicked() {
                        action = Some(RowAction::Delete);
                    }
                    if ui.button("Open").clicked() {
                        action = Some(RowAction::Open);
                    }
                    if row.status == Status::Pending {
                        ui.spinner();
                    }
                    ui.label(
                        RichText::new(row.status_label)
                            .color(status_color(&palette, row.status))
                            .small(),
                    );
                    if let Some(total) = row.total_reviews {
                        ui.label(
                            RichText::new(format!("{total} reviews"))
                                .color(palette.text_muted)
                                .small(),
                        );
                    }
                });
            });
            if let Some(error) = &row.error {
                ui.label(RichText::new(error).color(palette.negative).small());
            }
        });
    action
}

fn status_color(palette: &style::Palette, status: Status) -> egui::Color32 {
    match status {
        Status::Pending => palette.warning,
        Status::Done => palette.positive,
        Status::Failed => palette.negative,
    }
}
