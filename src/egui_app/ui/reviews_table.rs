use eframe::egui::{self, RichText, Ui};

use super::helpers;
use super::style;
use crate::egui_app::controller::Controller;
use crate::egui_app::view_model;
use crate::model::Sentiment;
use crate::pipeline::filter::SortKey;
use crate::store::DataKey;
use crate::windowing::{ListWindow, REVIEW_ROW_HEIGHT};

const PREVIEW_CHARS: usize = 90;

/// Filterable, windowed table of every review in the analysis.
pub fn render(ui: &mut Ui, controller: &mut Controller, analysis_id: i64) {
    render_filter_bar(ui, controller);
    ui.add_space(4.0);

    let chrome = helpers::query_chrome(
        ui,
        &controller.store.reviews(analysis_id),
        DataKey::Reviews(analysis_id),
    );
    if !helpers::apply_chrome(controller, chrome) {
        return;
    }
    let Some(filtered) = controller.filtered_reviews(analysis_id) else {
        return;
    };
    if filtered.is_empty() {
        helpers::empty_hint(ui, "No reviews match the current filters.");
        return;
    }
    ui.label(
        RichText::new(format!("{} reviews", filtered.len()))
            .color(style::palette().text_muted)
            .small(),
    );

    let window = ListWindow::new(filtered.len(), REVIEW_ROW_HEIGHT);
    let mut open = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_viewport(ui, |ui, viewport| {
            ui.set_height(window.content_height());
            let slice = window.slice(viewport.min.y, viewport.height());
            for display_index in slice.range() {
                let Some(review) = filtered.row(display_index) else {
                    continue;
                };
                let top = ui.min_rect().top() + window.row_offset(display_index);
                let rect = egui::Rect::from_min_size(
                    egui::pos2(ui.min_rect().left(), top),
                    egui::vec2(ui.available_width(), REVIEW_ROW_HEIGHT),
                );
                let mut row_ui = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(rect)
                        .layout(egui::Layout::left_to_right(egui::Align::Center)),
                );
                if render_row(&mut row_ui, review) {
                    open = Some(review.id);
                }
            }
        });
    if let Some(id) = open {
        controller.open_review_modal(id);
    }
}

fn render_row(ui: &mut Ui, review: &crate::model::Review) -> bool {
    let palette = style::palette();
    let response = ui
        .push_id(review.id, |ui| {
            ui.horizontal(|ui| {
                helpers::status_dot(ui, style::sentiment_color(&palette, review.sentiment));
                ui.label(
                    RichText::new(review.sentiment.label())
                        .color(style::sentiment_color(&palette, review.sentiment))
                        .small(),
                );
                ui.label(
                    RichText::new(view_model::confidence_label(review.confidence))
                        .color(palette.text_muted)
                        .small(),
                );
                ui.label(RichText::new(&review.source_id).color(palette.text_muted).small());
                ui.label(view_model::review_preview(review, PREVIEW_CHARS));
            });
        })
        .response;
    let clickable = ui.interact(
        response.rect,
        ui.id().with(("review_row", review.id)),
        egui::Sense::click(),
    );
    clickable.clicked()
}

fn render_filter_bar(ui: &mut Ui, controller: &mut Controller) {
    let palette = style::palette();
    ui.horizontal(|ui| {
        ui.label(RichText::new("Text").color(palette.text_muted).small());
        let text_edit = ui.add(
            egui::TextEdit::singleline(&mut controller.ui.filters.text.raw)
                .hint_text("search review text")
                .desired_width(180.0),
        );
        if text_edit.changed() {
            controller.ui.filters.text.mark_edited(std::time::Instant::now());
        }
        ui.label(RichText::new("Source").color(palette.text_muted).small());
        let source_edit = ui.add(
            egui::TextEdit::singleline(&mut controller.ui.filters.source.raw)
                .hint_text("source id")
                .desired_width(120.0),
        );
        if source_edit.changed() {
            controller
                .ui
                .filters
                .source
                .mark_edited(std::time::Instant::now());
        }
        for sentiment in Sentiment::ALL {
            let mut on = controller.ui.filters.sentiments.contains(&sentiment);
            if ui.toggle_value(&mut on, sentiment.label()).changed() {
                if on {
                    controller.ui.filters.sentiments.insert(sentiment);
                } else {
                    controller.ui.filters.sentiments.remove(&sentiment);
                }
            }
        }
        egui::ComboBox::from_id_salt("review_sort")
            .selected_text(controller.ui.filters.sort.label())
            .show_ui(ui, |ui| {
                for sort in [SortKey::ConfidenceDesc, SortKey::ConfidenceAsc] {
                    ui.selectable_value(&mut controller.ui.filters.sort, sort, sort.label());
                }
            });
    });
}
