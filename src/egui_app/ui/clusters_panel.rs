use eframe::egui::{self, RichText, Ui};

use super::helpers;
use super::style;
use crate::egui_app::controller::Controller;
use crate::egui_app::view_model;
use crate::model::{Sentiment, SentimentStats};
use crate::pipeline::aggregate::cluster_color;
use crate::store::DataKey;

const CARD_WIDTH: f32 = 300.0;

/// Topic cluster cards with per-cluster sentiment breakdowns.
pub fn render(ui: &mut Ui, controller: &mut Controller, analysis_id: i64) {
    let chrome = helpers::query_chrome(
        ui,
        &controller.store.clusters(analysis_id),
        DataKey::Clusters(analysis_id),
    );
    if !helpers::apply_chrome(controller, chrome) {
        return;
    }
    let Some(clusters) = controller.store.clusters(analysis_id).value.cloned() else {
        return;
    };
    if clusters.is_empty() {
        helpers::empty_hint(ui, "No clusters were found in this analysis.");
        return;
    }
    let stats = controller.cluster_stats(analysis_id);

    let mut open = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let columns = (ui.available_width() / CARD_WIDTH).floor().max(1.0) as usize;
            egui::Grid::new("cluster_cards")
                .num_columns(columns)
                .spacing(egui::vec2(8.0, 8.0))
                .show(ui, |ui| {
                    for (index, cluster) in clusters.iter().enumerate() {
                        let cluster_stats = stats
                            .as_ref()
                            .and_then(|map| map.get(&cluster.id).copied())
                            .unwrap_or_default();
                        if render_card(ui, cluster, &cluster_stats) {
                            open = Some(cluster.id);
                        }
                        if (index + 1) % columns == 0 {
                            ui.end_row();
                        }
                    }
                });
        });
    if let Some(id) = open {
        controller.ui.cluster_modal = Some(id);
    }
}

fn render_card(ui: &mut Ui, cluster: &crate::model::Cluster, stats: &SentimentStats) -> bool {
    let palette = style::palette();
    let response = egui::Frame::group(ui.style())
        .fill(palette.bg_secondary)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH - 16.0);
            ui.horizontal(|ui| {
                helpers::status_dot(ui, cluster_color(cluster.id));
                ui.label(RichText::new(view_model::cluster_title(cluster)).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{}", stats.total))
                            .color(palette.text_muted)
                            .small(),
                    );
                });
            });
            if !cluster.summary.is_empty() {
                ui.label(RichText::new(&cluster.summary).color(palette.text_muted).small());
            }
            sentiment_bar(ui, &palette, stats);
        })
        .response;
    ui.interact(
        response.rect,
        ui.id().with(("cluster_card", cluster.id)),
        egui::Sense::click(),
    )
    .clicked()
}

/// Horizontal stacked bar: positive, neutral and negative shares of the
/// cluster.
fn sentiment_bar(ui: &mut Ui, palette: &style::Palette, stats: &SentimentStats) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 6.0), egui::Sense::hover());
    if stats.total == 0 {
        ui.painter().rect_filled(rect, 2.0, palette.bg_tertiary);
        return;
    }
    let mut left = rect.left();
    for sentiment in Sentiment::ALL {
        let share = view_model::sentiment_share(stats, sentiment) / 100.0;
        let width = rect.width() * share;
        if width <= 0.0 {
            continue;
        }
        let segment =
            egui::Rect::from_min_size(egui::pos2(left, rect.top()), egui::vec2(width, rect.height()));
        ui.painter()
            .rect_filled(segment, 0.0, style::sentiment_color(palette, sentiment));
        left += width;
    }
}
