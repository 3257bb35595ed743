use eframe::egui::{self, RichText, Ui};

use super::helpers;
use super::style;
use crate::egui_app::controller::Controller;
use crate::model::Sentiment;
use crate::store::DataKey;

const CHART_HEIGHT: f32 = 220.0;

/// Sentiment histogram with a source filter.
pub fn render(ui: &mut Ui, controller: &mut Controller, analysis_id: i64) {
    let chrome = helpers::query_chrome(
        ui,
        &controller.store.reviews(analysis_id),
        DataKey::Reviews(analysis_id),
    );
    if !helpers::apply_chrome(controller, chrome) {
        return;
    }
    let Some(sources) = controller.sources(analysis_id) else {
        return;
    };

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Source")
                .color(style::palette().text_muted)
                .small(),
        );
        let selected_label = controller
            .ui
            .selected_source
            .clone()
            .unwrap_or_else(|| "All sources".to_string());
        egui::ComboBox::from_id_salt("stats_source")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(controller.ui.selected_source.is_none(), "All sources")
                    .clicked()
                {
                    controller.ui.selected_source = None;
                }
                for source in sources.iter() {
                    let selected = controller.ui.selected_source.as_deref() == Some(source);
                    if ui.selectable_label(selected, source).clicked() {
                        controller.ui.selected_source = Some(source.clone());
                    }
                }
            });
    });
    ui.add_space(8.0);

    let Some(counts) = controller.histogram(analysis_id) else {
        return;
    };
    if counts.total == 0 {
        helpers::empty_hint(ui, "No reviews for this source.");
        return;
    }
    render_bars(
        ui,
        &[
            (Sentiment::Positive, counts.positive),
            (Sentiment::Neutral, counts.neutral),
            (Sentiment::Negative, counts.negative),
        ],
    );
}

fn render_bars(ui: &mut Ui, buckets: &[(Sentiment, u64)]) {
    let palette = style::palette();
    let max = buckets.iter().map(|&(_, count)| count).max().unwrap_or(0);
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width().min(480.0), CHART_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, palette.bg_secondary);
    if max == 0 {
        return;
    }

    let label_band = 20.0;
    let plot = rect.shrink2(egui::vec2(16.0, 12.0));
    let plot = egui::Rect::from_min_max(
        plot.min,
        egui::pos2(plot.max.x, plot.max.y - label_band),
    );
    let slot = plot.width() / buckets.len() as f32;
    let bar_width = slot * 0.55;
    for (index, &(sentiment, count)) in buckets.iter().enumerate() {
        let height = plot.height() * count as f32 / max as f32;
        let center_x = plot.left() + slot * (index as f32 + 0.5);
        let bar = egui::Rect::from_min_max(
            egui::pos2(center_x - bar_width / 2.0, plot.bottom() - height),
            egui::pos2(center_x + bar_width / 2.0, plot.bottom()),
        );
        painter.rect_filled(bar, 2.0, style::sentiment_color(&palette, sentiment));
        painter.text(
            egui::pos2(center_x, bar.top() - 4.0),
            egui::Align2::CENTER_BOTTOM,
            count.to_string(),
            egui::FontId::proportional(12.0),
            palette.text_primary,
        );
        painter.text(
            egui::pos2(center_x, plot.bottom() + label_band / 2.0),
            egui::Align2::CENTER_CENTER,
            sentiment.label(),
            egui::FontId::proportional(12.0),
            palette.text_muted,
        );
    }
}
