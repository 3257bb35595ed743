use eframe::egui::{self, RichText, Ui};

use super::helpers;
use super::style;
use crate::egui_app::controller::Controller;
use crate::egui_app::view_model;
use crate::model::NOISE_CLUSTER_ID;
use crate::pipeline::aggregate::{ScatterGroup, cluster_color};
use crate::store::DataKey;

const POINT_RADIUS: f32 = 3.0;
const HOVER_RADIUS: f32 = 8.0;

/// 2-D embedding scatter of all reviews, one color per cluster.
pub fn render(ui: &mut Ui, controller: &mut Controller, analysis_id: i64) {
    let chrome = helpers::query_chrome(
        ui,
        &controller.store.reviews(analysis_id),
        DataKey::Reviews(analysis_id),
    );
    if !helpers::apply_chrome(controller, chrome) {
        return;
    }
    let Some(groups) = controller.scatter(analysis_id) else {
        return;
    };
    if groups.iter().all(|group| group.points.is_empty()) {
        helpers::empty_hint(ui, "No embedding coordinates in this analysis.");
        return;
    }
    let reviews = controller.store.reviews(analysis_id).value.cloned();
    let clusters = controller.store.clusters(analysis_id).value.cloned();

    render_legend(
        ui,
        &groups,
        clusters.as_deref().map(Vec::as_slice).unwrap_or(&[]),
    );
    ui.add_space(4.0);

    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), ui.available_height().max(240.0)),
        egui::Sense::click(),
    );
    let painter = ui.painter_at(rect);
    let palette = style::palette();
    painter.rect_filled(rect, 4.0, palette.bg_secondary);

    let Some(bounds) = Bounds::of(&groups) else {
        return;
    };
    let plot = rect.shrink(12.0);

    let mut hovered: Option<(usize, f32)> = None;
    let pointer = response.hover_pos();
    for group in groups.iter() {
        let color = cluster_color(group.cluster_id);
        for point in &group.points {
            let pos = bounds.project(point.x, point.y, plot);
            painter.circle_filled(pos, POINT_RADIUS, color);
            if let Some(pointer) = pointer {
                let distance = pointer.distance(pos);
                if distance <= HOVER_RADIUS
                    && hovered.is_none_or(|(_, best)| distance < best)
                {
                    hovered = Some((point.review_index, distance));
                }
            }
        }
    }

    if let (Some((review_index, _)), Some(reviews)) = (hovered, reviews.as_deref()) {
        if let Some(review) = reviews.get(review_index) {
            response.clone().on_hover_ui(|ui| {
                ui.label(view_model::review_preview(review, 120));
                let cluster_label = if review.cluster_id == NOISE_CLUSTER_ID {
                    "Unclustered".to_string()
                } else {
                    format!("Cluster {}", review.cluster_id)
                };
                ui.label(
                    RichText::new(format!(
                        "#{} · {} · {} · {}",
                        review.id,
                        cluster_label,
                        review.sentiment.label(),
                        view_model::confidence_label(review.confidence)
                    ))
                    .color(palette.text_muted)
                    .small(),
                );
            });
            if response.clicked() {
                controller.open_review_modal(review.id);
            }
        }
    }
}

fn render_legend(ui: &mut Ui, groups: &[ScatterGroup], clusters: &[crate::model::Cluster]) {
    let palette = style::palette();
    ui.horizontal_wrapped(|ui| {
        for group in groups {
            helpers::status_dot(ui, cluster_color(group.cluster_id));
            let label = clusters
                .iter()
                .find(|cluster| cluster.id == group.cluster_id)
                .map(view_model::cluster_title)
                .unwrap_or_else(|| {
                    if group.cluster_id == NOISE_CLUSTER_ID {
                        "Unclustered".to_string()
                    } else {
                        format!("Cluster {}", group.cluster_id)
                    }
                });
            ui.label(
                RichText::new(format!("{label} ({})", group.points.len()))
                    .color(palette.text_muted)
                    .small(),
            );
            ui.add_space(8.0);
        }
    });
}

struct Bounds {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

impl Bounds {
    fn of(groups: &[ScatterGroup]) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for point in groups.iter().flat_map(|group| group.points.iter()) {
            let b = bounds.get_or_insert(Bounds {
                min_x: point.x,
                max_x: point.x,
                min_y: point.y,
                max_y: point.y,
            });
            b.min_x = b.min_x.min(point.x);
            b.max_x = b.max_x.max(point.x);
            b.min_y = b.min_y.min(point.y);
            b.max_y = b.max_y.max(point.y);
        }
        bounds
    }

    /// Map data coordinates into the plot rect; y grows upward in data space.
    fn project(&self, x: f32, y: f32, plot: egui::Rect) -> egui::Pos2 {
        let span_x = (self.max_x - self.min_x).max(f32::EPSILON);
        let span_y = (self.max_y - self.min_y).max(f32::EPSILON);
        egui::pos2(
            plot.left() + (x - self.min_x) / span_x * plot.width(),
            plot.bottom() - (y - self.min_y) / span_y * plot.height(),
        )
    }
}
