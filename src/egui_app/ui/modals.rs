use eframe::egui::{self, RichText, Ui};

use super::style;
use crate::egui_app::controller::Controller;
use crate::egui_app::state::Notice;
use crate::egui_app::view_model;
use crate::model::Sentiment;

/// All overlay windows: review editor, cluster detail, delete confirmation,
/// and the transient notice bar.
pub fn render(ctx: &egui::Context, controller: &mut Controller) {
    render_review_modal(ctx, controller);
    render_cluster_modal(ctx, controller);
    render_delete_prompt(ctx, controller);
    render_notice(ctx, controller);
}

fn render_review_modal(ctx: &egui::Context, controller: &mut Controller) {
    let Some(modal) = controller.ui.review_modal.clone() else {
        return;
    };
    let mut open = true;
    egui::Window::new("Review")
        .id(egui::Id::new("review_modal"))
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .open(&mut open)
        .show(ctx, |ui| {
            let review = controller.store.review(modal.review_id).value.cloned();
            let Some(review) = review else {
                ui.spinner();
                return;
            };
            let palette = style::palette();
            ui.label(&review.text);
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(&review.source_id).color(palette.text_muted).small());
                ui.label(
                    RichText::new(view_model::confidence_label(review.confidence))
                        .color(palette.text_muted)
                        .small(),
                );
            });
            ui.separator();
            ui.label(RichText::new("Sentiment").color(palette.text_muted).small());
            ui.horizontal(|ui| {
                for sentiment in Sentiment::ALL {
                    let selected = review.sentiment == sentiment;
                    let button = egui::Button::new(
                        RichText::new(sentiment.label())
                            .color(style::sentiment_color(&palette, sentiment)),
                    )
                    .selected(selected);
                    if ui.add_enabled(!modal.saving, button).clicked() && !selected {
                        controller.update_review_sentiment(
                            review.id,
                            review.analysis_id,
                            sentiment,
                        );
                    }
                }
                if modal.saving {
                    ui.spinner();
                }
            });
            ui.separator();
            if ui
                .add_enabled(
                    !modal.saving,
                    egui::Button::new(RichText::new("Delete review").color(palette.negative)),
                )
                .clicked()
            {
                controller.delete_review(review.id, review.analysis_id);
            }
        });
    if !open {
        controller.ui.review_modal = None;
    }
}

fn render_cluster_modal(ctx: &egui::Context, controller: &mut Controller) {
    let Some(cluster_id) = controller.ui.cluster_modal else {
        return;
    };
    let Some(analysis_id) = controller.ui.selected_analysis else {
        controller.ui.cluster_modal = None;
        return;
    };
    let cluster = controller
        .store
        .clusters(analysis_id)
        .value
        .and_then(|clusters| clusters.iter().find(|c| c.id == cluster_id).cloned());
    let Some(cluster) = cluster else {
        controller.ui.cluster_modal = None;
        return;
    };

    let mut open = true;
    egui::Window::new(view_model::cluster_title(&cluster))
        .id(egui::Id::new("cluster_modal"))
        .collapsible(false)
        .default_width(460.0)
        .open(&mut open)
        .show(ctx, |ui| {
            let palette = style::palette();
            if !cluster.summary.is_empty() {
                ui.label(&cluster.summary);
                ui.separator();
            }
            let members: Vec<crate::model::Review> = controller
                .store
                .reviews(analysis_id)
                .value
                .map(|reviews| {
                    reviews
                        .iter()
                        .filter(|review| review.cluster_id == cluster_id)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            ui.label(
                RichText::new(format!("{} reviews", members.len()))
                    .color(palette.text_muted)
                    .small(),
            );
            let mut open_review = None;
            egui::ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui| {
                    for review in &members {
                        if member_row(ui, &palette, review) {
                            open_review = Some(review.id);
                        }
                    }
                });
            if let Some(id) = open_review {
                controller.open_review_modal(id);
            }
        });
    if !open {
        controller.ui.cluster_modal = None;
    }
}

fn member_row(ui: &mut Ui, palette: &style::Palette, review: &crate::model::Review) -> bool {
    let response = ui.horizontal(|ui| {
        super::helpers::status_dot(ui, style::sentiment_color(palette, review.sentiment));
        ui.label(view_model::review_preview(review, 70));
    });
    ui.interact(
        response.response.rect,
        ui.id().with(("cluster_member", review.id)),
        egui::Sense::click(),
    )
    .clicked()
}

fn render_delete_prompt(ctx: &egui::Context, controller: &mut Controller) {
    let Some(prompt) = controller.ui.delete_prompt.clone() else {
        return;
    };
    egui::Window::new("Delete analysis?")
        .id(egui::Id::new("delete_prompt"))
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "Delete \"{}\" and all of its reviews? This cannot be undone.",
                prompt.filename
            ));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    controller.ui.delete_prompt = None;
                }
                let palette = style::palette();
                if ui
                    .button(RichText::new("Delete").color(palette.negative))
                    .clicked()
                {
                    controller.confirm_delete_analysis();
                }
            });
        });
}

fn render_notice(ctx: &egui::Context, controller: &mut Controller) {
    let Some(notice) = controller.ui.notice.clone() else {
        return;
    };
    let palette = style::palette();
    let (text, color) = match &notice {
        Notice::Info(text) => (text.as_str(), palette.positive),
        Notice::Error(text) => (text.as_str(), palette.negative),
    };
    egui::TopBottomPanel::bottom("notice_bar")
        .frame(egui::Frame::new().fill(palette.bg_tertiary).inner_margin(6.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(text).color(color));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Dismiss").clicked() {
                        controller.ui.notice = None;
                    }
                });
            });
        });
}
