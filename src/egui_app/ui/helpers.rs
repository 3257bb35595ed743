use eframe::egui::{self, RichText, Ui};

use super::style;
use crate::egui_app::controller::Controller;
use crate::store::{DataKey, QueryView};

/// Render the loading/error chrome around a query; returns `true` when the
/// caller should render the data itself.
///
/// Loading shows a spinner only for the first fetch of a key; background
/// refreshes keep the previous content on screen. An error with cached data
/// falls through to the data path, the error shows only when there is
/// nothing to draw instead.
pub fn query_chrome<T>(ui: &mut Ui, view: &QueryView<'_, T>, key: DataKey) -> QueryChrome {
    if view.loading {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.spinner();
        });
        return QueryChrome::Busy;
    }
    if view.value.is_some() {
        return QueryChrome::Ready;
    }
    if let Some(error) = view.error {
        let palette = style::palette();
        let mut retry = false;
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("Failed to load").color(palette.negative));
            ui.label(RichText::new(error).color(palette.text_muted).small());
            retry = ui.button("Retry").clicked();
        });
        if retry {
            return QueryChrome::Retry(key);
        }
    }
    QueryChrome::Busy
}

pub enum QueryChrome {
    Ready,
    Busy,
    Retry(DataKey),
}

pub fn apply_chrome(controller: &mut Controller, chrome: QueryChrome) -> bool {
    match chrome {
        QueryChrome::Ready => true,
        QueryChrome::Busy => false,
        QueryChrome::Retry(key) => {
            controller.retry(key);
            false
        }
    }
}

pub fn empty_hint(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(RichText::new(text).color(style::palette().text_muted));
    });
}

pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(text).strong().size(16.0));
    ui.add_space(4.0);
}

pub fn status_dot(ui: &mut Ui, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 4.0, color);
}
