use eframe::egui::{Color32, Stroke, Visuals, epaint::CornerRadius, style::WidgetVisuals};

use crate::model::Sentiment;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub positive: Color32,
    pub neutral: Color32,
    pub negative: Color32,
    pub warning: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(14, 15, 18),
        bg_secondary: Color32::from_rgb(24, 26, 30),
        bg_tertiary: Color32::from_rgb(38, 41, 46),
        panel_outline: Color32::from_rgb(48, 52, 58),
        text_primary: Color32::from_rgb(200, 205, 212),
        text_muted: Color32::from_rgb(138, 144, 153),
        accent: Color32::from_rgb(122, 170, 255),
        positive: Color32::from_rgb(96, 180, 130),
        neutral: Color32::from_rgb(150, 155, 165),
        negative: Color32::from_rgb(214, 110, 98),
        warning: Color32::from_rgb(206, 140, 90),
    }
}

pub fn sentiment_color(palette: &Palette, sentiment: Sentiment) -> Color32 {
    match sentiment {
        Sentiment::Positive => palette.positive,
        Sentiment::Neutral => palette.neutral,
        Sentiment::Negative => palette.negative,
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_secondary;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.negative;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.bg_tertiary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    flatten(&mut visuals.widgets.inactive, palette);
    flatten(&mut visuals.widgets.hovered, palette);
    flatten(&mut visuals.widgets.active, palette);
    flatten(&mut visuals.widgets.open, palette);
}

fn flatten(widget: &mut WidgetVisuals, palette: Palette) {
    widget.corner_radius = CornerRadius::same(3);
    widget.bg_fill = palette.bg_tertiary;
    widget.weak_bg_fill = palette.bg_secondary;
    widget.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    widget.fg_stroke = Stroke::new(1.0, palette.text_primary);
}
