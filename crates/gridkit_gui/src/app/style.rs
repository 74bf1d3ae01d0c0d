//! Theme constants and one-time style application for the grid.

use super::GridApp;
use eframe::egui::{
    self, style::WidgetVisuals, Color32, CornerRadius, FontFamily, FontId, Margin, Stroke,
    TextStyle, Visuals,
};
use gridkit_core::grid::ColumnShade;

pub(super) const COLOR_BG_EDITABLE: Color32 = Color32::WHITE;
pub(super) const COLOR_BG_READ_ONLY: Color32 = Color32::from_rgb(0xf9, 0xfa, 0xfb);
pub(super) const COLOR_BG_HEADER: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);
pub(super) const COLOR_BG_PANEL: Color32 = Color32::from_rgb(0xfc, 0xfc, 0xfd);
pub(super) const COLOR_TEXT_PRIMARY: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);
pub(super) const COLOR_TEXT_SECONDARY: Color32 = Color32::from_rgb(0x4b, 0x55, 0x63);
pub(super) const COLOR_TEXT_MUTED: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
pub(super) const COLOR_ERROR: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
pub(super) const COLOR_ACCENT: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
pub(super) const COLOR_ACCENT_SOFT: Color32 = Color32::from_rgb(0xdb, 0xea, 0xfe);
pub(super) const COLOR_BORDER: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);
pub(super) const COLOR_BORDER_STRONG: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);

/// Fixed body row height.
pub(super) const ROW_HEIGHT: f32 = 36.0;
pub(super) const HEADER_HEIGHT: f32 = 36.0;
pub(super) const FILTER_ROW_HEIGHT: f32 = 32.0;
/// Horizontal padding inside body and header cells.
pub(super) const CELL_PADDING_X: f32 = 8.0;
/// Width of the drag handle on a header's right edge.
pub(super) const RESIZE_HANDLE_WIDTH: f32 = 6.0;

pub(super) fn shade_color(shade: ColumnShade) -> Color32 {
    match shade {
        ColumnShade::Editable => COLOR_BG_EDITABLE,
        ColumnShade::ReadOnly => COLOR_BG_READ_ONLY,
    }
}

fn widget_visuals(fill: Color32, stroke: Color32, fg: Color32, expansion: f32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke::new(1.0, stroke),
        corner_radius: CornerRadius::same(4),
        fg_stroke: Stroke::new(1.0, fg),
        expansion,
    }
}

impl GridApp {
    pub(super) fn ensure_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = Visuals::light();
        style.visuals.override_text_color = Some(COLOR_TEXT_PRIMARY);
        style.visuals.window_fill = COLOR_BG_EDITABLE;
        style.visuals.panel_fill = COLOR_BG_PANEL;
        style.visuals.extreme_bg_color = COLOR_BG_EDITABLE;
        style.visuals.faint_bg_color = COLOR_BG_READ_ONLY;
        style.visuals.window_stroke = Stroke::new(1.0, COLOR_BORDER_STRONG);
        style.visuals.hyperlink_color = COLOR_ACCENT;
        style.visuals.selection.bg_fill = COLOR_ACCENT_SOFT;
        style.visuals.selection.stroke = Stroke::new(1.0, COLOR_ACCENT);

        style.visuals.widgets.noninteractive =
            widget_visuals(COLOR_BG_PANEL, COLOR_BORDER, COLOR_TEXT_SECONDARY, 0.0);
        style.visuals.widgets.inactive =
            widget_visuals(COLOR_BG_EDITABLE, COLOR_BORDER_STRONG, COLOR_TEXT_PRIMARY, 0.0);
        style.visuals.widgets.hovered =
            widget_visuals(COLOR_ACCENT_SOFT, COLOR_ACCENT, COLOR_TEXT_PRIMARY, 0.5);
        style.visuals.widgets.active =
            widget_visuals(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.5);
        style.visuals.widgets.open =
            widget_visuals(COLOR_ACCENT_SOFT, COLOR_ACCENT, COLOR_TEXT_PRIMARY, 0.0);

        style.spacing.window_margin = Margin::same(12);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.interact_size.y = 28.0;
        style.spacing.menu_margin = Margin::same(6);
        style.spacing.combo_width = 80.0;

        style
            .text_styles
            .insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
        style.text_styles.insert(
            TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style
            .text_styles
            .insert(TextStyle::Small, FontId::new(12.0, FontFamily::Proportional));

        ctx.set_style(style);
        self.style_applied = true;
    }
}
