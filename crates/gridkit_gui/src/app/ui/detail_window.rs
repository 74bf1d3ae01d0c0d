//! Read-only row detail window opened by clicking the detail field.

use super::super::*;
use eframe::egui;
use gridkit_core::format::format_display;

impl GridApp {
    pub(crate) fn render_detail_window(&mut self, ctx: &egui::Context) {
        let Some(row_id) = self.detail_row.clone() else {
            return;
        };
        let Some(row) = self.view.row_by_id(&row_id) else {
            self.detail_row = None;
            return;
        };

        let mut open = true;
        egui::Window::new("Row details")
            .id(egui::Id::new("row_detail_window"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(&row_id)
                        .small()
                        .monospace()
                        .color(COLOR_TEXT_MUTED),
                );
                ui.separator();
                egui::Grid::new("row_detail_grid")
                    .num_columns(2)
                    .striped(true)
                    .spacing(egui::vec2(16.0, 6.0))
                    .show(ui, |ui| {
                        for column in self.view.columns() {
                            ui.label(
                                egui::RichText::new(column.header_label())
                                    .color(COLOR_TEXT_SECONDARY),
                            );
                            let value = row.value_at(&column.path);
                            ui.label(format_display(&value, column, &self.currency));
                            ui.end_row();
                        }
                    });
            });
        if !open {
            self.detail_row = None;
        }
    }
}
