//! Bottom status bar: save feedback, editing cell, and row counts.

use super::super::*;
use eframe::egui;
use gridkit_core::format::format_count;

impl GridApp {
    /// Renders the bottom status bar.
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let saving = self.cells.values().filter(|cell| cell.is_saving()).count();
                    let mut has_primary_item = false;
                    if saving > 0 {
                        ui.label(egui::RichText::new("Saving...").color(COLOR_TEXT_MUTED));
                        has_primary_item = true;
                    }
                    if let Some(status) = &self.status {
                        if has_primary_item {
                            ui.separator();
                        }
                        ui.label(egui::RichText::new(&status.text).color(COLOR_ERROR));
                        has_primary_item = true;
                    }
                    if let Some(address) = &self.active {
                        if has_primary_item {
                            ui.separator();
                        }
                        let header = self
                            .view
                            .column(&address.column_id)
                            .map(|column| column.header_label().to_string())
                            .unwrap_or_else(|_| address.column_id.clone());
                        ui.label(
                            egui::RichText::new(format!("Editing {} ({})", header, address.row_id))
                                .small()
                                .color(COLOR_TEXT_SECONDARY),
                        );
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} of {} rows",
                                format_count(self.view.filtered_row_count()),
                                format_count(self.view.rows().len())
                            ))
                            .small()
                            .color(COLOR_TEXT_MUTED),
                        );
                    });
                });
            });
    }
}
