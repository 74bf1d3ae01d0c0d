//! Top toolbar: page size, debounced search, and filter toggles.

use super::super::*;
use eframe::egui;

impl GridApp {
    /// Renders the toolbar above the grid.
    pub(crate) fn render_toolbar(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let mut page_size = self.view.page_size();
        let mut search = self.search_input.clone();
        let mut filter = self.global_filter_input.clone();
        let mut show_filters = self.show_column_filters;

        egui::TopBottomPanel::top("toolbar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Rows per page").color(COLOR_TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("page_size_select")
                        .selected_text(page_size.to_string())
                        .show_ui(ui, |ui| {
                            for option in self.view.page_options() {
                                ui.selectable_value(&mut page_size, option, option.to_string());
                            }
                        });
                    ui.separator();
                    ui.add(
                        egui::TextEdit::singleline(&mut search)
                            .hint_text("Search")
                            .desired_width(240.0),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut filter)
                            .hint_text("Filter any column")
                            .desired_width(200.0),
                    );
                    ui.toggle_value(&mut show_filters, "Column filters");
                });
                ui.add_space(4.0);
            });

        if page_size != self.view.page_size() {
            self.view.set_page_size(page_size);
        }
        if search != self.search_input {
            self.set_search_input(search, now);
        }
        if filter != self.global_filter_input {
            self.set_global_filter_input(filter, now);
        }
        self.show_column_filters = show_filters;
    }
}
