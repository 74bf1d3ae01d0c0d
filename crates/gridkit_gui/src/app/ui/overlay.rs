//! Foreground option overlay for single and multi select editors.

use super::super::interaction::{to_core_rect, to_viewport};
use super::super::state_ops::OverlayAction;
use super::super::*;
use eframe::egui;
use gridkit_core::cell::OptionList;
use gridkit_core::constants::SELECT_MAX_HEIGHT;
use gridkit_core::dropdown::{OverlayState, ScrollOffset};

impl GridApp {
    /// Places and renders the overlay of the editing cell, if it is open.
    pub(crate) fn render_dropdown_overlay(&mut self, ctx: &egui::Context) {
        let Some(address) = self.active.clone() else {
            self.active_rects.overlay = None;
            return;
        };
        let trigger = self.active_rects.trigger;
        let Some(cell) = self.cells.get_mut(&address) else {
            self.active_rects.overlay = None;
            return;
        };

        let position = match (cell.dropdown().state(), trigger) {
            (OverlayState::Closed, _) | (OverlayState::Measuring, None) => None,
            (OverlayState::Open(position), _) => Some(position),
            (OverlayState::Measuring, Some(trigger)) => {
                // Screen space already reflects scrolling, so no extra offset.
                ctx.request_repaint();
                cell.dropdown_mut().place(
                    to_core_rect(trigger),
                    to_viewport(ctx.screen_rect()),
                    ScrollOffset::default(),
                )
            }
        };
        let Some(position) = position else {
            self.active_rects.overlay = None;
            return;
        };
        let Some(options) = cell.options() else {
            self.active_rects.overlay = None;
            return;
        };

        let mut actions = Vec::new();
        let mut search = self.option_search_input.clone();
        let area = egui::Area::new(egui::Id::new("grid_option_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(position.left, position.top))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_width(position.width);
                    match options {
                        OptionList::Single(select) => {
                            if select.shows_search() && search_box(ui, &mut search) {
                                actions.push(OverlayAction::Search(search.clone()));
                            }
                            if select.shows_clear() && ui.small_button("Clear selection").clicked()
                            {
                                actions.push(OverlayAction::Clear);
                            }
                            let filtered = select.filtered_options();
                            if filtered.is_empty() {
                                empty_note(ui, select.empty_message());
                            }
                            egui::ScrollArea::vertical()
                                .id_salt("single_select_options")
                                .max_height(select.overlay_height(SELECT_MAX_HEIGHT))
                                .show(ui, |ui| {
                                    for option in filtered {
                                        let clicked = ui
                                            .add_enabled_ui(!option.disabled, |ui| {
                                                ui.selectable_label(
                                                    select.is_selected(&option.value),
                                                    &option.label,
                                                )
                                            })
                                            .inner
                                            .clicked();
                                        if clicked {
                                            actions.push(OverlayAction::Select(option.value.clone()));
                                        }
                                    }
                                });
                        }
                        OptionList::Multi(select) => {
                            ui.label(
                                egui::RichText::new(select.header_text())
                                    .small()
                                    .color(COLOR_TEXT_SECONDARY),
                            );
                            if select.shows_search() && search_box(ui, &mut search) {
                                actions.push(OverlayAction::Search(search.clone()));
                            }
                            ui.horizontal(|ui| {
                                if ui
                                    .add_enabled(
                                        select.select_all_enabled(),
                                        egui::Button::new("Select all").small(),
                                    )
                                    .clicked()
                                {
                                    actions.push(OverlayAction::SelectAll);
                                }
                                if ui
                                    .add_enabled(
                                        select.clear_all_enabled(),
                                        egui::Button::new("Clear all").small(),
                                    )
                                    .clicked()
                                {
                                    actions.push(OverlayAction::ClearAll);
                                }
                            });
                            ui.separator();
                            let filtered = select.filtered_options();
                            if filtered.is_empty() {
                                empty_note(ui, select.empty_message());
                            }
                            egui::ScrollArea::vertical()
                                .id_salt("multi_select_options")
                                .max_height(select.overlay_height(SELECT_MAX_HEIGHT))
                                .show(ui, |ui| {
                                    for option in filtered {
                                        let mut checked = select.is_selected(&option.value);
                                        let changed = ui
                                            .add_enabled(
                                                !option.disabled,
                                                egui::Checkbox::new(&mut checked, &option.label),
                                            )
                                            .changed();
                                        if changed {
                                            actions.push(OverlayAction::Toggle(option.value.clone()));
                                        }
                                    }
                                });
                        }
                    }
                });
            });

        self.active_rects.overlay = Some(area.response.rect);
        let now = Instant::now();
        for action in actions {
            self.apply_overlay_action(action, now);
        }
    }
}

fn search_box(ui: &mut egui::Ui, search: &mut String) -> bool {
    ui.add(
        egui::TextEdit::singleline(search)
            .id(egui::Id::new("grid_option_search"))
            .hint_text("Search...")
            .desired_width(f32::INFINITY),
    )
    .changed()
}

fn empty_note(ui: &mut egui::Ui, message: &str) {
    ui.label(
        egui::RichText::new(message)
            .italics()
            .color(COLOR_TEXT_MUTED),
    );
}
