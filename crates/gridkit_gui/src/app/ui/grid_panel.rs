//! Grid body: header rows, pinned blocks, and cell rendering.
//!
//! Rendering only reads state. Clicks, drafts, and header gestures are
//! collected into a [`GridFrame`] and applied after the panel closes.

use super::super::state_ops::{CellAction, HeaderAction};
use super::super::*;
use chrono::Local;
use eframe::egui;
use gridkit_core::cell::EditorKind;
use gridkit_core::format::{format_display, parse_date};
use gridkit_core::grid::{ColumnShade, GroupPinStatus, HeaderCell, HeaderKind, SortDirection};
use gridkit_core::models::{is_empty_value, RowRecord};
use gridkit_core::{ColumnConfig, PinSide};

const EDITOR_ID: &str = "grid_cell_editor";

#[derive(Default)]
struct GridFrame {
    cells: Vec<CellAction>,
    headers: Vec<HeaderAction>,
    filters: Vec<(String, String)>,
    cell_rect: Option<egui::Rect>,
    trigger_rect: Option<egui::Rect>,
    editor_focused: bool,
}

/// Next side in the pin toggle cycle: unpinned, left, right.
fn next_pin_side(current: PinSide) -> PinSide {
    match current {
        PinSide::None => PinSide::Left,
        PinSide::Left => PinSide::Right,
        PinSide::Right => PinSide::None,
    }
}

fn pin_icon(side: PinSide) -> &'static str {
    match side {
        PinSide::Left => "⇤",
        PinSide::Right => "⇥",
        PinSide::None => "📌",
    }
}

fn sort_suffix(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => "",
    }
}

fn paint_cell_frame(ui: &egui::Ui, rect: egui::Rect, fill: egui::Color32) {
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, fill);
    let stroke = egui::Stroke::new(1.0, COLOR_BORDER);
    painter.line_segment([rect.left_bottom(), rect.right_bottom()], stroke);
    painter.line_segment([rect.right_top(), rect.right_bottom()], stroke);
}

fn content_ui(ui: &mut egui::Ui, rect: egui::Rect, inset: egui::Vec2) -> egui::Ui {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect.shrink2(inset))
            .layout(egui::Layout::left_to_right(egui::Align::Center)),
    );
    child.spacing_mut().item_spacing = egui::vec2(4.0, 0.0);
    child.set_clip_rect(rect.intersect(ui.clip_rect()));
    child
}

impl GridApp {
    /// Renders the central grid panel and applies what the user did in it.
    pub(crate) fn render_grid(&mut self, ctx: &egui::Context) {
        let mut frame = GridFrame::default();
        egui::CentralPanel::default().show(ctx, |ui| {
            let header_rows = self.view.header_rows();
            let right_width = self.view.section_width(PinSide::Right);
            egui::ScrollArea::vertical()
                .id_salt("grid_rows")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing = egui::Vec2::ZERO;
                    ui.horizontal_top(|ui| {
                        self.render_block(ui, PinSide::Left, &header_rows, &mut frame);
                        let center_width = (ui.available_width() - right_width).max(0.0);
                        ui.allocate_ui(egui::vec2(center_width, ui.available_height()), |ui| {
                            egui::ScrollArea::horizontal()
                                .id_salt("grid_center")
                                .auto_shrink([false, true])
                                .show(ui, |ui| {
                                    self.render_block(ui, PinSide::None, &header_rows, &mut frame);
                                });
                        });
                        self.render_block(ui, PinSide::Right, &header_rows, &mut frame);
                    });
                    if self.view.is_empty_view() {
                        ui.add_space(24.0);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(&self.empty_placeholder)
                                    .italics()
                                    .color(COLOR_TEXT_MUTED),
                            );
                        });
                    }
                });
        });
        self.apply_grid_frame(frame);
    }

    fn apply_grid_frame(&mut self, frame: GridFrame) {
        let now = Instant::now();
        if frame.editor_focused {
            self.focus_editor = false;
        }
        self.active_rects.cell = frame.cell_rect;
        self.active_rects.trigger = frame.trigger_rect;
        for action in frame.headers {
            self.apply_header_action(action);
        }
        for (column_id, text) in frame.filters {
            self.set_filter_input(&column_id, text, now);
        }
        for action in frame.cells {
            self.apply_cell_action(action, now);
        }
    }

    /// Renders one pin section: its header rows, optional filter row, and
    /// the current page of rows.
    fn render_block(
        &self,
        ui: &mut egui::Ui,
        side: PinSide,
        header_rows: &[Vec<HeaderCell>],
        frame: &mut GridFrame,
    ) {
        let columns: Vec<&ColumnConfig> = self
            .view
            .column_order()
            .into_iter()
            .filter(|column| self.view.pin_side(&column.id) == side)
            .collect();
        if columns.is_empty() {
            return;
        }
        ui.vertical(|ui| {
            for header_row in header_rows {
                ui.horizontal(|ui| {
                    for cell in header_row.iter().filter(|cell| cell.side == side) {
                        self.render_header_cell(ui, cell, frame);
                    }
                });
            }
            if self.show_column_filters {
                ui.horizontal(|ui| {
                    for column in &columns {
                        self.render_filter_cell(ui, column, frame);
                    }
                });
            }
            for visible in self.view.page_rows() {
                let row_id = visible.row.id(self.view.id_field());
                ui.horizontal(|ui| {
                    for column in &columns {
                        self.render_body_cell(ui, column, visible.row, row_id.as_deref(), frame);
                    }
                });
            }
        });
    }

    fn render_header_cell(&self, ui: &mut egui::Ui, cell: &HeaderCell, frame: &mut GridFrame) {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(cell.width, HEADER_HEIGHT), egui::Sense::click());
        let fill = match cell.shade {
            ColumnShade::ReadOnly => COLOR_BG_READ_ONLY,
            ColumnShade::Editable => COLOR_BG_HEADER,
        };
        paint_cell_frame(ui, rect, fill);

        let pin_rect = egui::Rect::from_center_size(
            egui::pos2(rect.right() - 18.0, rect.center().y),
            egui::vec2(20.0, 20.0),
        );
        let pinnable =
            self.view.pinning_enabled() && !matches!(cell.kind, HeaderKind::Placeholder { .. });
        let label_rect = if pinnable {
            egui::Rect::from_min_max(rect.min, egui::pos2(pin_rect.left(), rect.bottom()))
        } else {
            rect
        };

        match &cell.kind {
            HeaderKind::Placeholder { .. } => {}
            HeaderKind::Leaf { column_id } => {
                let label = format!(
                    "{}{}",
                    cell.label,
                    sort_suffix(self.view.sort_direction(column_id))
                );
                ui.painter().with_clip_rect(label_rect).text(
                    label_rect.left_center() + egui::vec2(CELL_PADDING_X, 0.0),
                    egui::Align2::LEFT_CENTER,
                    label,
                    egui::FontId::proportional(13.0),
                    COLOR_TEXT_SECONDARY,
                );
                if response
                    .on_hover_cursor(egui::CursorIcon::PointingHand)
                    .clicked()
                {
                    frame.headers.push(HeaderAction::Sort(column_id.clone()));
                }
                if pinnable {
                    let side = self.view.pin_side(column_id);
                    if self.pin_toggle(ui, pin_rect, ("pin", column_id), side) {
                        frame
                            .headers
                            .push(HeaderAction::PinColumn(column_id.clone(), next_pin_side(side)));
                    }
                }
                self.resize_handle(ui, rect, column_id, cell.width, frame);
            }
            HeaderKind::Group { group } | HeaderKind::VirtualGroup { group, .. } => {
                ui.painter().with_clip_rect(label_rect).text(
                    label_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    &cell.label,
                    egui::FontId::proportional(13.0),
                    COLOR_TEXT_PRIMARY,
                );
                if pinnable {
                    let side = match self.view.group_pin_status(group) {
                        Ok(GroupPinStatus::Left) => PinSide::Left,
                        Ok(GroupPinStatus::Right) => PinSide::Right,
                        _ => PinSide::None,
                    };
                    if self.pin_toggle(ui, pin_rect, ("pin-group", &cell.id), side) {
                        frame
                            .headers
                            .push(HeaderAction::PinGroup(group.clone(), next_pin_side(side)));
                    }
                }
            }
        }
    }

    fn pin_toggle(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        salt: impl std::hash::Hash,
        side: PinSide,
    ) -> bool {
        let response = ui
            .interact(rect, ui.id().with(salt), egui::Sense::click())
            .on_hover_text("Pin left / right / unpin");
        let color = if side.is_pinned() || response.hovered() {
            COLOR_ACCENT
        } else {
            COLOR_TEXT_MUTED
        };
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            pin_icon(side),
            egui::FontId::proportional(12.0),
            color,
        );
        response.clicked()
    }

    fn resize_handle(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        column_id: &str,
        width: f32,
        frame: &mut GridFrame,
    ) {
        let handle = egui::Rect::from_min_max(
            egui::pos2(rect.right() - RESIZE_HANDLE_WIDTH, rect.top()),
            rect.right_bottom(),
        );
        let response = ui.interact(
            handle,
            ui.id().with(("resize", column_id)),
            egui::Sense::drag(),
        );
        if response.hovered() || response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            ui.painter().line_segment(
                [handle.center_top(), handle.center_bottom()],
                egui::Stroke::new(2.0, COLOR_ACCENT),
            );
        }
        if response.dragged() {
            let delta = response.drag_delta().x;
            if delta != 0.0 {
                frame
                    .headers
                    .push(HeaderAction::Resize(column_id.to_string(), width + delta));
            }
        }
    }

    fn render_filter_cell(&self, ui: &mut egui::Ui, column: &ColumnConfig, frame: &mut GridFrame) {
        let width = self.view.column_size(&column.id).unwrap_or(column.size.unwrap_or(0.0));
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(width, FILTER_ROW_HEIGHT), egui::Sense::hover());
        paint_cell_frame(ui, rect, COLOR_BG_HEADER);
        let mut child = content_ui(ui, rect, egui::vec2(4.0, 3.0));
        let mut text = self
            .filter_inputs
            .get(&column.id)
            .cloned()
            .unwrap_or_default();
        let response = child.add(
            egui::TextEdit::singleline(&mut text)
                .id(egui::Id::new(("column_filter", &column.id)))
                .hint_text("Filter...")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            frame.filters.push((column.id.clone(), text));
        }
    }

    fn render_body_cell(
        &self,
        ui: &mut egui::Ui,
        column: &ColumnConfig,
        row: &RowRecord,
        row_id: Option<&str>,
        frame: &mut GridFrame,
    ) {
        let Ok(style) = self.view.cell_style(&column.id) else {
            return;
        };
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(style.width, ROW_HEIGHT), egui::Sense::click());
        let fill = style
            .background()
            .map(shade_color)
            .unwrap_or(COLOR_BG_EDITABLE);
        paint_cell_frame(ui, rect, fill);

        let address = row_id.map(|id| CellAddress::new(id, column.id.clone()));
        let cell = address.as_ref().and_then(|address| self.cells.get(address));
        let is_active = address.is_some() && address == self.active;
        if let Some(cell) = cell.filter(|cell| is_active && cell.is_editing()) {
            self.render_editor(ui, rect, cell, frame);
            return;
        }

        let mut child = content_ui(ui, rect, egui::vec2(CELL_PADDING_X, 0.0));
        if cell.is_some_and(EditableCell::is_saving) {
            child.label(
                egui::RichText::new("Saving...")
                    .italics()
                    .color(COLOR_TEXT_MUTED),
            );
        } else {
            let value = cell
                .map(|cell| cell.value().clone())
                .unwrap_or_else(|| row.value_at(&column.path));
            if column.editable && column.is_required() && is_empty_value(&value) {
                child.label(
                    egui::RichText::new("Required")
                        .italics()
                        .small()
                        .color(COLOR_ERROR),
                );
            } else {
                child.add(
                    egui::Label::new(format_display(&value, column, &self.currency))
                        .truncate()
                        .selectable(false),
                );
            }
        }

        if column.editable {
            let response = response.on_hover_cursor(egui::CursorIcon::Text);
            if response.clicked() {
                if let Some(address) = address {
                    frame.cells.push(CellAction::Click(address));
                }
            }
        }
    }

    fn render_editor(
        &self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        cell: &EditableCell,
        frame: &mut GridFrame,
    ) {
        frame.cell_rect = Some(rect);
        ui.painter().rect_stroke(
            rect.shrink(1.0),
            2.0,
            egui::Stroke::new(1.5, COLOR_ACCENT),
            egui::StrokeKind::Inside,
        );
        let mut child = content_ui(ui, rect, egui::vec2(4.0, 4.0));
        let has_error = cell.validation_error().is_some();
        let hint = egui::RichText::new(cell.placeholder())
            .italics()
            .color(if has_error { COLOR_ERROR } else { COLOR_TEXT_MUTED });

        match cell.editor() {
            Some(EditorKind::MultilineText) => {
                let mut text = cell.draft_text().to_string();
                let response = child.add(
                    egui::TextEdit::multiline(&mut text)
                        .id(egui::Id::new(EDITOR_ID))
                        .desired_rows(1)
                        .desired_width(f32::INFINITY)
                        .hint_text(hint)
                        .return_key(egui::KeyboardShortcut::new(
                            egui::Modifiers::SHIFT,
                            egui::Key::Enter,
                        )),
                );
                self.focus_and_collect(&response, text, frame);
            }
            Some(EditorKind::Numeric { .. }) => {
                let mut text = cell.draft_text().to_string();
                let response = child.add(
                    egui::TextEdit::singleline(&mut text)
                        .id(egui::Id::new(EDITOR_ID))
                        .desired_width(f32::INFINITY)
                        .horizontal_align(egui::Align::RIGHT)
                        .hint_text(hint),
                );
                self.focus_and_collect(&response, text, frame);
            }
            Some(EditorKind::Date) => {
                let mut date = parse_date(cell.value()).unwrap_or_else(|| Local::now().date_naive());
                let response = child.add(
                    egui_extras::DatePickerButton::new(&mut date).id_salt("grid_date_editor"),
                );
                if response.changed() {
                    frame.cells.push(CellAction::PickDate(Some(date)));
                }
                if child.small_button("Clear").clicked() {
                    frame.cells.push(CellAction::PickDate(None));
                }
                if has_error {
                    child.label(hint.small());
                }
            }
            Some(editor) if editor.uses_dropdown() => {
                let Some(trigger) = cell.trigger(&self.currency) else {
                    return;
                };
                let arrow = if trigger.is_open { "▴" } else { "▾" };
                let text = format!("{}  {}", trigger.label(), arrow);
                let label = if trigger.shows_placeholder() {
                    egui::RichText::new(text).italics().color(if has_error {
                        COLOR_ERROR
                    } else {
                        COLOR_TEXT_MUTED
                    })
                } else {
                    egui::RichText::new(text)
                };
                let size = child.available_size();
                let response = child.add_sized(size, egui::Button::new(label));
                frame.trigger_rect = Some(response.rect);
                if response.clicked() {
                    frame.cells.push(CellAction::ToggleDropdown);
                }
            }
            _ => {}
        }
    }

    fn focus_and_collect(&self, response: &egui::Response, text: String, frame: &mut GridFrame) {
        if self.focus_editor {
            response.request_focus();
            frame.editor_focused = true;
        }
        if response.changed() {
            frame.cells.push(CellAction::DraftText(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_toggle_cycles_through_sides() {
        assert_eq!(next_pin_side(PinSide::None), PinSide::Left);
        assert_eq!(next_pin_side(PinSide::Left), PinSide::Right);
        assert_eq!(next_pin_side(PinSide::Right), PinSide::None);
    }

    #[test]
    fn sort_suffix_marks_direction() {
        assert_eq!(sort_suffix(Some(SortDirection::Asc)), " ▲");
        assert_eq!(sort_suffix(Some(SortDirection::Desc)), " ▼");
        assert_eq!(sort_suffix(None), "");
    }
}
