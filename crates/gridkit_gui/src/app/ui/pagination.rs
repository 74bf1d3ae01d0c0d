//! Page navigation footer.

use super::super::*;
use eframe::egui;

/// Page buttons shown on each side of the current page.
const PAGE_WINDOW_RADIUS: usize = 1;

/// Page indices to render as buttons; `None` marks an ellipsis gap.
///
/// The first and last pages are always present, plus a small window around
/// `current`.
fn page_window(current: usize, count: usize) -> Vec<Option<usize>> {
    if count == 0 {
        return Vec::new();
    }
    let last = count - 1;
    let start = current.saturating_sub(PAGE_WINDOW_RADIUS);
    let end = (current + PAGE_WINDOW_RADIUS).min(last);
    let mut pages = Vec::new();
    let mut previous: Option<usize> = None;
    for index in 0..count {
        let shown = index == 0 || index == last || (start..=end).contains(&index);
        if !shown {
            continue;
        }
        if let Some(previous) = previous {
            if index > previous + 1 {
                pages.push(None);
            }
        }
        pages.push(Some(index));
        previous = Some(index);
    }
    pages
}

impl GridApp {
    /// Renders the "Showing x-y of z" summary and page controls.
    pub(crate) fn render_pagination(&mut self, ctx: &egui::Context) {
        let mut target: Option<usize> = None;
        let mut step: Option<bool> = None;
        egui::TopBottomPanel::bottom("pagination")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(self.view.showing_summary()).color(COLOR_TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(self.view.can_next_page(), egui::Button::new("Next ›"))
                            .clicked()
                        {
                            step = Some(true);
                        }
                        let current = self.view.page_index();
                        for entry in page_window(current, self.view.page_count()).into_iter().rev() {
                            match entry {
                                Some(index) => {
                                    let selected = index == current;
                                    if ui
                                        .selectable_label(selected, (index + 1).to_string())
                                        .clicked()
                                        && !selected
                                    {
                                        target = Some(index);
                                    }
                                }
                                None => {
                                    ui.label(egui::RichText::new("…").color(COLOR_TEXT_MUTED));
                                }
                            }
                        }
                        if ui
                            .add_enabled(
                                self.view.can_previous_page(),
                                egui::Button::new("‹ Prev"),
                            )
                            .clicked()
                        {
                            step = Some(false);
                        }
                    });
                });
                ui.add_space(2.0);
            });

        match (step, target) {
            (Some(true), _) => self.view.next_page(),
            (Some(false), _) => self.view.previous_page(),
            (None, Some(index)) => self.view.set_page_index(index),
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::page_window;

    #[test]
    fn short_ranges_show_every_page() {
        assert_eq!(page_window(0, 3), vec![Some(0), Some(1), Some(2)]);
        assert!(page_window(0, 0).is_empty());
        assert_eq!(page_window(0, 1), vec![Some(0)]);
    }

    #[test]
    fn long_ranges_collapse_into_ellipses() {
        assert_eq!(
            page_window(5, 10),
            vec![Some(0), None, Some(4), Some(5), Some(6), None, Some(9)]
        );
        assert_eq!(page_window(0, 10), vec![Some(0), Some(1), None, Some(9)]);
        assert_eq!(page_window(9, 10), vec![Some(0), None, Some(8), Some(9)]);
    }

    #[test]
    fn adjacent_window_does_not_insert_gap() {
        assert_eq!(page_window(2, 5), vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
    }
}
