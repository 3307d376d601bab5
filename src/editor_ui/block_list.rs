//! Pipeline block list: drag handle, enable toggle and selection per row.
//!
//! Dragging is started from the row's handle; releasing over another row
//! moves the dragged block to that row's position. Releasing anywhere else,
//! or pressing Escape, cancels.

use egui::{Color32, Rect, RichText, Sense, Stroke};

use crate::pipeline::{EditTarget, EditorAction, FragmentId, Pipeline};

/// Decide what a click on a block row means.
///
/// The enable toggle takes precedence: a click that hit the toggle never
/// also selects the row.
pub fn resolve_row_click(
    id: &FragmentId,
    toggle_clicked: bool,
    row_clicked: bool,
) -> Option<EditorAction> {
    if toggle_clicked {
        Some(EditorAction::ToggleBlock(id.clone()))
    } else if row_clicked {
        Some(EditorAction::Select(EditTarget::Block(id.clone())))
    } else {
        None
    }
}

/// Row under `pointer`, if any
pub fn drop_target(row_rects: &[(FragmentId, Rect)], pointer: egui::Pos2) -> Option<FragmentId> {
    row_rects
        .iter()
        .find(|(_, rect)| rect.contains(pointer))
        .map(|(id, _)| id.clone())
}

#[derive(Debug, Default)]
pub struct BlockListUI {
    /// Block currently being dragged
    dragging: Option<FragmentId>,
    /// Row rects from the last frame, in list order
    row_rects: Vec<(FragmentId, Rect)>,
}

impl BlockListUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the rows and return the actions the user requested
    pub fn show(&mut self, ui: &mut egui::Ui, pipeline: &Pipeline, active: &EditTarget) -> Vec<EditorAction> {
        let mut actions = Vec::new();
        self.row_rects.clear();

        for fragment in pipeline.fragments() {
            let is_active = matches!(active, EditTarget::Block(id) if *id == fragment.id);
            let is_dragged = self.dragging.as_ref() == Some(&fragment.id);

            let row = ui.horizontal(|ui| {
                let handle = ui
                    .add(egui::Label::new(RichText::new("☰").monospace()).sense(Sense::drag()))
                    .on_hover_cursor(egui::CursorIcon::Grab);
                if handle.drag_started() {
                    crate::debug_trace!("DRAG", "Started dragging block {}", fragment.id);
                    self.dragging = Some(fragment.id.clone());
                }

                let mut enabled = fragment.enabled;
                let toggle = ui
                    .checkbox(&mut enabled, "")
                    .on_hover_text("Include this block in the shader");

                let mut name = RichText::new(&fragment.name);
                if !fragment.enabled {
                    name = name.weak().strikethrough();
                }
                if is_dragged {
                    name = name.italics();
                }
                let label = ui.selectable_label(is_active, name);

                if fragment.read_only {
                    ui.label(RichText::new("🔒").small())
                        .on_hover_text("Read-only block");
                }

                (toggle.clicked(), label.clicked())
            });

            let (toggle_clicked, row_clicked) = row.inner;
            if let Some(action) = resolve_row_click(&fragment.id, toggle_clicked, row_clicked) {
                actions.push(action);
            }
            self.row_rects.push((fragment.id.clone(), row.response.rect));
        }

        if let Some(action) = self.drag_feedback(ui) {
            actions.push(action);
        }
        actions
    }

    /// Draw the drop indicator and finish the drag on release
    fn drag_feedback(&mut self, ui: &mut egui::Ui) -> Option<EditorAction> {
        let source = self.dragging.clone()?;

        if ui.ctx().input(|i| i.key_pressed(egui::Key::Escape)) {
            crate::debug_trace!("DRAG", "Cancelled dragging block {}", source);
            self.dragging = None;
            return None;
        }

        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);

        let pointer = ui.ctx().input(|i| i.pointer.hover_pos());
        let target = pointer.and_then(|pos| drop_target(&self.row_rects, pos));

        if let Some(target_id) = &target
            && *target_id != source
            && let Some((_, rect)) = self.row_rects.iter().find(|(id, _)| id == target_id)
        {
            let indicator_color = Color32::from_rgb(80, 160, 255);
            ui.painter().rect_filled(
                rect.expand(1.0),
                2.0,
                Color32::from_rgba_unmultiplied(80, 160, 255, 40),
            );
            ui.painter().line_segment(
                [rect.left_top(), rect.right_top()],
                Stroke::new(2.0, indicator_color),
            );
        }

        if ui.ctx().input(|i| i.pointer.any_released()) {
            self.dragging = None;
            return Some(EditorAction::MoveBlock { source, target });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_click_does_not_select() {
        let id = FragmentId::new("border");
        assert_eq!(
            resolve_row_click(&id, true, true),
            Some(EditorAction::ToggleBlock(id.clone()))
        );
        assert_eq!(
            resolve_row_click(&id, true, false),
            Some(EditorAction::ToggleBlock(id.clone()))
        );
    }

    #[test]
    fn test_row_click_selects() {
        let id = FragmentId::new("border");
        assert_eq!(
            resolve_row_click(&id, false, true),
            Some(EditorAction::Select(EditTarget::Block(id.clone())))
        );
        assert_eq!(resolve_row_click(&id, false, false), None);
    }

    #[test]
    fn test_drop_target_outside_rows_is_none() {
        let rows = vec![
            (
                FragmentId::new("a"),
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 20.0)),
            ),
            (
                FragmentId::new("b"),
                Rect::from_min_max(egui::pos2(0.0, 20.0), egui::pos2(100.0, 40.0)),
            ),
        ];
        assert_eq!(drop_target(&rows, egui::pos2(50.0, 30.0)), Some(FragmentId::new("b")));
        assert_eq!(drop_target(&rows, egui::pos2(50.0, 90.0)), None);
    }
}
