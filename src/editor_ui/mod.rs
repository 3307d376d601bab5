//! Editor pane: toolbar, template tabs, block list and the GLSL code editor.

pub mod block_list;
pub mod error_panel;
pub mod highlight;

use egui::{Color32, RichText};
use shaderdeck_config::EditorMode;

use crate::pipeline::{EditTarget, EditorAction, EditorDocument, TemplatePart};
use block_list::BlockListUI;

/// Requests from the editor pane that the window handles
#[derive(Debug, Clone, PartialEq)]
pub enum EditorPanelAction {
    /// Mutation of the editor document
    Document(EditorAction),
    /// Copy the assembled fragment shader to the clipboard
    CopyAssembled,
    /// Pick a session file and load it
    OpenSession,
    /// Save to the current session path (asks for one if unset)
    SaveSession,
    /// Always ask for a path
    SaveSessionAs,
    /// Write the assembled fragment shader to a .glsl file
    ExportGlsl,
}

/// UI-only state of the editor pane
pub struct EditorPanel {
    font_size: f32,
    block_list: BlockListUI,
    show_assembled: bool,
    /// Transient status line (last save, copy, reload...)
    status: Option<String>,
    error_dismissed: bool,
}

impl EditorPanel {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            block_list: BlockListUI::new(),
            show_assembled: false,
            status: None,
            error_dismissed: false,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// A new error should be shown even if the previous one was dismissed
    pub fn reset_error_dismissal(&mut self) {
        self.error_dismissed = false;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        document: &EditorDocument,
        shader_error: Option<&str>,
        session_label: Option<&str>,
    ) -> Vec<EditorPanelAction> {
        let mut actions = Vec::new();

        self.show_toolbar(ui, document, &mut actions);
        ui.horizontal(|ui| {
            ui.small(session_label.unwrap_or("Unsaved session"));
            if let Some(status) = &self.status {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(status);
                });
            }
        });
        ui.separator();

        if document.mode() == EditorMode::Pipeline {
            self.show_template_tabs(ui, document, &mut actions);
            ui.add_space(4.0);
            ui.label(RichText::new("Blocks").strong());
            actions.extend(
                self.block_list
                    .show(ui, document.pipeline(), document.active())
                    .into_iter()
                    .map(EditorPanelAction::Document),
            );
            ui.separator();
        }

        if let Some(error) = shader_error
            && !self.error_dismissed
            && error_panel::show(ui, error)
        {
            self.error_dismissed = true;
        }

        ui.label(RichText::new(active_title(document)).strong());
        self.show_code_editor(ui, document, &mut actions);

        actions
    }

    fn show_toolbar(
        &mut self,
        ui: &mut egui::Ui,
        document: &EditorDocument,
        actions: &mut Vec<EditorPanelAction>,
    ) {
        ui.horizontal_wrapped(|ui| {
            for mode in EditorMode::all() {
                if ui
                    .selectable_label(document.mode() == *mode, mode.display_name())
                    .clicked()
                    && document.mode() != *mode
                {
                    actions.push(EditorPanelAction::Document(EditorAction::SetMode(*mode)));
                }
            }
            ui.label("|");
            if ui.button("Open…").clicked() {
                actions.push(EditorPanelAction::OpenSession);
            }
            if ui.button("Save").on_hover_text("Ctrl+S").clicked() {
                actions.push(EditorPanelAction::SaveSession);
            }
            if ui.button("Save As…").clicked() {
                actions.push(EditorPanelAction::SaveSessionAs);
            }
            ui.label("|");
            if ui
                .button("Copy GLSL")
                .on_hover_text("Copy the assembled fragment shader")
                .clicked()
            {
                actions.push(EditorPanelAction::CopyAssembled);
            }
            if ui.button("Export…").clicked() {
                actions.push(EditorPanelAction::ExportGlsl);
            }
            ui.checkbox(&mut self.show_assembled, "Show assembled");
        });

        let ctrl_s = ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S));
        if ctrl_s {
            actions.push(EditorPanelAction::SaveSession);
        }
    }

    fn show_template_tabs(
        &self,
        ui: &mut egui::Ui,
        document: &EditorDocument,
        actions: &mut Vec<EditorPanelAction>,
    ) {
        ui.horizontal(|ui| {
            ui.label("Template:");
            for part in TemplatePart::all() {
                let selected = *document.active() == EditTarget::Template(*part);
                if ui.selectable_label(selected, part.display_name()).clicked() && !selected {
                    actions.push(EditorPanelAction::Document(EditorAction::Select(
                        EditTarget::Template(*part),
                    )));
                }
            }
        });
    }

    fn show_code_editor(
        &self,
        ui: &mut egui::Ui,
        document: &EditorDocument,
        actions: &mut Vec<EditorPanelAction>,
    ) {
        let font_size = self.font_size;
        let mut layouter = |ui: &egui::Ui, buf: &dyn egui::TextBuffer, wrap_width: f32| {
            let job = highlight::highlight(buf.as_str(), font_size, wrap_width);
            ui.painter().layout_job(job)
        };

        let assembled_height = if self.show_assembled {
            ui.available_height() * 0.4
        } else {
            0.0
        };
        let editor_height = (ui.available_height() - assembled_height).max(80.0);

        egui::ScrollArea::both()
            .id_salt("code_editor_scroll")
            .auto_shrink([false, false])
            .max_height(editor_height)
            .show(ui, |ui| {
                let min_size = egui::vec2(ui.available_width(), editor_height - 8.0);
                if document.active_is_read_only() {
                    let mut text = document.active_text();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .id_salt("shader_code_editor")
                            .code_editor()
                            .desired_width(f32::INFINITY)
                            .min_size(min_size)
                            .layouter(&mut layouter),
                    );
                } else {
                    let mut text = document.active_text().to_string();
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .id_salt("shader_code_editor")
                            .code_editor()
                            .desired_width(f32::INFINITY)
                            .min_size(min_size)
                            .layouter(&mut layouter),
                    );
                    if response.changed() {
                        actions.push(EditorPanelAction::Document(EditorAction::ReplaceText(text)));
                    }
                }
            });

        if self.show_assembled {
            ui.separator();
            ui.label(RichText::new("Assembled fragment shader").color(Color32::GRAY));
            egui::ScrollArea::both()
                .id_salt("assembled_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let mut assembled = document.assembled();
                    ui.add(
                        egui::TextEdit::multiline(&mut assembled)
                            .code_editor()
                            .desired_width(f32::INFINITY)
                            .layouter(&mut layouter),
                    );
                });
        }
    }
}

/// Heading above the code editor
fn active_title(document: &EditorDocument) -> String {
    match (document.mode(), document.active()) {
        (EditorMode::Single, _) => "Fragment shader".to_string(),
        (EditorMode::Pipeline, EditTarget::Template(part)) => {
            format!("Template: {}", part.display_name())
        }
        (EditorMode::Pipeline, EditTarget::Block(id)) => {
            let name = document
                .pipeline()
                .get(id)
                .map(|f| f.name.as_str())
                .unwrap_or(id.as_str());
            if document.active_is_read_only() {
                format!("Block: {name} (read-only)")
            } else {
                format!("Block: {name}")
            }
        }
    }
}
