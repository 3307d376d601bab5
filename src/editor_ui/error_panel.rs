//! Shader compilation error panel.

use arboard::Clipboard;
use egui::Color32;

/// Show the latest translation error above the code editor.
/// Returns true when the user dismissed it.
pub fn show(ui: &mut egui::Ui, error: &str) -> bool {
    let mut dismiss = false;

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.colored_label(Color32::from_rgb(255, 100, 100), "Shader Compilation Error");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Dismiss").clicked() {
                    dismiss = true;
                }
                if ui.button("Copy").clicked() {
                    match Clipboard::new() {
                        Ok(mut clipboard) => {
                            if let Err(e) = clipboard.set_text(error.to_string()) {
                                log::warn!("Failed to copy shader error: {}", e);
                            }
                        }
                        Err(e) => log::warn!("Clipboard unavailable: {}", e),
                    }
                }
            });
        });
        ui.separator();
        egui::ScrollArea::vertical()
            .id_salt("shader_error_scroll")
            .max_height(120.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut &*error)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY)
                        .interactive(true),
                );
            });
    });
    ui.separator();

    dismiss
}
