//! Floating "Shader Uniforms" window bound to [`ShaderParams`].

use egui::{Context, Window};
use shaderdeck_config::{ParamRange, ShaderParams};

pub struct ParamsWindow {
    open: bool,
    /// Values restored by "Reset"
    initial: ShaderParams,
}

impl ParamsWindow {
    pub fn new(initial: ShaderParams) -> Self {
        Self {
            open: true,
            initial,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Baseline for "Reset", e.g. after a session load
    pub fn set_initial(&mut self, initial: ShaderParams) {
        self.initial = initial;
    }

    /// Show the window. Returns true if any value changed.
    pub fn show(&mut self, ctx: &Context, params: &mut ShaderParams) -> bool {
        if !self.open {
            return false;
        }

        let before = *params;
        let mut open = self.open;
        let initial = self.initial;

        Window::new("Shader Uniforms")
            .open(&mut open)
            .resizable(false)
            .default_width(280.0)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .show(ctx, |ui| {
                egui::Grid::new("shader_uniforms_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        slider_row(ui, "Width", &mut params.width, &ShaderParams::WIDTH);
                        slider_row(ui, "Height", &mut params.height, &ShaderParams::HEIGHT);
                        slider_row(ui, "Radius", &mut params.radius, &ShaderParams::RADIUS);
                        slider_row(
                            ui,
                            "Border Width",
                            &mut params.border_width,
                            &ShaderParams::BORDER_WIDTH,
                        );

                        ui.label("Color");
                        ui.color_edit_button_srgb(&mut params.color);
                        ui.end_row();

                        ui.label("Border Color");
                        ui.color_edit_button_srgb(&mut params.border_color);
                        ui.end_row();

                        slider_row(ui, "Opacity", &mut params.opacity, &ShaderParams::OPACITY);
                        slider_row(
                            ui,
                            "Background Opacity",
                            &mut params.bg_opacity,
                            &ShaderParams::BG_OPACITY,
                        );
                    });

                ui.separator();
                if ui.button("Reset").clicked() {
                    *params = initial;
                }
            });

        self.open = open;
        *params != before
    }
}

fn slider_row(ui: &mut egui::Ui, label: &str, value: &mut f32, range: &ParamRange) {
    ui.label(label);
    let mut slider = egui::Slider::new(value, range.min..=range.max);
    if let Some(step) = range.step {
        slider = slider.step_by(step as f64);
    }
    ui.add(slider);
    ui.end_row();
}
