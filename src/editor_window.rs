//! The editor window: egui editor pane on the left, live shader preview
//! behind the central panel, and the floating uniforms window.

use anyhow::Result;
use shaderdeck_config::{Config, EditorMode, ShaderParams};
use shaderdeck_render::preview_renderer::types::srgb_to_linear;
use shaderdeck_render::{GpuContext, PreviewRenderer, PreviewViewport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wgpu::SurfaceError;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::editor_ui::{EditorPanel, EditorPanelAction};
use crate::params_ui::ParamsWindow;
use crate::pipeline::{AssemblyOptions, EditorAction, EditorDocument};
use crate::session::{Session, default_session_path};
use crate::shader_watcher::ShaderWatcher;

/// Result of processing an editor window event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorWindowAction {
    /// No action needed
    None,
    /// Close the window and exit
    Close,
}

/// Everything the window needs to start editing
pub struct EditorStartup {
    pub document: EditorDocument,
    pub params: ShaderParams,
    pub session_path: Option<PathBuf>,
    pub watcher: Option<ShaderWatcher>,
}

/// Editor window with its own egui context and wgpu renderer
pub struct EditorWindow {
    /// The winit window
    window: Arc<Window>,
    gpu: GpuContext,
    /// egui context
    egui_ctx: egui::Context,
    /// egui-winit state
    egui_state: egui_winit::State,
    /// egui-wgpu renderer
    egui_renderer: egui_wgpu::Renderer,
    preview: PreviewRenderer,
    config: Config,
    document: EditorDocument,
    params: ShaderParams,
    panel: EditorPanel,
    params_window: ParamsWindow,
    /// Latest translation error for the current sources
    shader_error: Option<String>,
    /// Where "Save" writes
    session_path: Option<PathBuf>,
    /// External shader file watcher (`--shader`)
    watcher: Option<ShaderWatcher>,
    /// Central panel rect from the last egui pass, in logical points
    preview_rect: Option<egui::Rect>,
}

impl EditorWindow {
    /// Create GPU resources for `window` and install the initial program
    pub async fn new(window: Arc<Window>, config: Config, startup: EditorStartup) -> Result<Self> {
        let gpu = GpuContext::new(Arc::clone(&window)).await?;

        // Initialize egui
        let scale_factor = window.scale_factor() as f32;
        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::dark());
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(scale_factor),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.format(),
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        let preview = PreviewRenderer::new(&gpu.device, gpu.format());
        let panel = EditorPanel::new(config.editor_font_size);
        let params_window = ParamsWindow::new(startup.params);

        let mut editor = Self {
            window,
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            preview,
            config,
            document: startup.document,
            params: startup.params,
            panel,
            params_window,
            shader_error: None,
            session_path: startup.session_path,
            watcher: startup.watcher,
            preview_rect: None,
        };
        editor.sync_program();
        Ok(editor)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Handle a window event
    pub fn handle_window_event(&mut self, event: WindowEvent) -> EditorWindowAction {
        // Let egui handle the event
        let event_response = self.egui_state.on_window_event(&self.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                return EditorWindowAction::Close;
            }

            WindowEvent::Resized(new_size) => {
                self.gpu.resize(new_size.width, new_size.height);
                self.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                self.render();
                // uTime animates, so keep drawing
                self.window.request_redraw();
                return EditorWindowAction::None;
            }

            _ => {}
        }

        if event_response.repaint {
            self.window.request_redraw();
        }

        EditorWindowAction::None
    }

    /// Apply pending external file reloads
    pub fn poll_watcher(&mut self) {
        let Some(watcher) = &self.watcher else {
            return;
        };
        let mut latest = None;
        while let Some(event) = watcher.try_recv() {
            latest = Some(event);
        }
        let Some(event) = latest else {
            return;
        };

        match event.read() {
            Ok(source) => {
                if source != self.document.single_source() {
                    self.document.set_single_source(source);
                    // The watched file is the single-mode text; show it
                    if self.document.mode() != EditorMode::Single
                        && let Err(e) = self.document.apply(EditorAction::SetMode(EditorMode::Single))
                    {
                        log::warn!("Failed to switch to single mode: {}", e);
                    }
                    self.panel
                        .set_status(format!("Reloaded {}", file_label(&event.path)));
                    self.window.request_redraw();
                }
            }
            Err(e) => {
                crate::debug_error!("SHADER", "Reload of watched file failed: {:#}", e);
                self.panel.set_status("Reload failed, see log");
            }
        }
    }

    /// Rebuild the preview program if the assembled text changed
    fn sync_program(&mut self) {
        match self.preview.set_sources(
            &self.gpu.device,
            self.document.vertex_source(),
            self.document.assembled(),
        ) {
            Ok(true) => self.shader_error = None,
            Ok(false) => {}
            Err(e) => {
                log::warn!("Shader rejected: {}", e);
                self.shader_error = Some(e.to_string());
                self.panel.reset_error_dismissal();
            }
        }
    }

    /// Render one frame
    fn render(&mut self) {
        // Get surface texture
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                return;
            }
            Err(SurfaceError::Timeout) => {
                log::warn!("Editor window surface timeout");
                return;
            }
            Err(e) => {
                log::error!("Editor window surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Run egui
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let mut actions = Vec::new();
        let mut params_changed = false;
        let mut toggle_params = false;
        let mut preview_rect = None;

        let egui_output = self.egui_ctx.run(raw_input, |ctx| {
            let session_label = self.session_path.as_deref().map(file_label);
            actions = egui::SidePanel::left("editor_panel")
                .resizable(true)
                .default_width(self.config.editor_panel_width)
                .min_width(320.0)
                .show(ctx, |ui| {
                    self.panel.show(
                        ui,
                        &self.document,
                        self.shader_error.as_deref(),
                        session_label.as_deref(),
                    )
                })
                .inner;

            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    preview_rect = Some(ui.max_rect());
                    ui.horizontal(|ui| {
                        let label = if self.params_window.is_open() {
                            "Hide Uniforms"
                        } else {
                            "Show Uniforms"
                        };
                        if ui.button(label).clicked() {
                            toggle_params = true;
                        }
                        if !self.preview.has_program() {
                            ui.colored_label(
                                egui::Color32::from_rgb(255, 100, 100),
                                "No valid shader program",
                            );
                        }
                    });
                });

            params_changed = self.params_window.show(ctx, &mut self.params);
        });

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output.clone());

        self.preview_rect = preview_rect;
        if toggle_params {
            self.params_window.toggle();
        }
        if params_changed {
            crate::debug_trace!("PARAMS", "Shader params changed: {:?}", self.params);
        }
        for action in actions {
            self.handle_panel_action(action);
        }
        self.sync_program();

        // Tessellate shapes
        let pixels_per_point = self.egui_ctx.pixels_per_point();
        let paint_jobs = self.egui_ctx.tessellate(egui_output.shapes, pixels_per_point);

        // Upload egui textures
        for (id, delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, delta);
        }

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Editor Window Encoder"),
            });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.surface_config.width, self.gpu.surface_config.height],
            pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        let viewport = self.preview_viewport(pixels_per_point);
        if let Some(viewport) = &viewport {
            self.preview
                .update_uniforms(&self.gpu.queue, &self.params, viewport);
        }

        // Preview pass: clear to the background colour, then the quad
        {
            let [r, g, b] = self.config.background_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Preview Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: srgb_to_linear(r) as f64,
                            g: srgb_to_linear(g) as f64,
                            b: srgb_to_linear(b) as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(viewport) = &viewport {
                self.preview.render(&mut render_pass, viewport);
            }
        }

        // egui pass on top
        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Editor UI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Convert to 'static lifetime as required by egui_renderer.render()
            let mut render_pass = render_pass.forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        // Free textures
        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    /// Central panel in physical pixels, clamped to the surface
    fn preview_viewport(&self, pixels_per_point: f32) -> Option<PreviewViewport> {
        let rect = self.preview_rect?;
        PreviewViewport {
            x: rect.min.x * pixels_per_point,
            y: rect.min.y * pixels_per_point,
            width: rect.width() * pixels_per_point,
            height: rect.height() * pixels_per_point,
            scale_factor: pixels_per_point,
        }
        .clamped_to(self.gpu.surface_config.width, self.gpu.surface_config.height)
    }

    fn handle_panel_action(&mut self, action: EditorPanelAction) {
        match action {
            EditorPanelAction::Document(action) => {
                crate::debug_log!("EDITOR", "Action: {:?}", action);
                if let Err(e) = self.document.apply(action) {
                    log::warn!("Editor action rejected: {}", e);
                    self.panel.set_status(e.to_string());
                }
            }
            EditorPanelAction::CopyAssembled => {
                match arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(self.document.assembled()))
                {
                    Ok(()) => self.panel.set_status("Copied assembled shader"),
                    Err(e) => {
                        log::warn!("Failed to copy to clipboard: {}", e);
                        self.panel.set_status("Clipboard unavailable");
                    }
                }
            }
            EditorPanelAction::OpenSession => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Session", &["yaml", "yml"])
                    .set_directory(shaderdeck_config::Config::sessions_dir())
                    .pick_file()
                {
                    self.open_session(&path);
                }
            }
            EditorPanelAction::SaveSession => match self.session_path.clone() {
                Some(path) => self.save_session(&path),
                None => self.save_session_as(),
            },
            EditorPanelAction::SaveSessionAs => self.save_session_as(),
            EditorPanelAction::ExportGlsl => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("GLSL", &["glsl", "frag"])
                    .set_file_name("shader.frag.glsl")
                    .save_file()
                {
                    match std::fs::write(&path, self.document.assembled()) {
                        Ok(()) => {
                            log::info!("Exported assembled shader to {}", path.display());
                            self.panel.set_status(format!("Exported {}", file_label(&path)));
                        }
                        Err(e) => {
                            log::error!("Failed to export {}: {}", path.display(), e);
                            self.panel.set_status(format!("Export failed: {e}"));
                        }
                    }
                }
            }
        }
    }

    fn open_session(&mut self, path: &Path) {
        let options = AssemblyOptions {
            block_markers: self.config.block_markers,
        };
        match Session::load(path).and_then(|session| session.into_document(options)) {
            Ok((document, params)) => {
                self.document = document;
                self.params = params;
                self.params_window.set_initial(params);
                self.session_path = Some(path.to_path_buf());
                self.panel.set_status(format!("Opened {}", file_label(path)));
            }
            Err(e) => {
                log::error!("Failed to open session {}: {}", path.display(), e);
                self.panel.set_status(format!("Open failed: {e}"));
            }
        }
    }

    fn save_session(&mut self, path: &Path) {
        match Session::capture(&self.document, &self.params).save(path) {
            Ok(()) => {
                self.session_path = Some(path.to_path_buf());
                self.panel.set_status(format!("Saved {}", file_label(path)));
            }
            Err(e) => {
                log::error!("Failed to save session {}: {}", path.display(), e);
                self.panel.set_status(format!("Save failed: {e}"));
            }
        }
    }

    fn save_session_as(&mut self) {
        let suggested = self.session_path.clone().unwrap_or_else(default_session_path);
        let mut dialog = rfd::FileDialog::new().add_filter("Session", &["yaml", "yml"]);
        if let Some(dir) = suggested.parent() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = suggested.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        if let Some(path) = dialog.save_file() {
            self.save_session(&path);
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
