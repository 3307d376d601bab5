//! Preview renderer: one quad drawn with the user's shader program.
//!
//! The program (both shader modules and the render pipeline) is treated as
//! immutable. When either stage's source changes the current program is
//! released, the new sources are translated and compiled, and only then is
//! the new program installed. A failed translation leaves no program
//! installed, so the preview never shows output from stale source.
//!
//! Module and pipeline creation run inside a validation error scope, so a
//! program the device rejects is reported like any other shader error.

use shaderdeck_config::ShaderParams;
use std::time::Instant;
use wgpu::util::DeviceExt;
use wgpu::*;

pub mod camera;
pub mod pipeline;
pub mod program_slot;
pub mod transpiler;
pub mod types;

use crate::error::RenderError;
use pipeline::{create_bind_group, create_bind_group_layout, create_render_pipeline};
use program_slot::ProgramSlot;
use transpiler::translate_program;
use types::{PreviewUniforms, QUAD_VERTICES};

/// Region of the render target the preview occupies, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewViewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Physical pixels per logical pixel
    pub scale_factor: f32,
}

impl PreviewViewport {
    /// Size in logical pixels, as seen by the camera
    pub fn logical_size(&self) -> [f32; 2] {
        let scale = self.scale_factor.max(f32::EPSILON);
        [self.width / scale, self.height / scale]
    }

    /// Clamp to a `target_width × target_height` surface. Returns `None` when
    /// nothing visible remains.
    pub fn clamped_to(&self, target_width: u32, target_height: u32) -> Option<Self> {
        let x0 = self.x.max(0.0);
        let y0 = self.y.max(0.0);
        let x1 = (self.x + self.width).min(target_width as f32);
        let y1 = (self.y + self.height).min(target_height as f32);
        if x1 - x0 < 1.0 || y1 - y0 < 1.0 {
            return None;
        }
        Some(Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
            scale_factor: self.scale_factor,
        })
    }
}

/// A compiled, immutable shader program.
struct ShaderProgram {
    pipeline: RenderPipeline,
    // Modules are owned here so they are released together with the pipeline
    _vertex_module: ShaderModule,
    _fragment_module: ShaderModule,
}

/// GPU preview renderer
pub struct PreviewRenderer {
    /// Active program, empty until a valid source has been installed
    program: ProgramSlot<ShaderProgram>,
    /// Uniform buffer for shader parameters
    uniform_buffer: Buffer,
    /// Quad vertex buffer
    vertex_buffer: Buffer,
    bind_group_layout: BindGroupLayout,
    bind_group: BindGroup,
    /// Surface format for compatibility
    target_format: TextureFormat,
    /// When the current program was installed (uTime origin)
    program_installed_at: Instant,
}

impl PreviewRenderer {
    /// Create a preview renderer with no program installed.
    pub fn new(device: &Device, target_format: TextureFormat) -> Self {
        let bind_group_layout = create_bind_group_layout(device);

        let uniform_buffer = device.create_buffer(&BufferDescriptor {
            label: Some("Preview Uniform Buffer"),
            size: std::mem::size_of::<PreviewUniforms>() as BufferAddress,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let vertex_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Preview Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: BufferUsages::VERTEX,
        });

        let bind_group = create_bind_group(device, &bind_group_layout, &uniform_buffer);

        Self {
            program: ProgramSlot::new(),
            uniform_buffer,
            vertex_buffer,
            bind_group_layout,
            bind_group,
            target_format,
            program_installed_at: Instant::now(),
        }
    }

    /// Install a program built from `vertex_glsl` and `fragment_glsl`.
    ///
    /// Returns `Ok(false)` without touching the GPU when the sources equal
    /// the last install attempt, `Ok(true)` when a new program was installed.
    pub fn set_sources(
        &mut self,
        device: &Device,
        vertex_glsl: &str,
        fragment_glsl: &str,
    ) -> Result<bool, RenderError> {
        let layout = &self.bind_group_layout;
        let format = self.target_format;
        let installed = self.program.install(vertex_glsl, fragment_glsl, |vertex, fragment| {
            build_program(device, layout, format, vertex, fragment)
        })?;

        if installed {
            self.program_installed_at = Instant::now();
            log::info!(
                "Installed preview program #{} ({} bytes fragment GLSL)",
                self.program.generation(),
                fragment_glsl.len()
            );
        }
        Ok(installed)
    }

    /// Whether a valid program is installed
    pub fn has_program(&self) -> bool {
        self.program.has_program()
    }

    /// Write this frame's parameter values into the uniform buffer.
    pub fn update_uniforms(&self, queue: &Queue, params: &ShaderParams, viewport: &PreviewViewport) {
        let time = self.program_installed_at.elapsed().as_secs_f32();
        let uniforms = PreviewUniforms::from_params(params, viewport.logical_size(), time);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Draw the quad into `viewport` of the current render pass.
    ///
    /// Does nothing when no program is installed.
    pub fn render(&self, render_pass: &mut RenderPass<'_>, viewport: &PreviewViewport) {
        let Some(program) = self.program.program() else {
            return;
        };

        render_pass.set_viewport(
            viewport.x,
            viewport.y,
            viewport.width,
            viewport.height,
            0.0,
            1.0,
        );
        render_pass.set_scissor_rect(
            viewport.x as u32,
            viewport.y as u32,
            viewport.width as u32,
            viewport.height as u32,
        );
        render_pass.set_pipeline(&program.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
    }
}

/// Translate and compile both stages. Anything the device rejects is
/// captured by a validation error scope instead of the uncaptured-error
/// handler.
fn build_program(
    device: &Device,
    bind_group_layout: &BindGroupLayout,
    target_format: TextureFormat,
    vertex_glsl: &str,
    fragment_glsl: &str,
) -> Result<ShaderProgram, RenderError> {
    let translated = translate_program(vertex_glsl, fragment_glsl)?;

    device.push_error_scope(ErrorFilter::Validation);
    let vertex_module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Preview Vertex Module"),
        source: ShaderSource::Wgsl(translated.vertex_wgsl.into()),
    });
    let fragment_module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Preview Fragment Module"),
        source: ShaderSource::Wgsl(translated.fragment_wgsl.into()),
    });
    let pipeline = create_render_pipeline(
        device,
        &vertex_module,
        &fragment_module,
        bind_group_layout,
        target_format,
    );

    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(RenderError::ProgramCreation {
            details: error.to_string(),
        });
    }

    Ok(ShaderProgram {
        pipeline,
        _vertex_module: vertex_module,
        _fragment_module: fragment_module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_size_divides_scale() {
        let viewport = PreviewViewport {
            x: 0.0,
            y: 0.0,
            width: 1200.0,
            height: 800.0,
            scale_factor: 2.0,
        };
        assert_eq!(viewport.logical_size(), [600.0, 400.0]);
    }

    #[test]
    fn test_clamped_to_surface() {
        let viewport = PreviewViewport {
            x: 500.0,
            y: -10.0,
            width: 600.0,
            height: 400.0,
            scale_factor: 1.0,
        };
        let clamped = viewport.clamped_to(800, 300).expect("visible");
        assert_eq!(clamped.x, 500.0);
        assert_eq!(clamped.y, 0.0);
        assert_eq!(clamped.width, 300.0);
        assert_eq!(clamped.height, 300.0);
    }

    #[test]
    fn test_clamped_offscreen_is_none() {
        let viewport = PreviewViewport {
            x: 900.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            scale_factor: 1.0,
        };
        assert!(viewport.clamped_to(800, 600).is_none());
    }
}
