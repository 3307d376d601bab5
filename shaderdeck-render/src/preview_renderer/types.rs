use shaderdeck_config::ShaderParams;

/// Uniform data passed to the preview program
/// Layout must match GLSL std140 rules:
/// - mat4 aligned to 16 bytes
/// - vec3 aligned to 16 bytes, size 12 (a trailing float packs into it)
/// - vec2 aligned to 8 bytes
/// - struct size rounded to 16 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PreviewUniforms {
    /// Orthographic projection (projectionMatrix) - offset 0, size 64
    pub projection: [[f32; 4]; 4],
    /// Camera view times quad scale (modelViewMatrix) - offset 64, size 64
    pub model_view: [[f32; 4]; 4],
    /// Quad size in pixels (uSize) - offset 128, size 8
    pub size: [f32; 2],
    /// Corner radius (uRadius) - offset 136
    pub radius: f32,
    /// Border width (uBorderWidth) - offset 140
    pub border_width: f32,
    /// Linear fill colour (uColor) - offset 144, size 12
    pub color: [f32; 3],
    /// Overall opacity (uOpacity) - offset 156
    pub opacity: f32,
    /// Linear border colour (uBorderColor) - offset 160, size 12
    pub border_color: [f32; 3],
    /// Fill opacity (uBgOpacity) - offset 172
    pub bg_opacity: f32,
    /// Preview viewport in logical pixels (uResolution) - offset 176, size 8
    pub resolution: [f32; 2],
    /// Seconds since the current program was installed (uTime) - offset 184
    pub time: f32,
    pub _pad0: f32,
}
// Total size: 192 bytes

const _: () = assert!(
    std::mem::size_of::<PreviewUniforms>() == 192,
    "PreviewUniforms must be exactly 192 bytes for GPU compatibility"
);

impl PreviewUniforms {
    /// Build the uniform block for one frame.
    ///
    /// `viewport` is the preview area in logical pixels.
    pub fn from_params(params: &ShaderParams, viewport: [f32; 2], time: f32) -> Self {
        Self {
            projection: super::camera::orthographic_projection(viewport[0], viewport[1]),
            model_view: super::camera::quad_model_view(params.width, params.height),
            size: [params.width, params.height],
            radius: params.radius,
            border_width: params.border_width,
            color: srgb_to_linear_rgb(params.color),
            opacity: params.opacity,
            border_color: srgb_to_linear_rgb(params.border_color),
            bg_opacity: params.bg_opacity,
            resolution: viewport,
            time,
            _pad0: 0.0,
        }
    }
}

/// One vertex of the preview quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching `position` / `uv` in the vertex prelude
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// 1×1 plane centred on the origin, as a triangle strip (TL, TR, BL, BR).
/// UV origin is bottom-left.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [-0.5, 0.5, 0.0],
        uv: [0.0, 1.0],
    },
    QuadVertex {
        position: [0.5, 0.5, 0.0],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        position: [-0.5, -0.5, 0.0],
        uv: [0.0, 0.0],
    },
    QuadVertex {
        position: [0.5, -0.5, 0.0],
        uv: [1.0, 0.0],
    },
];

/// Convert one sRGB channel byte to linear light.
pub fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn srgb_to_linear_rgb(rgb: [u8; 3]) -> [f32; 3] {
    [
        srgb_to_linear(rgb[0]),
        srgb_to_linear(rgb[1]),
        srgb_to_linear(rgb[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
        // Mid grey is darker in linear space
        assert!(srgb_to_linear(128) < 0.25);
    }

    #[test]
    fn test_uniforms_copy_params() {
        let params = ShaderParams::default();
        let uniforms = PreviewUniforms::from_params(&params, [800.0, 600.0], 1.5);
        assert_eq!(uniforms.size, [300.0, 200.0]);
        assert_eq!(uniforms.radius, 20.0);
        assert_eq!(uniforms.border_width, 2.0);
        assert_eq!(uniforms.resolution, [800.0, 600.0]);
        assert_eq!(uniforms.time, 1.5);
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 192);
    }

    #[test]
    fn test_quad_vertex_stride() {
        assert_eq!(QuadVertex::layout().array_stride, 20);
    }
}
