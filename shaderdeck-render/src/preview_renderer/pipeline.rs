//! Pipeline and bind group creation for the preview renderer.

use wgpu::*;

use super::types::QuadVertex;

/// Create the bind group layout for the preview program.
///
/// Layout:
/// - 0: Uniform buffer (`PreviewUniforms`)
pub fn create_bind_group_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Preview Bind Group Layout"),
        entries: &[BindGroupLayoutEntry {
            binding: 0,
            visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Create the bind group holding the uniform buffer.
pub fn create_bind_group(
    device: &Device,
    layout: &BindGroupLayout,
    uniform_buffer: &Buffer,
) -> BindGroup {
    device.create_bind_group(&BindGroupDescriptor {
        label: Some("Preview Bind Group"),
        layout,
        entries: &[BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    })
}

/// Create the render pipeline for one compiled program.
///
/// # Arguments
/// * `device` - The wgpu device
/// * `vertex_module` - Compiled vertex stage (entry point `main`)
/// * `fragment_module` - Compiled fragment stage (entry point `main`)
/// * `bind_group_layout` - Bind group layout for the pipeline
/// * `target_format` - Target surface texture format
pub fn create_render_pipeline(
    device: &Device,
    vertex_module: &ShaderModule,
    fragment_module: &ShaderModule,
    bind_group_layout: &BindGroupLayout,
    target_format: TextureFormat,
) -> RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Preview Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("Preview Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: vertex_module,
            entry_point: Some("main"),
            buffers: &[QuadVertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: fragment_module,
            entry_point: Some("main"),
            targets: &[Some(ColorTargetState {
                format: target_format,
                blend: Some(BlendState::ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleStrip,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
