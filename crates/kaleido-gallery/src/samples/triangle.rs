//! Hello-triangle sample.
//!
//! The three vertices live in the shader, so the pipeline binds nothing:
//! no vertex buffer, no bind groups, no depth. Every frame is the same
//! single draw.

use kaleido_engine::render::RenderCtx;

use crate::plan::{DrawCall, FramePlan, PassResources};

const SHADER: &str = include_str!("shaders/triangle.wgsl");

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

pub struct TriangleSession {
    pipeline: wgpu::RenderPipeline,
    pub(crate) fallback_view: wgpu::TextureView,
}

impl TriangleSession {
    pub fn init(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kaleido triangle shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("kaleido triangle pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("kaleido triangle pipeline"),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let fallback_view = super::fallback_color_target(ctx, "kaleido triangle fallback");

        Self {
            pipeline,
            fallback_view,
        }
    }

    pub(crate) fn resources(&self) -> PassResources<'_> {
        PassResources {
            pipeline: &self.pipeline,
            vertex_buffer: None,
            uniform_buffer: None,
            bind_groups: Vec::new(),
            depth_view: None,
        }
    }
}

/// The triangle's frame never varies: clear to opaque black, draw 3 vertices.
pub fn frame_plan() -> FramePlan {
    FramePlan {
        clear_color: CLEAR,
        uniform_writes: Vec::new(),
        draws: vec![DrawCall {
            vertex_count: 3,
            instance_count: 1,
            first_vertex: 0,
            first_instance: 0,
            bind_group: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_pass_one_draw_of_three_vertices() {
        let plan = frame_plan();
        assert_eq!(
            plan.draws,
            vec![DrawCall {
                vertex_count: 3,
                instance_count: 1,
                first_vertex: 0,
                first_instance: 0,
                bind_group: None,
            }]
        );
    }

    #[test]
    fn clears_to_opaque_black_with_no_uploads() {
        let plan = frame_plan();
        assert!(plan.uniform_writes.is_empty());
        assert_eq!(plan.clear_color.r, 0.0);
        assert_eq!(plan.clear_color.g, 0.0);
        assert_eq!(plan.clear_color.b, 0.0);
        assert_eq!(plan.clear_color.a, 1.0);
    }
}
