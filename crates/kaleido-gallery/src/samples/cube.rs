//! Rotating-cube sample.
//!
//! One interleaved vertex buffer, one 64-byte uniform block, depth-tested
//! with back-face culling. The frame state is a single accumulated angle;
//! the projection (including the fixed -5 camera offset) is baked once at
//! init and never touched again.

use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;
use wgpu::util::DeviceExt;

use kaleido_engine::render::RenderCtx;

use crate::geometry;
use crate::plan::{self, DrawCall, FramePlan, PassResources, UniformWrite};

use super::{DEPTH_FORMAT, ROTATION_STEP};

const SHADER: &str = include_str!("shaders/cube.wgsl");

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

const ROTATION_AXIS: Vec3 = Vec3::new(1.0, 1.0, 0.0);
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -5.0);

/// Accumulated rotation plus the fixed projection.
#[derive(Debug, Clone)]
pub struct CubeState {
    angle: f32,
    projection: Mat4,
}

impl CubeState {
    pub fn new(aspect: f32) -> Self {
        let projection = Mat4::perspective_rh(FRAC_PI_2, aspect, 1.0, 100.0)
            * Mat4::from_translation(CAMERA_OFFSET);
        Self {
            angle: 0.0,
            projection,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances one frame and returns the transform to upload.
    pub fn advance(&mut self) -> Mat4 {
        self.angle += ROTATION_STEP;
        self.projection * Mat4::from_axis_angle(ROTATION_AXIS.normalize(), self.angle)
    }

    pub fn plan_frame(&mut self) -> FramePlan {
        let transform = self.advance();
        FramePlan {
            clear_color: CLEAR,
            uniform_writes: vec![UniformWrite {
                offset: 0,
                data: transform.to_cols_array(),
            }],
            draws: vec![DrawCall {
                vertex_count: geometry::CUBE_VERTEX_COUNT,
                instance_count: 1,
                first_vertex: 0,
                first_instance: 0,
                bind_group: Some(0),
            }],
        }
    }
}

pub struct CubeSession {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    pub(crate) fallback_view: wgpu::TextureView,
    pub(crate) state: CubeState,
}

impl CubeSession {
    pub fn init(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kaleido cube shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("kaleido cube vbo"),
                contents: bytemuck::cast_slice(&geometry::CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("kaleido cube bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: std::num::NonZeroU64::new(plan::MATRIX_BYTES),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("kaleido cube pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("kaleido cube pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[geometry::position_color_layout()],
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
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),

                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kaleido cube ubo"),
            size: plan::MATRIX_BYTES,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kaleido cube bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let depth_view = super::depth_target(ctx, "kaleido cube depth");
        let fallback_view = super::fallback_color_target(ctx, "kaleido cube fallback");

        Self {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            bind_group,
            depth_view,
            fallback_view,
            state: CubeState::new(ctx.aspect_ratio()),
        }
    }

    pub(crate) fn resources(&self) -> PassResources<'_> {
        PassResources {
            pipeline: &self.pipeline,
            vertex_buffer: Some(&self.vertex_buffer),
            uniform_buffer: Some(&self.uniform_buffer),
            bind_groups: vec![&self.bind_group],
            depth_view: Some(&self.depth_view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const ASPECT: f32 = 800.0 / 600.0;

    fn assert_mat4_close(actual: Mat4, expected: Mat4) {
        for (a, e) in actual
            .to_cols_array()
            .iter()
            .zip(expected.to_cols_array().iter())
        {
            assert!((a - e).abs() < 1e-5, "matrix mismatch: {a} vs {e}");
        }
    }

    #[test]
    fn angle_accumulates_one_step_per_frame() {
        let mut state = CubeState::new(ASPECT);
        for _ in 0..90 {
            state.advance();
        }
        assert!((state.angle() - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn transform_is_projection_times_accumulated_rotation() {
        let mut state = CubeState::new(ASPECT);
        let mut last = Mat4::IDENTITY;
        let frames = 30;
        for _ in 0..frames {
            last = state.advance();
        }

        let projection = Mat4::perspective_rh(FRAC_PI_2, ASPECT, 1.0, 100.0)
            * Mat4::from_translation(CAMERA_OFFSET);
        let rotation = Mat4::from_axis_angle(
            ROTATION_AXIS.normalize(),
            frames as f32 * ROTATION_STEP,
        );
        assert_mat4_close(last, projection * rotation);
    }

    #[test]
    fn frame_plan_uploads_one_matrix_and_draws_the_whole_mesh() {
        let mut state = CubeState::new(ASPECT);
        let plan = state.plan_frame();

        assert_eq!(plan.uniform_writes.len(), 1);
        assert_eq!(plan.uniform_writes[0].offset, 0);
        assert_eq!(
            plan.draws,
            vec![DrawCall {
                vertex_count: geometry::CUBE_VERTEX_COUNT,
                instance_count: 1,
                first_vertex: 0,
                first_instance: 0,
                bind_group: Some(0),
            }]
        );
    }

    #[test]
    fn fresh_state_restarts_from_zero() {
        let mut state = CubeState::new(ASPECT);
        state.advance();
        state.advance();

        let replacement = CubeState::new(ASPECT);
        assert_eq!(replacement.angle(), 0.0);
    }
}
